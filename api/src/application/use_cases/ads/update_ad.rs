use crate::application::access::{self, Actor};
use crate::application::dto::ads::AdDraft;
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::ad_repository::AdRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::use_cases::ads::validate_draft;
use crate::domain::ads::ad::Ad;

pub struct UpdateAd<'a, R, C>
where
    R: AdRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub repo: &'a R,
    pub categories: &'a C,
}

impl<'a, R, C> UpdateAd<'a, R, C>
where
    R: AdRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    /// Full replacement of the editable fields. Permission is checked
    /// before the payload is validated.
    pub async fn execute(&self, actor: &Actor, id: i64, draft: &AdDraft) -> UseCaseResult<Ad> {
        access::require_user(actor)?;
        let current = self.repo.get_by_id(id).await?.ok_or(UseCaseError::NotFound)?;
        access::require_edit(access::resolve_ad(actor, &current))?;

        let fields = validate_draft(self.categories, draft)
            .await?
            .for_update(&current);
        self.repo
            .update(id, &fields)
            .await?
            .ok_or(UseCaseError::NotFound)
    }
}
