use crate::application::access::{self, Actor};
use crate::application::dto::ads::AdDraft;
use crate::application::errors::UseCaseResult;
use crate::application::ports::ad_repository::AdRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::use_cases::ads::validate_draft;
use crate::domain::ads::ad::Ad;

pub struct CreateAd<'a, R, C>
where
    R: AdRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub repo: &'a R,
    pub categories: &'a C,
}

impl<'a, R, C> CreateAd<'a, R, C>
where
    R: AdRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, draft: &AdDraft) -> UseCaseResult<Ad> {
        let author_id = access::require_user(actor)?;
        let fields = validate_draft(self.categories, draft).await?.for_create();
        let ad = self.repo.create(author_id, &fields).await?;
        Ok(ad)
    }
}
