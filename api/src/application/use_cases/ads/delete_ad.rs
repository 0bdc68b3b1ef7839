use crate::application::access::{self, Actor};
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::ad_repository::AdRepository;

pub struct DeleteAd<'a, R: AdRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AdRepository + ?Sized> DeleteAd<'a, R> {
    /// Proposals referencing the ad go with it.
    pub async fn execute(&self, actor: &Actor, id: i64) -> UseCaseResult<()> {
        access::require_user(actor)?;
        let ad = self.repo.get_by_id(id).await?.ok_or(UseCaseError::NotFound)?;
        access::require_edit(access::resolve_ad(actor, &ad))?;
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(UseCaseError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded;

    #[tokio::test]
    async fn author_deletes_and_proposals_cascade() {
        let (store, fx) = seeded();
        let uc = DeleteAd {
            repo: store.as_ref(),
        };
        uc.execute(&Actor::User(fx.user1), fx.smartphone).await.unwrap();
        assert_eq!(store.ad_count(), 2);
        assert!(!store.proposal_exists(fx.proposal));
    }

    #[tokio::test]
    async fn non_author_cannot_delete() {
        let (store, fx) = seeded();
        let uc = DeleteAd {
            repo: store.as_ref(),
        };
        let err = uc
            .execute(&Actor::User(fx.user2), fx.smartphone)
            .await
            .unwrap_err();
        assert!(matches!(err, UseCaseError::Forbidden));
        assert_eq!(store.ad_count(), 3);
    }
}
