use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::ad_repository::AdRepository;
use crate::domain::ads::ad::Ad;

pub struct GetAd<'a, R: AdRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AdRepository + ?Sized> GetAd<'a, R> {
    // Ads are readable by anyone, including deactivated ones.
    pub async fn execute(&self, id: i64) -> UseCaseResult<Ad> {
        self.repo.get_by_id(id).await?.ok_or(UseCaseError::NotFound)
    }
}
