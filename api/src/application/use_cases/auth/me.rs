use crate::application::access::{self, Actor};
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::user_repository::{User, UserRepository};

pub struct GetMe<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetMe<'a, R> {
    /// The requester's own account. A token for a removed account is `NotFound`.
    pub async fn execute(&self, actor: &Actor) -> UseCaseResult<User> {
        let id = access::require_user(actor)?;
        self.repo.find_by_id(id).await?.ok_or(UseCaseError::NotFound)
    }
}
