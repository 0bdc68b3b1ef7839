use crate::application::access::{self, Actor};
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::proposal_repository::ProposalRepository;

pub struct DeleteProposal<'a, R: ProposalRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProposalRepository + ?Sized> DeleteProposal<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: i64) -> UseCaseResult<()> {
        access::require_user(actor)?;
        let proposal = self.repo.get_by_id(id).await?.ok_or(UseCaseError::NotFound)?;
        access::require_edit(access::resolve_proposal(actor, &proposal))?;
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(UseCaseError::NotFound)
        }
    }
}
