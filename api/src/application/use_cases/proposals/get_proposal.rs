use crate::application::access::{self, Actor};
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::proposal_repository::ProposalRepository;
use crate::domain::proposals::proposal::ExchangeProposal;

pub struct GetProposal<'a, R: ProposalRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProposalRepository + ?Sized> GetProposal<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: i64) -> UseCaseResult<ExchangeProposal> {
        let proposal = self.repo.get_by_id(id).await?.ok_or(UseCaseError::NotFound)?;
        access::require_view(access::resolve_proposal(actor, &proposal))?;
        Ok(proposal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded;

    #[tokio::test]
    async fn receiver_may_read_outsider_may_not() {
        let (store, fx) = seeded();
        let outsider = store.add_user("user3");
        let uc = GetProposal {
            repo: store.as_ref(),
        };
        let p = uc.execute(&Actor::User(fx.user2), fx.proposal).await.unwrap();
        assert_eq!(p.comment, "Swap?");
        assert_eq!(p.sender.id, fx.smartphone);
        assert_eq!(p.receiver.id, fx.tshirt);

        assert!(matches!(
            uc.execute(&Actor::User(outsider), fx.proposal).await,
            Err(UseCaseError::Forbidden)
        ));
        assert!(matches!(
            uc.execute(&Actor::User(fx.user1), 9999).await,
            Err(UseCaseError::NotFound)
        ));
    }
}
