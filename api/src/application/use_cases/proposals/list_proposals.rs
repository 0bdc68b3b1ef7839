use crate::application::access::Actor;
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::errors::UseCaseResult;
use crate::application::ports::proposal_repository::ProposalRepository;
use crate::domain::proposals::proposal::ExchangeProposal;

pub struct ListProposals<'a, R: ProposalRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProposalRepository + ?Sized> ListProposals<'a, R> {
    /// Sent and received proposals of the requester. Anonymous requesters
    /// take part in nothing, so they get an empty page.
    pub async fn execute(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> UseCaseResult<Page<ExchangeProposal>> {
        let Some(user_id) = actor.user_id() else {
            page.ensure_within(0)?;
            return Ok(Page::empty(page));
        };
        let result = self.repo.list_for_participant(user_id, page).await?;
        page.ensure_within(result.total)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded;

    fn first_page() -> PageRequest {
        PageRequest { page: 1, page_size: 10 }
    }

    #[tokio::test]
    async fn both_participants_see_the_proposal() {
        let (store, fx) = seeded();
        let uc = ListProposals {
            repo: store.as_ref(),
        };
        for user in [fx.user1, fx.user2] {
            let page = uc.execute(&Actor::User(user), first_page()).await.unwrap();
            assert_eq!(page.total, 1);
            assert_eq!(page.items[0].id, fx.proposal);
        }
    }

    #[tokio::test]
    async fn outsiders_and_anonymous_see_nothing() {
        let (store, _) = seeded();
        let outsider = store.add_user("user3");
        let uc = ListProposals {
            repo: store.as_ref(),
        };
        let page = uc.execute(&Actor::User(outsider), first_page()).await.unwrap();
        assert!(page.items.is_empty());
        let page = uc.execute(&Actor::Anonymous, first_page()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
