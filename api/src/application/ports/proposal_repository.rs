use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::dto::proposals::NewProposal;
use crate::domain::proposals::proposal::ExchangeProposal;

#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Proposals whose sender or receiver ad is authored by `user_id`, newest first.
    async fn list_for_participant(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Page<ExchangeProposal>>;

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<ExchangeProposal>>;

    /// Inserts with the default `pending` status.
    async fn create(&self, proposal: &NewProposal) -> anyhow::Result<ExchangeProposal>;

    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
