use async_trait::async_trait;

use crate::domain::ads::ad::Category;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Category>>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Category>>;
}
