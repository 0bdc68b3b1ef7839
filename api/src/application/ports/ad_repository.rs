use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::ads::{AdFields, AdFilter};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::domain::ads::ad::Ad;

#[async_trait]
pub trait AdRepository: Send + Sync {
    /// Active ads matching `filter`, newest first.
    async fn list_active(&self, filter: &AdFilter, page: PageRequest) -> anyhow::Result<Page<Ad>>;

    /// Any ad, active or not.
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Ad>>;

    async fn create(&self, author_id: Uuid, fields: &AdFields) -> anyhow::Result<Ad>;

    // The author column is never touched.
    async fn update(&self, id: i64, fields: &AdFields) -> anyhow::Result<Option<Ad>>;

    // Returns false if nothing was deleted
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
