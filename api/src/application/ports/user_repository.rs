use async_trait::async_trait;
use uuid::Uuid;

/// Public account data; the only user shape that leaves the auth use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// Stored credentials, looked up by username at login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User>;
    async fn credentials_for(&self, username: &str) -> anyhow::Result<Option<Credentials>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
}
