use async_trait::async_trait;
use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use crate::application::ports::user_repository::{Credentials, User, UserRepository};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let row = sqlx::query(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_user(&row))
    }

    async fn credentials_for(&self, username: &str) -> anyhow::Result<Option<Credentials>> {
        let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| Credentials {
            user: map_user(&r),
            password_hash: r.get::<Option<String>, _>("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT id, username FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }
}
