use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::ads::ad::Category;
use crate::infrastructure::db::PgPool;

pub struct SqlxCategoryRepository {
    pub pool: PgPool,
}

impl SqlxCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn list(&self) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, title FROM categories ORDER BY title, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: r.get("id"),
                title: r.get("title"),
            })
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query("SELECT id, title FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| Category {
            id: r.get("id"),
            title: r.get("title"),
        }))
    }
}
