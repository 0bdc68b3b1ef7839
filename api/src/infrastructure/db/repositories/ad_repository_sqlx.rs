use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::ads::{AdFields, AdFilter};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::ports::ad_repository::AdRepository;
use crate::domain::ads::ad::{Ad, AdAuthor, Category, Condition};
use crate::infrastructure::db::{PgPool, like_pattern};

pub struct SqlxAdRepository {
    pub pool: PgPool,
}

impl SqlxAdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Ad columns joined with author and category, each prefixed with `prefix`.
pub(crate) fn ad_columns(ad: &str, user: &str, category: &str, prefix: &str) -> String {
    format!(
        "{ad}.id AS {prefix}id, {ad}.title AS {prefix}title, \
         {ad}.description AS {prefix}description, {ad}.image_url AS {prefix}image_url, \
         {ad}.condition AS {prefix}condition, {ad}.is_active AS {prefix}is_active, \
         {ad}.created_at AS {prefix}created_at, {ad}.author_id AS {prefix}author_id, \
         {user}.username AS {prefix}author_username, {ad}.category_id AS {prefix}category_id, \
         {category}.title AS {prefix}category_title"
    )
}

pub(crate) fn map_ad(r: &PgRow, prefix: &str) -> anyhow::Result<Ad> {
    let col = |name: &str| format!("{prefix}{name}");
    let category_id: Option<i64> = r.try_get(col("category_id").as_str())?;
    let category_title: Option<String> = r.try_get(col("category_title").as_str())?;
    let category = match (category_id, category_title) {
        (Some(id), Some(title)) => Some(Category { id, title }),
        _ => None,
    };
    let condition: String = r.try_get(col("condition").as_str())?;
    Ok(Ad {
        id: r.try_get(col("id").as_str())?,
        author: AdAuthor {
            id: r.try_get(col("author_id").as_str())?,
            username: r.try_get(col("author_username").as_str())?,
        },
        title: r.try_get(col("title").as_str())?,
        description: r.try_get(col("description").as_str())?,
        image_url: r.try_get(col("image_url").as_str())?,
        category,
        condition: condition.parse::<Condition>()?,
        is_active: r.try_get(col("is_active").as_str())?,
        created_at: r.try_get(col("created_at").as_str())?,
    })
}

const FILTER: &str = r#"a.is_active
      AND ($1::bigint IS NULL OR a.category_id = $1)
      AND ($2::text IS NULL OR a.condition = $2)
      AND ($3::text IS NULL OR a.title ILIKE $3 ESCAPE '\' OR a.description ILIKE $3 ESCAPE '\')"#;

#[async_trait]
impl AdRepository for SqlxAdRepository {
    async fn list_active(&self, filter: &AdFilter, page: PageRequest) -> anyhow::Result<Page<Ad>> {
        let condition = filter.condition.map(|c| c.as_str());
        let pattern = filter.search.as_deref().map(like_pattern);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM ads a WHERE {FILTER}"))
            .bind(filter.category_id)
            .bind(condition)
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {} FROM ads a
             JOIN users u ON u.id = a.author_id
             LEFT JOIN categories c ON c.id = a.category_id
             WHERE {FILTER}
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $4 OFFSET $5",
            ad_columns("a", "u", "c", "")
        );
        let rows = sqlx::query(&sql)
            .bind(filter.category_id)
            .bind(condition)
            .bind(pattern.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        let items = rows
            .iter()
            .map(|r| map_ad(r, ""))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Page {
            items,
            total,
            request: page,
        })
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Ad>> {
        let sql = format!(
            "SELECT {} FROM ads a
             JOIN users u ON u.id = a.author_id
             LEFT JOIN categories c ON c.id = a.category_id
             WHERE a.id = $1",
            ad_columns("a", "u", "c", "")
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(|r| map_ad(r, "")).transpose()
    }

    async fn create(&self, author_id: Uuid, fields: &AdFields) -> anyhow::Result<Ad> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO ads (author_id, title, description, image_url, category_id, condition, is_active)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id"#,
        )
        .bind(author_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.image_url)
        .bind(fields.category_id)
        .bind(fields.condition.as_str())
        .bind(fields.is_active)
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("ad {id} vanished after insert"))
    }

    async fn update(&self, id: i64, fields: &AdFields) -> anyhow::Result<Option<Ad>> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"UPDATE ads
               SET title = $2, description = $3, image_url = $4, category_id = $5,
                   condition = $6, is_active = $7
               WHERE id = $1
               RETURNING id"#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.image_url)
        .bind(fields.category_id)
        .bind(fields.condition.as_str())
        .bind(fields.is_active)
        .fetch_optional(&self.pool)
        .await?;
        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
