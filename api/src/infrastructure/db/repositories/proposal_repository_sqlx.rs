use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::dto::proposals::NewProposal;
use crate::application::ports::proposal_repository::ProposalRepository;
use crate::domain::proposals::proposal::{ExchangeProposal, ProposalStatus};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::ad_repository_sqlx::{ad_columns, map_ad};

pub struct SqlxProposalRepository {
    pub pool: PgPool,
}

impl SqlxProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const JOINS: &str = r#"FROM exchange_proposals p
    JOIN ads s ON s.id = p.sender_id
    JOIN users su ON su.id = s.author_id
    LEFT JOIN categories sc ON sc.id = s.category_id
    JOIN ads r ON r.id = p.receiver_id
    JOIN users ru ON ru.id = r.author_id
    LEFT JOIN categories rc ON rc.id = r.category_id"#;

fn select_sql(tail: &str) -> String {
    format!(
        "SELECT p.id, p.comment, p.status, p.created_at, {}, {} {JOINS} {tail}",
        ad_columns("s", "su", "sc", "s_"),
        ad_columns("r", "ru", "rc", "r_"),
    )
}

fn map_proposal(r: &PgRow) -> anyhow::Result<ExchangeProposal> {
    let status: String = r.try_get("status")?;
    Ok(ExchangeProposal {
        id: r.try_get("id")?,
        sender: map_ad(r, "s_")?,
        receiver: map_ad(r, "r_")?,
        comment: r.try_get("comment")?,
        status: status.parse::<ProposalStatus>()?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl ProposalRepository for SqlxProposalRepository {
    async fn list_for_participant(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Page<ExchangeProposal>> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) {JOINS} WHERE s.author_id = $1 OR r.author_id = $1"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(&select_sql(
            "WHERE s.author_id = $1 OR r.author_id = $1
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $2 OFFSET $3",
        ))
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        let items = rows
            .iter()
            .map(map_proposal)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Page {
            items,
            total,
            request: page,
        })
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<ExchangeProposal>> {
        let row = sqlx::query(&select_sql("WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_proposal).transpose()
    }

    async fn create(&self, proposal: &NewProposal) -> anyhow::Result<ExchangeProposal> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO exchange_proposals (sender_id, receiver_id, comment, status)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(proposal.sender_id)
        .bind(proposal.receiver_id)
        .bind(&proposal.comment)
        .bind(ProposalStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("proposal {id} vanished after insert"))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM exchange_proposals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
