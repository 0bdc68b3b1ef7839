use axum::{
    Json, Router,
    extract::{OriginalUri, Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::access;
use crate::application::dto::proposals::ProposalDraft;
use crate::application::use_cases::proposals::create_proposal::CreateProposal;
use crate::application::use_cases::proposals::delete_proposal::DeleteProposal;
use crate::application::use_cases::proposals::get_proposal::GetProposal;
use crate::application::use_cases::proposals::list_proposals::ListProposals;
use crate::application::validation::FieldErrors;
use crate::bootstrap::app_context::AppContext;
use crate::domain::proposals::proposal::ExchangeProposal;
use crate::presentation::http::ads::AdResponse;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::{ApiError, parse_id};
use crate::presentation::http::input;
use crate::presentation::http::pagination::{PageParams, Paginated};

#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub id: i64,
    pub sender: AdResponse,
    pub receiver: AdResponse,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: &'static str,
}

impl From<ExchangeProposal> for ProposalResponse {
    fn from(p: ExchangeProposal) -> Self {
        Self {
            id: p.id,
            sender: p.sender.into(),
            receiver: p.receiver.into(),
            comment: p.comment,
            created_at: p.created_at,
            status: p.status.as_str(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProposalRequest {
    #[serde(default, deserialize_with = "input::present")]
    pub sender_id: Option<Value>,
    #[serde(default, deserialize_with = "input::present")]
    pub receiver_id: Option<Value>,
    #[serde(default, deserialize_with = "input::present")]
    pub comment: Option<Value>,
}

impl From<ProposalRequest> for ProposalDraft {
    fn from(req: ProposalRequest) -> Self {
        let mut malformed = FieldErrors::default();
        ProposalDraft {
            sender_id: input::pk(&mut malformed, "sender_id", req.sender_id),
            receiver_id: input::pk(&mut malformed, "receiver_id", req.receiver_id),
            comment: input::text(&mut malformed, "comment", req.comment),
            malformed,
        }
    }
}

pub async fn list_proposals(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    OriginalUri(uri): OriginalUri,
    Query(paging): Query<PageParams>,
) -> Result<Json<Paginated<ProposalResponse>>, ApiError> {
    let actor = auth::resolve_actor(&ctx, bearer).await?;
    let page = paging.request(&ctx.cfg)?;
    let repo = ctx.proposal_repo();
    let uc = ListProposals {
        repo: repo.as_ref(),
    };
    let result = uc.execute(&actor, page).await?;
    Ok(Json(Paginated::from_page(result, &uri, ProposalResponse::from)))
}

pub async fn create_proposal(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    body: Result<Json<ProposalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProposalResponse>), ApiError> {
    let actor = auth::resolve_actor(&ctx, bearer).await?;
    access::require_user(&actor)?;
    let Json(req) = body?;
    let repo = ctx.proposal_repo();
    let ads = ctx.ad_repo();
    let uc = CreateProposal {
        repo: repo.as_ref(),
        ads: ads.as_ref(),
    };
    let proposal = uc.execute(&actor, &req.into()).await?;
    tracing::info!(
        proposal_id = proposal.id,
        sender_id = proposal.sender.id,
        receiver_id = proposal.receiver.id,
        "proposal_created"
    );
    Ok((StatusCode::CREATED, Json(proposal.into())))
}

pub async fn get_proposal(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<String>,
) -> Result<Json<ProposalResponse>, ApiError> {
    let actor = auth::resolve_actor(&ctx, bearer).await?;
    let id = parse_id(&id)?;
    let repo = ctx.proposal_repo();
    let uc = GetProposal {
        repo: repo.as_ref(),
    };
    let proposal = uc.execute(&actor, id).await?;
    Ok(Json(proposal.into()))
}

pub async fn delete_proposal(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::resolve_actor(&ctx, bearer).await?;
    access::require_user(&actor)?;
    let id = parse_id(&id)?;
    let repo = ctx.proposal_repo();
    let uc = DeleteProposal {
        repo: repo.as_ref(),
    };
    uc.execute(&actor, id).await?;
    tracing::info!(proposal_id = id, "proposal_deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/proposals/", get(list_proposals).post(create_proposal))
        .route("/proposals/:id/", get(get_proposal).delete(delete_proposal))
        .with_state(ctx)
}
