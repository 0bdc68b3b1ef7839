use axum::{
    Json, Router,
    extract::{OriginalUri, Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::application::access;
use crate::application::dto::ads::{AdDraft, AdQuery};
use crate::application::use_cases::ads::create_ad::CreateAd;
use crate::application::use_cases::ads::delete_ad::DeleteAd;
use crate::application::use_cases::ads::get_ad::GetAd;
use crate::application::use_cases::ads::list_ads::ListAds;
use crate::application::use_cases::ads::update_ad::UpdateAd;
use crate::application::validation::FieldErrors;
use crate::bootstrap::app_context::AppContext;
use crate::domain::ads::ad::{Ad, Category};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::{ApiError, parse_id};
use crate::presentation::http::input;
use crate::presentation::http::pagination::{PageParams, Paginated};

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub title: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            title: c.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AdResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: Option<CategoryResponse>,
    pub condition: &'static str,
    pub condition_display: &'static str,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: AuthorResponse,
}

impl From<Ad> for AdResponse {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            image_url: ad.image_url,
            category: ad.category.map(CategoryResponse::from),
            condition: ad.condition.as_str(),
            condition_display: ad.condition.label(),
            is_active: ad.is_active,
            created_at: ad.created_at,
            author: AuthorResponse {
                id: ad.author.id,
                username: ad.author.username,
            },
        }
    }
}

/// Write payload. Values stay untyped until [`AdDraft`] conversion so a
/// mistyped field is reported on that field.
#[derive(Debug, Default, Deserialize)]
pub struct AdRequest {
    #[serde(default, deserialize_with = "input::present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "input::present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "input::present")]
    pub image_url: Option<Value>,
    #[serde(default, deserialize_with = "input::present")]
    pub category_id: Option<Value>,
    #[serde(default, deserialize_with = "input::present")]
    pub condition: Option<Value>,
    #[serde(default, deserialize_with = "input::present")]
    pub is_active: Option<Value>,
}

impl From<AdRequest> for AdDraft {
    fn from(req: AdRequest) -> Self {
        let mut malformed = FieldErrors::default();
        AdDraft {
            title: input::text(&mut malformed, "title", req.title),
            description: input::text(&mut malformed, "description", req.description),
            image_url: input::text(&mut malformed, "image_url", req.image_url),
            category: input::pk_ref(&mut malformed, "category_id", req.category_id),
            condition: input::choice_text(&mut malformed, "condition", req.condition),
            is_active: input::boolean(&mut malformed, "is_active", req.is_active),
            malformed,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListAdsQuery {
    pub category: Option<String>,
    pub condition: Option<String>,
    pub search: Option<String>,
}

pub async fn list_ads(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    OriginalUri(uri): OriginalUri,
    Query(filters): Query<ListAdsQuery>,
    Query(paging): Query<PageParams>,
) -> Result<Json<Paginated<AdResponse>>, ApiError> {
    auth::resolve_actor(&ctx, bearer).await?;
    let page = paging.request(&ctx.cfg)?;
    let repo = ctx.ad_repo();
    let categories = ctx.category_repo();
    let uc = ListAds {
        repo: repo.as_ref(),
        categories: categories.as_ref(),
    };
    let query = AdQuery {
        category: filters.category,
        condition: filters.condition,
        search: filters.search,
    };
    let result = uc.execute(&query, page).await?;
    Ok(Json(Paginated::from_page(result, &uri, AdResponse::from)))
}

pub async fn create_ad(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    body: Result<Json<AdRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AdResponse>), ApiError> {
    let actor = auth::resolve_actor(&ctx, bearer).await?;
    access::require_user(&actor)?;
    let Json(req) = body?;
    let repo = ctx.ad_repo();
    let categories = ctx.category_repo();
    let uc = CreateAd {
        repo: repo.as_ref(),
        categories: categories.as_ref(),
    };
    let ad = uc.execute(&actor, &req.into()).await?;
    tracing::info!(ad_id = ad.id, author_id = %ad.author.id, "ad_created");
    Ok((StatusCode::CREATED, Json(ad.into())))
}

pub async fn get_ad(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<String>,
) -> Result<Json<AdResponse>, ApiError> {
    auth::resolve_actor(&ctx, bearer).await?;
    let id = parse_id(&id)?;
    let repo = ctx.ad_repo();
    let uc = GetAd {
        repo: repo.as_ref(),
    };
    let ad = uc.execute(id).await?;
    Ok(Json(ad.into()))
}

pub async fn update_ad(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<String>,
    body: Result<Json<AdRequest>, JsonRejection>,
) -> Result<Json<AdResponse>, ApiError> {
    let actor = auth::resolve_actor(&ctx, bearer).await?;
    access::require_user(&actor)?;
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let repo = ctx.ad_repo();
    let categories = ctx.category_repo();
    let uc = UpdateAd {
        repo: repo.as_ref(),
        categories: categories.as_ref(),
    };
    let ad = uc.execute(&actor, id, &req.into()).await?;
    Ok(Json(ad.into()))
}

pub async fn delete_ad(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let actor = auth::resolve_actor(&ctx, bearer).await?;
    access::require_user(&actor)?;
    let id = parse_id(&id)?;
    let repo = ctx.ad_repo();
    let uc = DeleteAd {
        repo: repo.as_ref(),
    };
    uc.execute(&actor, id).await?;
    tracing::info!(ad_id = id, "ad_deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/ads/", get(list_ads).post(create_ad))
        .route("/ads/:id/", get(get_ad).put(update_ad).delete(delete_ad))
        .with_state(ctx)
}
