use axum::{Json, Router, extract::State, routing::get};

use crate::application::use_cases::categories::list_categories::ListCategories;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::ads::CategoryResponse;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

pub async fn list_categories(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    auth::resolve_actor(&ctx, bearer).await?;
    let repo = ctx.category_repo();
    let uc = ListCategories {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(CategoryResponse::from).collect()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/categories/", get(list_categories))
        .with_state(ctx)
}
