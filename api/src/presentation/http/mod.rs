pub mod ads;
pub mod auth;
pub mod categories;
pub mod error;
pub mod health;
pub mod input;
pub mod pagination;
pub mod proposals;

use axum::Router;

use crate::bootstrap::app_context::AppContext;

/// Every route backed by the application context. `/health` needs the pool
/// directly and is mounted by the binary.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(ads::routes(ctx.clone()))
        .merge(proposals::routes(ctx.clone()))
        .merge(categories::routes(ctx.clone()))
        .nest("/auth", auth::routes(ctx))
}
