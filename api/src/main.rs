use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use barter_api::bootstrap::app_context::{AppContext, AppServices};
use barter_api::bootstrap::config::Config;
use barter_api::infrastructure::db::repositories::ad_repository_sqlx::SqlxAdRepository;
use barter_api::infrastructure::db::repositories::category_repository_sqlx::SqlxCategoryRepository;
use barter_api::infrastructure::db::repositories::proposal_repository_sqlx::SqlxProposalRepository;
use barter_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

const METHODS: [http::Method; 5] = [
    http::Method::GET,
    http::Method::POST,
    http::Method::PUT,
    http::Method::DELETE,
    http::Method::OPTIONS,
];

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // Production refuses to start without FRONTEND_URL, so an unparsable
        // origin there denies every cross-origin request.
        _ if cfg.is_production => base.allow_origin(AllowOrigin::exact(HeaderValue::from_static(
            "http://invalid",
        ))),
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "barter_api=debug,axum=info,tower_http=info,sqlx=warn".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        production = cfg.is_production,
        page_size = cfg.page_size,
        "starting_barter_api"
    );

    // Database
    let pool =
        barter_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    barter_api::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxAdRepository::new(pool.clone())),
        Arc::new(SqlxCategoryRepository::new(pool.clone())),
        Arc::new(SqlxProposalRepository::new(pool.clone())),
        Arc::new(SqlxUserRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(barter_api::presentation::http::health::routes(pool.clone()))
        .merge(barter_api::presentation::http::router(ctx))
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "http_api_listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("http_api_stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
}
