use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::errors::UseCaseError;
use crate::application::ports::user_repository::User;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::{ApiError, INVALID_TOKEN, NOT_AUTHENTICATED};

const ACCESS_COOKIE: &str = "access_token";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

pub async fn register(
    State(ctx): State<AppContext>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(req) = body?;
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        username: req.username,
        password: req.password,
    };
    let user = uc.execute(&dto).await?;
    tracing::info!(user_id = %user.id, "user_registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(ctx): State<AppContext>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let Json(req) = body?;
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        username: req.username,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or(UseCaseError::InvalidCredentials)?;
    let token = issue_token(&ctx.cfg, user.id)?;

    // Set HttpOnly cookie with the access token
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, ctx.cfg.secure_cookies());
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(anyhow::Error::from)?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            user: user.into(),
        }),
    ))
}

pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> Result<Json<UserResponse>, ApiError> {
    let actor = resolve_actor(&ctx, bearer).await?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    match uc.execute(&actor).await {
        Ok(user) => Ok(Json(user.into())),
        Err(UseCaseError::Unauthenticated) => Err(ApiError::Unauthorized(NOT_AUTHENTICATED)),
        Err(UseCaseError::NotFound) => Err(ApiError::Unauthorized(INVALID_TOKEN)),
        Err(other) => Err(other.into()),
    }
}

pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    // Clear cookie by setting it expired
    let mut headers = HeaderMap::new();
    let cookie = if ctx.cfg.secure_cookies() {
        "access_token=; HttpOnly; Secure; Path=/; Max-Age=0; SameSite=Lax"
    } else {
        "access_token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
    };
    headers.insert(header::SET_COOKIE, HeaderValue::from_static(cookie));
    (headers, StatusCode::NO_CONTENT)
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Raw token from the `Authorization` header or the `access_token` cookie.
/// Handlers take `Option<Bearer>`; a missing token means an anonymous request.
pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(auth) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.trim().to_string()));
            }
        }

        // 2) Fallback to HttpOnly cookie `access_token`
        if let Some(cookie_hdr) = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, ACCESS_COOKIE).filter(|t| !t.is_empty()) {
                return Ok(Bearer(token));
            }
        }

        Err(StatusCode::UNAUTHORIZED)
    }
}

pub fn issue_token(cfg: &Config, user_id: Uuid) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + cfg.jwt_expires_secs.max(0) as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Uuid, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN))?;
    Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::Unauthorized(INVALID_TOKEN))
}

/// No credentials is an anonymous actor; credentials that fail to verify, or
/// that name a user who no longer exists, are rejected with 401.
pub async fn resolve_actor(ctx: &AppContext, bearer: Option<Bearer>) -> Result<Actor, ApiError> {
    let Some(bearer) = bearer else {
        return Ok(Actor::Anonymous);
    };
    let user_id = validate_bearer(&ctx.cfg, bearer)?;
    match ctx.user_repo().find_by_id(user_id).await? {
        Some(_) => Ok(Actor::User(user_id)),
        None => Err(ApiError::Unauthorized(INVALID_TOKEN)),
    }
}

// --- Cookie helpers ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{ACCESS_COOKIE}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}
