use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::application::errors::UseCaseError;

pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";
pub const INVALID_TOKEN: &str = "Given token not valid for any token type";
pub const BAD_CREDENTIALS: &str = "No active account found with the given credentials";

/// Everything a handler can fail with, rendered as a JSON body.
#[derive(Debug)]
pub enum ApiError {
    UseCase(UseCaseError),
    /// 401 with a `WWW-Authenticate: Bearer` challenge.
    Unauthorized(&'static str),
    BadRequest(String),
}

impl From<UseCaseError> for ApiError {
    fn from(err: UseCaseError) -> Self {
        ApiError::UseCase(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::UseCase(UseCaseError::Repository(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UseCase(err) => match err {
                UseCaseError::Unauthenticated => detail(StatusCode::FORBIDDEN, NOT_AUTHENTICATED),
                UseCaseError::Forbidden => detail(StatusCode::FORBIDDEN, PERMISSION_DENIED),
                UseCaseError::NotFound => detail(StatusCode::NOT_FOUND, "Not found."),
                UseCaseError::InvalidPage => detail(StatusCode::NOT_FOUND, "Invalid page."),
                UseCaseError::InvalidCredentials => {
                    detail(StatusCode::UNAUTHORIZED, BAD_CREDENTIALS)
                }
                UseCaseError::Conflict(message) => detail(StatusCode::CONFLICT, &message),
                UseCaseError::Validation(errors) => {
                    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
                }
                UseCaseError::Repository(err) => {
                    tracing::error!(error = ?err, "request_failed");
                    detail(StatusCode::INTERNAL_SERVER_ERROR, "A server error occurred.")
                }
            },
            ApiError::Unauthorized(message) => {
                let mut resp = detail(StatusCode::UNAUTHORIZED, message);
                resp.headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                resp
            }
            ApiError::BadRequest(message) => detail(StatusCode::BAD_REQUEST, &message),
        }
    }
}

/// Path ids that are not integers can never match a row.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::UseCase(UseCaseError::NotFound))
}
