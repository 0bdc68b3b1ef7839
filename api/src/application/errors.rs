use crate::application::validation::FieldErrors;

/// Failure of a use case, independent of the transport that surfaces it.
#[derive(thiserror::Error, Debug)]
pub enum UseCaseError {
    #[error("authentication credentials were not provided")]
    Unauthenticated,
    #[error("permission denied")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("invalid page")]
    InvalidPage,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl From<FieldErrors> for UseCaseError {
    fn from(errors: FieldErrors) -> Self {
        UseCaseError::Validation(errors)
    }
}

pub type UseCaseResult<T> = Result<T, UseCaseError>;
