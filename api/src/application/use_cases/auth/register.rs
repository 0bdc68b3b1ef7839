use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::user_repository::{User, UserRepository};
use crate::application::validation::{self, FieldErrors};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> UseCaseResult<User> {
        let (username, password) = validate(req)?;
        if self.repo.credentials_for(&username).await?.is_some() {
            return Err(UseCaseError::Conflict(
                "A user with that username already exists.".into(),
            ));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let user = self.repo.create_user(&username, &hash).await?;
        Ok(user)
    }
}

fn validate(req: &RegisterRequest) -> Result<(String, String), FieldErrors> {
    let mut errors = FieldErrors::default();
    let username = validation::required_text(
        &mut errors,
        "username",
        req.username.as_deref(),
        USERNAME_MAX_LEN,
    );
    if let Some(name) = &username {
        if name.chars().count() < USERNAME_MIN_LEN {
            errors.add(
                "username",
                format!("Ensure this field has at least {USERNAME_MIN_LEN} characters."),
            );
        }
    }
    // Passwords are taken verbatim, surrounding whitespace included.
    let password = match req.password.as_deref() {
        None => {
            errors.add("password", validation::REQUIRED);
            None
        }
        Some(p) if p.chars().count() < PASSWORD_MIN_LEN => {
            errors.add(
                "password",
                format!("Ensure this field has at least {PASSWORD_MIN_LEN} characters."),
            );
            None
        }
        Some(p) => Some(p.to_string()),
    };
    match (username, password) {
        (Some(u), Some(p)) if errors.is_empty() => Ok((u, p)),
        _ => Err(errors),
    }
}
