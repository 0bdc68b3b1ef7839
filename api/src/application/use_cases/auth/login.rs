use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::{User, UserRepository};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<User>> {
        // Usernames never contain NUL, and Postgres rejects it in text parameters.
        if req.username.contains('\0') {
            return Ok(None);
        }
        let Some(stored) = self.repo.credentials_for(req.username.trim()).await? else {
            return Ok(None);
        };
        // Accounts without a password hash cannot log in.
        let verified = match stored.password_hash.as_deref() {
            None => false,
            Some(hash) => {
                let parsed =
                    PasswordHash::new(hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
                Argon2::default()
                    .verify_password(req.password.as_bytes(), &parsed)
                    .is_ok()
            }
        };
        Ok(verified.then_some(stored.user))
    }
}
