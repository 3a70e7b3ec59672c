use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use regex::Regex;

use crate::db::Repository;
use crate::error::{AppError, Result, ValidationError};
use crate::models::{Principal, Session};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Local accounts stored next to the courses.
#[derive(Clone)]
pub struct IdentityProvider {
    repository: Repository,
}

impl IdentityProvider {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Principal> {
        let email = normalize_email(email);
        if !email_regex().is_match(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN).into());
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string();

        let id = self
            .repository
            .insert_user(email.clone(), password_hash)
            .await?
            .ok_or_else(|| AppError::EmailTaken(email.clone()))?;

        tracing::info!(user_id = id, "account created");
        Ok(Principal { id, email })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        let Some(user) = self.repository.find_user_by_email(email).await? else {
            return Err(AppError::InvalidCredentials);
        };

        let parsed = PasswordHash::new(&user.password_hash)?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "signed in");
        Ok(Session::Authenticated(Principal {
            id: user.id,
            email: user.email,
        }))
    }

    pub fn sign_out(&self, session: &mut Session) {
        if let Some(principal) = session.principal() {
            tracing::info!(user_id = principal.id, "signed out");
        }
        *session = Session::Anonymous;
    }
}
