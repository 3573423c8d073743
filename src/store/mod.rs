use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::password;
use crate::config::BootstrapConfig;

pub mod memory;
pub mod postgres;

/// Error kinds reported by a credential store. Callers match on the variant,
/// never on message text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password is required")]
    EmptyPassword,
    #[error("User already exists")]
    DuplicateEmail,
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// User record as persisted. The hash never serializes to JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Recomputes the salted hash over `plain` and compares against the
    /// stored one. Plaintext is never compared directly.
    pub fn verify_password(&self, plain: &str) -> anyhow::Result<bool> {
        password::verify_password(plain, &self.password_hash)
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Emails are matched case-sensitively, as stored.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Validates inputs, hashes the password and persists the record.
    async fn create(&self, email: &str, password: &str, role: Role) -> Result<User, StoreError>;
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Shared input policy for `create`: well-formed email, non-empty password.
pub(crate) fn validate_new_user(email: &str, password: &str) -> Result<(), StoreError> {
    if !is_valid_email(email) {
        return Err(StoreError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(StoreError::EmptyPassword);
    }
    Ok(())
}

/// Idempotent startup step: create the administrative account unless a record
/// with the configured email already exists. A duplicate-create error means
/// another instance won the race, which counts as success.
pub async fn seed_default_admin(
    store: &dyn CredentialStore,
    bootstrap: &BootstrapConfig,
) -> anyhow::Result<()> {
    if store.find_by_email(&bootstrap.admin_email).await?.is_some() {
        debug!(email = %bootstrap.admin_email, "default admin already present");
        return Ok(());
    }

    match store
        .create(&bootstrap.admin_email, &bootstrap.admin_password, Role::Admin)
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "default admin user created");
            Ok(())
        }
        Err(StoreError::DuplicateEmail) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
