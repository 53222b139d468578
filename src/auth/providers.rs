//! Collaborator contracts consumed by the auth service.
//!
//! The service depends on these traits only, so tests substitute in-memory
//! fakes and the storage backend stays swappable.

use async_trait::async_trait;
use secrecy::SecretSlice;
use thiserror::Error;

/// A registered account. Created by register, immutable afterwards.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: Vec<u8>,
    pub is_admin: bool,
}

/// A client application of the service, provisioned out of band.
///
/// The signing secret is wrapped in [`SecretSlice`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct App {
    pub id: i32,
    pub name: String,
    pub signing_secret: SecretSlice<u8>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// User lookup and persistence contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user by email. `NotFound` if the email is not registered.
    async fn find_by_email(&self, email: &str) -> Result<User, ProviderError>;

    /// Persist a new user, returning the assigned id. `AlreadyExists` when
    /// the email is already taken.
    async fn save(&self, email: &str, password_hash: &[u8]) -> Result<i64, ProviderError>;

    /// Admin flag for a user id. `NotFound` for an unknown id.
    async fn admin_flag(&self, user_id: i64) -> Result<bool, ProviderError>;
}

/// App lookup contract.
#[async_trait]
pub trait AppRegistry: Send + Sync {
    /// Resolve an app by id. `NotFound` for an unknown id.
    async fn find_by_id(&self, app_id: i32) -> Result<App, ProviderError>;
}
