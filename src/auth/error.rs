use thiserror::Error;

/// Error taxonomy returned by [`crate::auth::AuthService`].
///
/// `InvalidCredentials` deliberately covers unknown email, wrong password and
/// unknown user id, so a caller cannot tell which accounts exist.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("app not found")]
    AppNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// Stable tag for logs and tests.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::UserAlreadyExists => "user_already_exists",
            Self::AppNotFound => "app_not_found",
            Self::Internal(_) => "internal",
        }
    }
}
