//! Orchestration of the login, register and admin-check use cases.

use crate::auth::{
    error::AuthError,
    hasher::CredentialHasher,
    providers::{AppRegistry, ProviderError, UserDirectory},
    token::TokenIssuer,
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info, instrument, warn};

/// Stateless per-call authentication service. Collaborators are trait objects
/// so tests can swap in fakes; all state lives behind them.
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    apps: Arc<dyn AppRegistry>,
    hasher: Arc<dyn CredentialHasher>,
    issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl AuthService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserDirectory>,
        apps: Arc<dyn AppRegistry>,
        hasher: Arc<dyn CredentialHasher>,
        issuer: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            apps,
            hasher,
            issuer,
            token_ttl,
        }
    }

    /// Authenticate `email`/`password` and issue a session token scoped to
    /// `app_id`.
    ///
    /// An unknown email and a wrong password both come back as
    /// [`AuthError::InvalidCredentials`], so the caller cannot probe which
    /// emails are registered. An unknown app is [`AuthError::AppNotFound`]:
    /// app misconfiguration is an operator error, not a guessing vector.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] for any collaborator failure other
    /// than not-found.
    #[instrument(name = "auth.login", skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: i32,
    ) -> Result<String, AuthError> {
        let user = match self.users.find_by_email(email).await {
            Ok(user) => user,
            Err(ProviderError::NotFound) => {
                warn!("login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                error!("failed to look up user: {err}");
                return Err(AuthError::Internal(
                    anyhow::Error::from(err).context("auth.login: user lookup"),
                ));
            }
        };

        match self.hasher.verify(&user.password_hash, password) {
            Ok(true) => {}
            Ok(false) => {
                warn!("login attempt with wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                error!("failed to verify password hash: {err}");
                return Err(AuthError::Internal(
                    anyhow::Error::from(err).context("auth.login: hash verification"),
                ));
            }
        }

        let app = match self.apps.find_by_id(app_id).await {
            Ok(app) => app,
            Err(ProviderError::NotFound) => {
                warn!("login scoped to unknown app");
                return Err(AuthError::AppNotFound);
            }
            Err(err) => {
                error!("failed to look up app: {err}");
                return Err(AuthError::Internal(
                    anyhow::Error::from(err).context("auth.login: app lookup"),
                ));
            }
        };

        let token = self
            .issuer
            .issue(&user, &app, self.token_ttl)
            .map_err(|err| {
                error!("failed to issue token: {err}");
                AuthError::Internal(anyhow::Error::from(err).context("auth.login: token issue"))
            })?;

        info!(user_id = user.id, "user logged in");

        Ok(token)
    }

    /// Register a new user and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserAlreadyExists`] for a duplicate email,
    /// [`AuthError::Internal`] for hashing or persistence failures.
    #[instrument(name = "auth.register", skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<i64, AuthError> {
        let password_hash = self.hasher.hash(password).map_err(|err| {
            error!("failed to hash password: {err}");
            AuthError::Internal(anyhow::Error::from(err).context("auth.register: password hash"))
        })?;

        let user_id = match self.users.save(email, &password_hash).await {
            Ok(user_id) => user_id,
            Err(ProviderError::AlreadyExists) => {
                warn!("registration for an already registered email");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(err) => {
                error!("failed to save user: {err}");
                return Err(AuthError::Internal(
                    anyhow::Error::from(err).context("auth.register: user save"),
                ));
            }
        };

        info!(user_id, "user registered");

        Ok(user_id)
    }

    /// Whether `user_id` carries the admin flag.
    ///
    /// # Errors
    ///
    /// An unknown id is [`AuthError::InvalidCredentials`], the same kind as a
    /// failed login, so subject existence is not revealed either way.
    #[instrument(name = "auth.is_admin", skip(self))]
    pub async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        let is_admin = match self.users.admin_flag(user_id).await {
            Ok(is_admin) => is_admin,
            Err(ProviderError::NotFound) => {
                warn!("admin check for unknown user");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                error!("failed to get admin flag: {err}");
                return Err(AuthError::Internal(
                    anyhow::Error::from(err).context("auth.is_admin: admin lookup"),
                ));
            }
        };

        info!(is_admin, "admin flag checked");

        Ok(is_admin)
    }

    #[must_use]
    pub const fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
