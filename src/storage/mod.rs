//! `SQLite`-backed implementation of the user-directory and app-registry
//! contracts.
//!
//! The `apps` table is read-only here: apps are provisioned out of band by an
//! operator, the service only resolves them.

use crate::auth::providers::{App, AppRegistry, ProviderError, User, UserDirectory};
use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::SecretSlice;
use sqlx::{
    error::ErrorKind,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Row, SqlitePool,
};
use std::time::Duration;
use tracing::{info_span, Instrument};

const SCHEMA: &str = include_str!("../../sql/schema.sql");

/// Open (creating if missing) the database at `path` and apply the schema.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the schema fails to
/// apply.
pub async fn connect(path: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    apply_schema(&pool).await?;

    Ok(pool)
}

/// Apply the embedded schema statement by statement. Idempotent, so safe on
/// every startup.
async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "DDL",
            db.statement = statement
        );
        sqlx::query(statement)
            .execute(pool)
            .instrument(span)
            .await
            .with_context(|| format!("Failed to apply schema statement: {statement}"))?;
    }

    Ok(())
}

/// Store satisfying both lookup contracts over a shared pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for SqliteStore {
    async fn find_by_email(&self, email: &str) -> Result<User, ProviderError> {
        let query = "SELECT id, email, password_hash, is_admin FROM users WHERE email = ?1";
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up user by email")?;

        row.map_or(Err(ProviderError::NotFound), |row| {
            Ok(User {
                id: row.get("id"),
                email: row.get("email"),
                password_hash: row.get("password_hash"),
                is_admin: row.get("is_admin"),
            })
        })
    }

    async fn save(&self, email: &str, password_hash: &[u8]) -> Result<i64, ProviderError> {
        let query = "INSERT INTO users (email, password_hash) VALUES (?1, ?2) RETURNING id";
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(row) => Ok(row.get("id")),
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), ErrorKind::UniqueViolation) =>
            {
                Err(ProviderError::AlreadyExists)
            }
            Err(err) => Err(ProviderError::Other(
                anyhow::Error::from(err).context("failed to save user"),
            )),
        }
    }

    async fn admin_flag(&self, user_id: i64) -> Result<bool, ProviderError> {
        let query = "SELECT is_admin FROM users WHERE id = ?1";
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up admin flag")?;

        row.map_or(Err(ProviderError::NotFound), |row| {
            Ok(row.get("is_admin"))
        })
    }
}

#[async_trait]
impl AppRegistry for SqliteStore {
    async fn find_by_id(&self, app_id: i32) -> Result<App, ProviderError> {
        let query = "SELECT id, name, signing_secret FROM apps WHERE id = ?1";
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(app_id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up app")?;

        row.map_or(Err(ProviderError::NotFound), |row| {
            let secret: Vec<u8> = row.get("signing_secret");
            Ok(App {
                id: row.get("id"),
                name: row.get("name"),
                signing_secret: SecretSlice::from(secret),
            })
        })
    }
}
