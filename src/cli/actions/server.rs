use crate::{
    api,
    auth::{AppRegistry, Argon2Hasher, AuthService, Hs256Issuer, UserDirectory},
    storage::{self, SqliteStore},
};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub db_path: String,
    pub token_ttl: Duration,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database cannot be opened or the server fails to
/// start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let pool = storage::connect(&args.db_path).await?;
    let store = Arc::new(SqliteStore::new(pool.clone()));

    let service = Arc::new(AuthService::new(
        Arc::clone(&store) as Arc<dyn UserDirectory>,
        store as Arc<dyn AppRegistry>,
        Arc::new(Argon2Hasher),
        Arc::new(Hs256Issuer),
        args.token_ttl,
    ));

    api::new(args.port, service, pool).await
}
