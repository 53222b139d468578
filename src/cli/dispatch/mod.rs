//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::{
    actions::{server::Args, Action},
    commands,
};
use anyhow::{Context, Result};
use std::time::Duration;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches
        .get_one::<u16>(commands::ARG_PORT)
        .copied()
        .unwrap_or(8080);

    let db_path = matches
        .get_one::<String>(commands::ARG_DB_PATH)
        .cloned()
        .context("missing required argument: --db-path")?;

    let token_ttl_seconds = matches
        .get_one::<u64>(commands::ARG_TOKEN_TTL)
        .copied()
        .unwrap_or(3600);

    Ok(Action::Server(Args {
        port,
        db_path,
        token_ttl: Duration::from_secs(token_ttl_seconds),
    }))
}
