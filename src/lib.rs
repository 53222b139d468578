//! # Idento
//!
//! `idento` is a credential-authentication service. It registers users with
//! email/password, authenticates them, issues signed session tokens scoped to
//! a named client application ("app"), and answers privilege queries
//! ("is this user an admin").
//!
//! ## Tokens
//!
//! Session tokens are self-contained `HS256` JWTs signed with the secret of
//! the app the login is scoped to. A compromised secret only affects tokens
//! issued for that one app; tokens are not verifiable across apps.
//!
//! ## Storage
//!
//! Users and apps live in `SQLite`. The schema is applied at startup; apps are
//! provisioned out of band (the service never writes the `apps` table).

pub mod api;
pub mod auth;
pub mod cli;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }
}
