//! Session token construction.
//!
//! Tokens are `HS256` JWTs signed with the signing secret of the app the
//! login is scoped to. Scoping the key per app keeps a leaked secret's blast
//! radius to that one app: its tokens verify nowhere else.

use crate::auth::providers::{App, User};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenHeader {
    pub alg: String,
    pub typ: String,
}

impl SessionTokenHeader {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenClaims {
    pub sub: i64,
    pub email: String,
    pub app_id: i32,
    pub exp: u64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("empty signing secret")]
    EmptySecret,
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("system clock is before the unix epoch")]
    Clock,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, TokenError> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| TokenError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn unix_now() -> Result<u64, TokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|_| TokenError::Clock)
}

/// Create an `HS256` signed session token.
///
/// # Errors
///
/// Returns an error if the secret is empty or claims cannot be encoded.
pub fn sign_hs256(secret: &[u8], claims: &SessionTokenClaims) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let header_b64 = b64e_json(&SessionTokenHeader::hs256())?;
    let claims_b64 = b64e_json(claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    // HMAC accepts keys of any size, so after the empty check this is
    // infallible.
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::EmptySecret)?;
    mac.update(signing_input.as_bytes());
    let signature = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}

/// Verify an `HS256` session token and return its claims.
///
/// Not served by any endpoint; kept for tests and future token consumers.
///
/// # Errors
///
/// Returns an error for a malformed token, a wrong signature or an expired
/// `exp` claim.
pub fn verify_hs256(token: &str, secret: &[u8]) -> Result<SessionTokenClaims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let mut parts = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::TokenFormat);
    };

    let header: SessionTokenHeader = b64d_json(header_b64)?;
    if header.alg != "HS256" {
        return Err(TokenError::UnsupportedAlg(header.alg));
    }

    let signature = Base64UrlUnpadded::decode_vec(signature_b64).map_err(|_| TokenError::Base64)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::EmptySecret)?;
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let claims: SessionTokenClaims = b64d_json(claims_b64)?;
    if claims.exp <= unix_now()? {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Token issuing contract.
pub trait TokenIssuer: Send + Sync {
    /// Build and sign a session token for `user`, scoped to `app`, expiring
    /// `ttl` from now.
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError>;
}

/// Issuer producing `HS256` JWTs signed with the app's secret.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hs256Issuer;

impl TokenIssuer for Hs256Issuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        let claims = SessionTokenClaims {
            sub: user.id,
            email: user.email.clone(),
            app_id: app.id,
            exp: unix_now()? + ttl.as_secs(),
        };

        sign_hs256(app.signing_secret.expose_secret(), &claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretSlice;

    fn user() -> User {
        User {
            id: 42,
            email: "alice@example.com".to_string(),
            password_hash: Vec::new(),
            is_admin: false,
        }
    }

    fn app(secret: &[u8]) -> App {
        App {
            id: 7,
            name: "web".to_string(),
            signing_secret: SecretSlice::from(secret.to_vec()),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = Hs256Issuer
            .issue(&user(), &app(b"k1"), Duration::from_secs(3600))
            .expect("issue");

        let claims = verify_hs256(&token, b"k1").expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 7);
    }

    #[test]
    fn test_expiry_is_issue_time_plus_ttl() {
        let ttl = Duration::from_secs(600);
        let before = unix_now().expect("clock");
        let token = Hs256Issuer.issue(&user(), &app(b"k1"), ttl).expect("issue");
        let after = unix_now().expect("clock");

        let claims = verify_hs256(&token, b"k1").expect("verify");
        assert!(claims.exp >= before + ttl.as_secs());
        assert!(claims.exp <= after + ttl.as_secs());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(matches!(
            Hs256Issuer.issue(&user(), &app(b""), Duration::from_secs(60)),
            Err(TokenError::EmptySecret)
        ));
    }

    #[test]
    fn test_wrong_secret_does_not_verify() {
        let token = Hs256Issuer
            .issue(&user(), &app(b"app-one"), Duration::from_secs(60))
            .expect("issue");

        // A different app's secret must not validate the token.
        assert!(matches!(
            verify_hs256(&token, b"app-two"),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_claims_do_not_verify() {
        let token = Hs256Issuer
            .issue(&user(), &app(b"k1"), Duration::from_secs(60))
            .expect("issue");

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = b64e_json(&SessionTokenClaims {
            sub: 1,
            email: "mallory@example.com".to_string(),
            app_id: 7,
            exp: unix_now().expect("clock") + 60,
        })
        .expect("encode");
        parts[1] = &forged;

        assert!(matches!(
            verify_hs256(&parts.join("."), b"k1"),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = SessionTokenClaims {
            sub: 42,
            email: "alice@example.com".to_string(),
            app_id: 7,
            exp: unix_now().expect("clock") - 1,
        };
        let token = sign_hs256(b"k1", &claims).expect("sign");

        assert!(matches!(
            verify_hs256(&token, b"k1"),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_garbage_is_a_format_error() {
        assert!(matches!(
            verify_hs256("not-a-token", b"k1"),
            Err(TokenError::TokenFormat)
        ));
        assert!(matches!(
            verify_hs256("a.b.c.d", b"k1"),
            Err(TokenError::TokenFormat)
        ));
    }
}
