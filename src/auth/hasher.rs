//! One-way password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("failed to hash password")]
    Hashing,
    #[error("stored hash is malformed")]
    MalformedHash,
}

/// Credential hashing contract. A fresh salt per call means hashing the same
/// password twice yields different output.
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted one-way hash of `password`.
    fn hash(&self, password: &str) -> Result<Vec<u8>, HasherError>;

    /// Constant-time check of `password` against a stored hash. A mismatch is
    /// `Ok(false)`; only a malformed stored hash is an error.
    fn verify(&self, stored: &[u8], password: &str) -> Result<bool, HasherError>;
}

/// Argon2id hasher storing the PHC string form of the hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<Vec<u8>, HasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| HasherError::Hashing)?;

        Ok(hash.to_string().into_bytes())
    }

    fn verify(&self, stored: &[u8], password: &str) -> Result<bool, HasherError> {
        let phc = std::str::from_utf8(stored).map_err(|_| HasherError::MalformedHash)?;
        let parsed = PasswordHash::new(phc).map_err(|_| HasherError::MalformedHash)?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_per_call() {
        let hasher = Argon2Hasher;
        let first = hasher.hash("hunter2").expect("hash");
        let second = hasher.hash("hunter2").expect("hash");

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "hunter2").expect("verify"));
        assert!(hasher.verify(&second, "hunter2").expect("verify"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = Argon2Hasher;
        let stored = hasher.hash("hunter2").expect("hash");

        assert!(!hasher.verify(&stored, "hunter3").expect("verify"));
        assert!(!hasher.verify(&stored, "").expect("verify"));
    }

    #[test]
    fn test_verify_malformed_hash_is_an_error() {
        let hasher = Argon2Hasher;

        assert!(matches!(
            hasher.verify(b"not-a-phc-string", "hunter2"),
            Err(HasherError::MalformedHash)
        ));
        assert!(matches!(
            hasher.verify(&[0xff, 0xfe], "hunter2"),
            Err(HasherError::MalformedHash)
        ));
    }
}
