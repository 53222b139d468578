//! Core authentication components: password hashing, token issuing, the
//! collaborator contracts and the service orchestrating them.

pub mod error;
pub mod hasher;
pub mod providers;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use hasher::{Argon2Hasher, CredentialHasher};
pub use providers::{App, AppRegistry, ProviderError, User, UserDirectory};
pub use service::AuthService;
pub use token::{Hs256Issuer, TokenIssuer};
