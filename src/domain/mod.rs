//! Domain layer - Core entities, errors and storage traits

pub mod error;
pub mod user;

pub use error::{DomainError, TokenError};
pub use user::{Credential, CredentialRepository, Identity, Role, UserId};
