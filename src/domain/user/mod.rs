//! User domain
//!
//! Credentials, the identity resolved from them, the storage trait the
//! orchestration layer talks to, and registration input rules.

mod entity;
mod repository;
mod validation;

pub use entity::{Credential, Identity, Role, UserId};
pub use repository::CredentialRepository;
pub use validation::{
    validate_password, validate_username, UserValidationError, MAX_PASSWORD_BYTES,
};

#[cfg(test)]
pub use repository::mock::MockCredentialRepository;
