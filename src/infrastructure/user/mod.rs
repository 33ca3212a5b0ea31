//! User infrastructure module
//!
//! This module provides implementations for user authentication,
//! including password hashing, an in-memory credential store, and the
//! service that ties registration, login and token checks together.

mod password;
mod repository;
mod service;

pub use password::{
    create_password_hasher, Argon2Hasher, BcryptHasher, PasswordHasher, DEFAULT_BCRYPT_COST,
};
pub use repository::InMemoryCredentialRepository;
pub use service::AuthService;
