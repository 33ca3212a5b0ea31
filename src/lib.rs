//! Simple Auth
//!
//! Username/password authentication issuing stateless HS256 bearer tokens:
//! - bcrypt (or Argon2) password hashing
//! - Token issuance with a fixed lifetime and signature/expiry validation
//! - A small HTTP surface for register, login and current-user lookup

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use api::state::AppState;
use domain::DomainError;
use infrastructure::{
    auth::{JwtConfig, JwtService, SigningSecret},
    user::{create_password_hasher, AuthService, InMemoryCredentialRepository},
};

/// Build the application state from configuration
pub fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let hasher = create_password_hasher(config.auth.password_hash, config.auth.bcrypt_cost)?;
    info!(algorithm = ?config.auth.password_hash, "Password hasher ready");

    let secret = resolve_signing_secret(config.auth.jwt_secret.clone())?;
    let lifetime = token_lifetime(config.auth.token_lifetime_secs)?;
    let tokens = Arc::new(JwtService::new(JwtConfig::new(secret, lifetime)));

    let repository = Arc::new(InMemoryCredentialRepository::new());

    Ok(AppState::new(AuthService::new(repository, hasher, tokens)))
}

/// Signing secret from config, then `JWT_SECRET`, then a random one
pub fn resolve_signing_secret(configured: Option<String>) -> Result<SigningSecret, DomainError> {
    let configured = configured
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()));

    match configured {
        Some(secret) => SigningSecret::new(secret),
        None => {
            warn!(
                "No auth.jwt_secret or JWT_SECRET configured. Generating random secret. \
                Tokens will NOT survive restarts."
            );
            Ok(SigningSecret::generate())
        }
    }
}

fn token_lifetime(secs: u64) -> Result<Duration, DomainError> {
    i64::try_from(secs)
        .ok()
        .filter(|s| *s > 0)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| {
            DomainError::configuration(format!("Invalid token lifetime: {} seconds", secs))
        })
}
