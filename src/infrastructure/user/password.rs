//! Password hashing using bcrypt (default) or Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use std::fmt::Debug;
use std::sync::Arc;

use crate::config::PasswordHashAlgorithm;
use crate::domain::user::MAX_PASSWORD_BYTES;
use crate::domain::DomainError;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// bcrypt-based password hasher
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a bcrypt hasher with the default cost
    pub fn new() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Create a bcrypt hasher with an explicit cost (4..=31)
    pub fn with_cost(cost: u32) -> Result<Self, DomainError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(DomainError::configuration(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, cost
            )));
        }

        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        // Longer input would be silently truncated
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::validation(format!(
                "Password exceeds maximum length of {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

/// Argon2-based password hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Build the configured hasher
pub fn create_password_hasher(
    algorithm: PasswordHashAlgorithm,
    bcrypt_cost: u32,
) -> Result<Arc<dyn PasswordHasher>, DomainError> {
    match algorithm {
        PasswordHashAlgorithm::Bcrypt => Ok(Arc::new(BcryptHasher::with_cost(bcrypt_cost)?)),
        PasswordHashAlgorithm::Argon2 => Ok(Arc::new(Argon2Hasher::new())),
    }
}
