//! Shared HMAC signing secret

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::domain::DomainError;

/// Minimum secret length for HS256 (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Length of secrets produced by [`SigningSecret::generate`]
const GENERATED_SECRET_LENGTH: usize = 64;

/// Byte sequence used to both sign and verify tokens
///
/// Set once at startup and shared read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap a secret, rejecting anything shorter than [`MIN_SECRET_BYTES`]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, DomainError> {
        let bytes = bytes.into();

        if bytes.len() < MIN_SECRET_BYTES {
            return Err(DomainError::configuration(format!(
                "Signing secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                bytes.len()
            )));
        }

        Ok(Self(bytes))
    }

    /// Generate a random alphanumeric secret
    pub fn generate() -> Self {
        let secret: Vec<u8> = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_SECRET_LENGTH)
            .collect();

        Self(secret)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[hidden]").finish()
    }
}
