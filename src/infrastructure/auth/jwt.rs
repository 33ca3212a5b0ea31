//! HS256 token issuance and validation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::secret::SigningSecret;
use crate::domain::{DomainError, TokenError};

/// Default token lifetime: one hour
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Claim set carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for a subject issued at `issued_at`
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// A token is expired from the second its `exp` is reached
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Only the expiry claim, read without signature verification
#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// A freshly signed token and when it stops being valid
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[hidden]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: SigningSecret,
    pub lifetime: Duration,
}

impl JwtConfig {
    pub fn new(secret: SigningSecret, lifetime: Duration) -> Self {
        Self { secret, lifetime }
    }

    /// Configuration with the default one hour lifetime
    pub fn with_default_lifetime(secret: SigningSecret) -> Self {
        Self::new(secret, Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS))
    }
}

/// Issue and validate stateless bearer tokens
pub trait TokenService: Send + Sync + Debug {
    /// Sign a new token for `subject`
    fn issue(&self, subject: &str) -> Result<IssuedToken, DomainError>;

    /// Verify signature and expiry, returning the claims on success
    fn validate(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Like `validate`, but the token must also name `subject`
    fn validate_for(&self, token: &str, subject: &str) -> Result<TokenClaims, TokenError> {
        let claims = self.validate(token)?;

        if claims.subject() != subject {
            return Err(TokenError::SubjectMismatch);
        }

        Ok(claims)
    }

    /// Check only the `exp` claim. The signature is NOT verified, so the
    /// answer is advisory; unparseable tokens report `true`.
    fn is_expired(&self, token: &str) -> bool;

    fn lifetime(&self) -> Duration;
}

/// HS256 token service over a shared signing secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    unverified: Validation,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &Algorithm::HS256)
            .field("lifetime", &self.lifetime)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a token service reading wall-clock time
    pub fn new(config: JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a token service with an explicit time source
    pub fn with_clock(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked against the injected clock, not by the library.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let mut unverified = Validation::new(Algorithm::HS256);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;
        unverified.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key,
            decoding_key,
            validation,
            unverified,
            lifetime: config.lifetime,
            clock,
        }
    }
}

impl TokenService for JwtService {
    fn issue(&self, subject: &str) -> Result<IssuedToken, DomainError> {
        let issued_at = self.clock.now();
        let claims = TokenClaims::new(subject, issued_at, self.lifetime);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_at: issued_at + self.lifetime,
        })
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?;

        if data.claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    fn is_expired(&self, token: &str) -> bool {
        match decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &self.unverified) {
            Ok(data) => self.clock.now().timestamp() >= data.claims.exp,
            Err(_) => true,
        }
    }

    fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

/// Map library failures onto the three rejection reasons
fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        // A header naming another algorithm cannot carry our signature.
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

/// Strip the `Bearer ` scheme from an Authorization header value
pub fn strip_bearer(header_value: &str) -> Option<&str> {
    let token = header_value.trim().strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
