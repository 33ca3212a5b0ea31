//! Authentication infrastructure module
//!
//! This module provides stateless HS256 bearer tokens for user authentication.

mod clock;
mod jwt;
mod secret;

pub use clock::{Clock, ManualClock, SystemClock};
pub use jwt::{
    strip_bearer, IssuedToken, JwtConfig, JwtService, TokenClaims, TokenService,
    DEFAULT_TOKEN_LIFETIME_SECS,
};
pub use secret::{SigningSecret, MIN_SECRET_BYTES};
