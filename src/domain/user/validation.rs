//! Registration input rules

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during registration input validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username cannot contain whitespace or control characters")]
    InvalidUsernameCharacter,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} bytes")]
    PasswordTooLong(usize),

    #[error("Password must contain at least one lowercase letter")]
    PasswordMissingLowercase,

    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,

    #[error("Password must contain at least one special character (@#$%^&+=!)")]
    PasswordMissingSpecial,
}

const MAX_USERNAME_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt ignores everything past its 72-byte input limit
pub const MAX_PASSWORD_BYTES: usize = 72;

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]").expect("valid regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").expect("valid regex"));
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new("[@#$%^&+=!]").expect("valid regex"));

/// Validate a username (the token subject)
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.trim().is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    if username
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UserValidationError::InvalidUsernameCharacter);
    }

    Ok(())
}

/// Validate a password against the registration policy
///
/// Rules:
/// - At least 8 characters and at most 72 bytes of UTF-8
/// - At least one lowercase and one uppercase ASCII letter
/// - At least one of `@#$%^&+=!`
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_BYTES));
    }

    if !LOWERCASE.is_match(password) {
        return Err(UserValidationError::PasswordMissingLowercase);
    }

    if !UPPERCASE.is_match(password) {
        return Err(UserValidationError::PasswordMissingUppercase);
    }

    if !SPECIAL.is_match(password) {
        return Err(UserValidationError::PasswordMissingSpecial);
    }

    Ok(())
}
