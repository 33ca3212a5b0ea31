use thiserror::Error;

/// Reasons a presented token is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token subject does not match")]
    SubjectMismatch,
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Subject already registered: {subject}")]
    DuplicateSubject { subject: String },

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    #[error("Token subject no longer exists")]
    UnknownSubject,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn duplicate_subject(subject: impl Into<String>) -> Self {
        Self::DuplicateSubject {
            subject: subject.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for every outcome that means "the caller is not authenticated"
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::Token(_) | Self::UnknownSubject
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_subject_error() {
        let error = DomainError::duplicate_subject("alice");
        assert_eq!(error.to_string(), "Subject already registered: alice");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Password is too short");
        assert_eq!(error.to_string(), "Validation error: Password is too short");
    }

    #[test]
    fn test_token_error_conversion() {
        let error: DomainError = TokenError::Expired.into();
        assert!(matches!(error, DomainError::Token(TokenError::Expired)));
        assert_eq!(error.to_string(), "Token rejected: Token has expired");
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(DomainError::InvalidCredentials.is_unauthorized());
        assert!(DomainError::UnknownSubject.is_unauthorized());
        assert!(DomainError::from(TokenError::Malformed).is_unauthorized());
        assert!(!DomainError::duplicate_subject("bob").is_unauthorized());
        assert!(!DomainError::storage("down").is_unauthorized());
    }
}
