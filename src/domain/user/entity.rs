//! Credential entity and the identity resolved from it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identifier assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role granted to an authenticated identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
        }
    }
}

/// Stored credential for one subject
///
/// The password hash is set once at registration and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    id: UserId,
    subject: String,
    #[serde(skip_serializing)]
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new credential from an already hashed password
    pub fn new(subject: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            subject: subject.into(),
            password_hash: password_hash.into(),
            role: Role::default(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Public view of this credential, without the hash
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            subject: self.subject.clone(),
            roles: vec![self.role],
        }
    }
}

/// Authenticated identity handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub subject: String,
    pub roles: Vec<Role>,
}
