//! Credential repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Credential;
use crate::domain::DomainError;

/// Storage for registered credentials, keyed by subject
#[async_trait]
pub trait CredentialRepository: Send + Sync + Debug {
    /// Look up the credential registered for a subject
    async fn find_by_subject(&self, subject: &str) -> Result<Option<Credential>, DomainError>;

    /// Persist a new credential
    ///
    /// Fails with `DomainError::DuplicateSubject` if the subject is taken.
    async fn save(&self, credential: Credential) -> Result<Credential, DomainError>;

    /// Number of registered credentials
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a subject is registered
    async fn subject_exists(&self, subject: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_subject(subject).await?.is_some())
    }
}
