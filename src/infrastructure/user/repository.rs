//! In-memory credential repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{Credential, CredentialRepository};
use crate::domain::DomainError;

/// In-memory implementation of CredentialRepository
#[derive(Debug, Clone)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl InMemoryCredentialRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCredentialRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<Credential>, DomainError> {
        let credentials = self.credentials.read().await;
        Ok(credentials.get(subject).cloned())
    }

    async fn save(&self, credential: Credential) -> Result<Credential, DomainError> {
        // Check and insert under one lock so concurrent registrations race safely.
        let mut credentials = self.credentials.write().await;

        if credentials.contains_key(credential.subject()) {
            return Err(DomainError::duplicate_subject(credential.subject()));
        }

        credentials.insert(credential.subject().to_string(), credential.clone());

        Ok(credential)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.credentials.read().await.len())
    }
}
