//! Registration, login and token authentication

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::user::{
    validate_password, validate_username, Credential, CredentialRepository, Identity,
};
use crate::domain::{DomainError, TokenError};
use crate::infrastructure::auth::{strip_bearer, IssuedToken, TokenService};

use super::password::PasswordHasher;

const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// Composes the credential store, the password hasher and the token service
#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn CredentialRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    /// Hash checked for unknown subjects so both login failures cost the same
    dummy_hash: Arc<OnceCell<String>>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("repository", &self.repository)
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn CredentialRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Register a new subject
    pub async fn register(&self, subject: &str, password: &str) -> Result<Identity, DomainError> {
        validate_username(subject).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.subject_exists(subject).await? {
            debug!(subject, "Registration rejected, subject exists");
            return Err(DomainError::duplicate_subject(subject));
        }

        let password_hash = self.hash_blocking(password.to_string()).await?;

        // The repository re-checks uniqueness atomically for concurrent callers.
        let credential = self
            .repository
            .save(Credential::new(subject, password_hash))
            .await?;

        info!(subject, user_id = %credential.id(), "User registered");

        Ok(credential.identity())
    }

    /// Verify a username/password pair and issue a token
    pub async fn login(&self, subject: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let credential = self.repository.find_by_subject(subject).await?;

        let hash = match &credential {
            Some(c) => c.password_hash().to_string(),
            None => self.dummy_hash_blocking().await?,
        };

        let verified = self.verify_blocking(password.to_string(), hash).await?;

        if !verified || credential.is_none() {
            debug!(subject, "Login failed");
            return Err(DomainError::InvalidCredentials);
        }

        let issued = self.tokens.issue(subject)?;
        info!(subject, expires_at = %issued.expires_at, "Token issued");

        Ok(issued)
    }

    /// Resolve a presented token to the identity it belongs to
    pub async fn authenticate(&self, token: &str) -> Result<Identity, DomainError> {
        let claims = self.tokens.validate(token).map_err(reject_token)?;

        let credential = self
            .repository
            .find_by_subject(claims.subject())
            .await?
            .ok_or_else(|| {
                warn!(subject = claims.subject(), "Valid token for unknown subject");
                DomainError::UnknownSubject
            })?;

        // The stored record, not the lookup key, must be what the token names
        self.tokens
            .validate_for(token, credential.subject())
            .map_err(reject_token)?;

        Ok(credential.identity())
    }

    /// Authenticate an `Authorization` header value of the form `Bearer <token>`
    pub async fn authenticate_bearer(&self, header_value: &str) -> Result<Identity, DomainError> {
        let token = strip_bearer(header_value).ok_or(TokenError::Malformed)?;
        self.authenticate(token).await
    }

    /// Number of registered users
    pub async fn user_count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    pub fn token_service(&self) -> &Arc<dyn TokenService> {
        &self.tokens
    }

    /// Build the hash unknown subjects are checked against, so the first
    /// failed login costs no more than later ones
    pub async fn prepare(&self) -> Result<(), DomainError> {
        self.dummy_hash_blocking().await.map(|_| ())
    }

    async fn dummy_hash_blocking(&self) -> Result<String, DomainError> {
        let hasher = self.hasher.clone();
        let dummy_hash = self.dummy_hash.clone();

        tokio::task::spawn_blocking(move || {
            dummy_hash
                .get_or_try_init(|| hasher.hash(DUMMY_PASSWORD))
                .cloned()
        })
        .await
        .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn hash_blocking(&self, password: String) -> Result<String, DomainError> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))
    }
}

fn reject_token(error: TokenError) -> DomainError {
    debug!(reason = %error, "Token rejected");
    DomainError::from(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{MockCredentialRepository, Role};
    use crate::infrastructure::auth::{JwtConfig, JwtService, ManualClock, SigningSecret};
    use crate::infrastructure::user::password::BcryptHasher;
    use crate::infrastructure::user::repository::InMemoryCredentialRepository;
    use chrono::Duration;

    const SECRET: &str = "SuperSecretKeySuperSecretKeySuperSecretKey123";

    fn jwt_service(clock: Arc<ManualClock>) -> Arc<JwtService> {
        let secret = SigningSecret::new(SECRET).unwrap();
        Arc::new(JwtService::with_clock(
            JwtConfig::with_default_lifetime(secret),
            clock,
        ))
    }

    fn create_service_with(
        repository: Arc<dyn CredentialRepository>,
    ) -> (AuthService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let hasher = Arc::new(BcryptHasher::with_cost(4).unwrap());
        let service = AuthService::new(repository, hasher, jwt_service(clock.clone()));
        (service, clock)
    }

    fn create_service() -> (AuthService, Arc<ManualClock>) {
        create_service_with(Arc::new(InMemoryCredentialRepository::new()))
    }

    #[tokio::test]
    async fn test_register_login_authenticate() {
        let (service, _) = create_service();

        let identity = service.register("alice", "Passw0rd!").await.unwrap();
        assert_eq!(identity.subject, "alice");
        assert_eq!(identity.roles, vec![Role::User]);

        let issued = service.login("alice", "Passw0rd!").await.unwrap();

        let claims = service.token_service().validate(&issued.token).unwrap();
        assert_eq!(claims.subject(), "alice");

        let resolved = service.authenticate(&issued.token).await.unwrap();
        assert_eq!(resolved, identity);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _) = create_service();
        service.register("alice", "Passw0rd!").await.unwrap();

        let result = service.login("alice", "wrongpass").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_subject() {
        let (service, _) = create_service();

        let result = service.login("nobody", "Passw0rd!").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));

        // Same outcome on the second call, once the dummy hash is cached
        let result = service.login("nobody", DUMMY_PASSWORD).await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_prepare_builds_dummy_hash() {
        let (service, _) = create_service();
        assert!(service.dummy_hash.get().is_none());

        service.prepare().await.unwrap();
        let built = service.dummy_hash.get().cloned().unwrap();
        assert!(built.starts_with("$2b$04$"));

        // Later calls reuse it
        service.prepare().await.unwrap();
        service.login("nobody", "Passw0rd!").await.unwrap_err();
        assert_eq!(service.dummy_hash.get(), Some(&built));
    }

    #[tokio::test]
    async fn test_password_past_bcrypt_limit_rejected() {
        let (service, _) = create_service();
        let prefix = format!("Aa!{}", "x".repeat(69));

        let result = service.register("alice", &format!("{}Secret1", prefix)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(service.user_count().await.unwrap(), 0);

        // A password at the limit is accepted, and only that exact password logs in
        service.register("alice", &prefix).await.unwrap();
        assert!(service.login("alice", &prefix).await.is_ok());

        let result = service
            .login("alice", &format!("{}TOTALLY-DIFFERENT", prefix))
            .await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_token_for_other_stored_subject() {
        let repository = Arc::new(MockCredentialRepository::new());
        let (service, _) = create_service_with(repository.clone());

        // A store whose lookup key differs from the subject it returns
        repository
            .insert_under("alice", Credential::new("mallory", "$2b$04$hash"))
            .await;
        let issued = service.token_service().issue("alice").unwrap();

        let result = service.authenticate(&issued.token).await;
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::SubjectMismatch))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let (service, _) = create_service();

        service.register("alice", "Passw0rd!").await.unwrap();
        let result = service.register("alice", "Other0ne!").await;

        assert!(matches!(
            result,
            Err(DomainError::DuplicateSubject { ref subject }) if subject == "alice"
        ));

        // The original password still works
        assert!(service.login("alice", "Passw0rd!").await.is_ok());
        assert!(service.login("alice", "Other0ne!").await.is_err());
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (service, _) = create_service();

        let result = service.register("", "Passw0rd!").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.register("alice", "weak").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        assert_eq!(service.user_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let repository = Arc::new(InMemoryCredentialRepository::new());
        let (service, _) = create_service_with(repository.clone());

        service.register("alice", "Passw0rd!").await.unwrap();

        let stored = repository.find_by_subject("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash(), "Passw0rd!");
        assert!(stored.password_hash().starts_with("$2b$"));
    }

    #[tokio::test]
    async fn test_authenticate_expired_token() {
        let (service, clock) = create_service();
        service.register("alice", "Passw0rd!").await.unwrap();
        let issued = service.login("alice", "Passw0rd!").await.unwrap();

        clock.advance(Duration::hours(1));

        let result = service.authenticate(&issued.token).await;
        assert!(matches!(result, Err(DomainError::Token(TokenError::Expired))));
    }

    #[tokio::test]
    async fn test_authenticate_garbage_token() {
        let (service, _) = create_service();

        let result = service.authenticate("not-a-token").await;
        assert!(matches!(result, Err(DomainError::Token(TokenError::Malformed))));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_subject() {
        let repository = Arc::new(MockCredentialRepository::new());
        let (service, _) = create_service_with(repository.clone());

        service.register("alice", "Passw0rd!").await.unwrap();
        let issued = service.login("alice", "Passw0rd!").await.unwrap();

        repository.remove("alice").await;

        let result = service.authenticate(&issued.token).await;
        assert!(matches!(result, Err(DomainError::UnknownSubject)));
    }

    #[tokio::test]
    async fn test_authenticate_bearer() {
        let (service, _) = create_service();
        service.register("alice", "Passw0rd!").await.unwrap();
        let issued = service.login("alice", "Passw0rd!").await.unwrap();

        let identity = service
            .authenticate_bearer(&format!("Bearer {}", issued.token))
            .await
            .unwrap();
        assert_eq!(identity.subject, "alice");

        let result = service.authenticate_bearer(&issued.token).await;
        assert!(matches!(result, Err(DomainError::Token(TokenError::Malformed))));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let repository = Arc::new(MockCredentialRepository::new());
        let (service, _) = create_service_with(repository.clone());

        repository.set_should_fail(true).await;

        let result = service.login("alice", "Passw0rd!").await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));

        let result = service.register("alice", "Passw0rd!").await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_tokens_per_login_are_independent() {
        let (service, clock) = create_service();
        service.register("alice", "Passw0rd!").await.unwrap();

        let first = service.login("alice", "Passw0rd!").await.unwrap();
        clock.advance(Duration::minutes(30));
        let second = service.login("alice", "Passw0rd!").await.unwrap();

        assert_ne!(first.token, second.token);

        clock.advance(Duration::minutes(30));
        assert!(service.authenticate(&first.token).await.is_err());
        assert!(service.authenticate(&second.token).await.is_ok());
    }
}
