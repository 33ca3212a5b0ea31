use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Algorithm used to hash stored passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PasswordHashAlgorithm {
    #[default]
    Bcrypt,
    Argon2,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret; falls back to `JWT_SECRET`, then a random secret
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Token lifetime in seconds
    #[serde(default = "default_token_lifetime_secs")]
    pub token_lifetime_secs: u64,
    #[serde(default)]
    pub password_hash: PasswordHashAlgorithm,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_token_lifetime_secs() -> u64 {
    3600
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[hidden]"))
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("password_hash", &self.password_hash)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_lifetime_secs: default_token_lifetime_secs(),
            password_hash: PasswordHashAlgorithm::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.auth.jwt_secret.is_none());
        assert_eq!(config.auth.token_lifetime_secs, 3600);
        assert_eq!(config.auth.password_hash, PasswordHashAlgorithm::Bcrypt);
        assert_eq!(config.auth.bcrypt_cost, 10);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.token_lifetime_secs, 3600);
    }

    #[test]
    fn test_partial_server_section() {
        let config = from_toml("[server]\nport = 9000\n");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_partial_logging_section() {
        let config = from_toml("[logging]\nformat = \"json\"\n");

        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_auth_section() {
        let config = from_toml(
            r#"
            [auth]
            jwt_secret = "0123456789abcdef0123456789abcdef"
            token_lifetime_secs = 600
            password_hash = "argon2"
            "#,
        );

        assert_eq!(config.auth.token_lifetime_secs, 600);
        assert_eq!(config.auth.password_hash, PasswordHashAlgorithm::Argon2);
        assert_eq!(config.auth.bcrypt_cost, 10);
    }

    #[test]
    fn test_debug_hides_secret() {
        let mut config = AuthConfig::default();
        config.jwt_secret = Some("very-secret-value".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret-value"));
    }
}
