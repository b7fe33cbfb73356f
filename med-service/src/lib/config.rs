use std::env;

use auth::AuthSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub salt: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

fn default_token_ttl_minutes() -> i64 {
    AuthSettings::DEFAULT_TTL_MINUTES
}

impl AuthConfig {
    /// Reject configurations that would leave tokens or hashes unprotected.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Empty secret, empty salt or TTL outside
    ///   `1..=AuthSettings::MAX_TTL_MINUTES`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must be set".into()));
        }
        if self.salt.is_empty() {
            return Err(ConfigError::Message("auth.salt must be set".into()));
        }
        if !(1..=AuthSettings::MAX_TTL_MINUTES).contains(&self.token_ttl_minutes) {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_minutes must be between 1 and {}, got {}",
                AuthSettings::MAX_TTL_MINUTES,
                self.token_ttl_minutes
            )));
        }
        Ok(())
    }

    /// Build the settings injected into the authenticator.
    pub fn settings(&self) -> AuthSettings {
        AuthSettings::new(
            self.jwt_secret.as_bytes(),
            self.salt.as_bytes(),
            chrono::Duration::minutes(self.token_ttl_minutes),
        )
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__JWT_SECRET, AUTH__SALT, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Missing or empty auth secrets are an error: the service must not start
    /// without them.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__SALT=... overrides auth.salt
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.auth.validate()?;

        Ok(config)
    }
}
