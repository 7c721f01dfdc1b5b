//! Configuration module
//!
//! TOML file with environment variable overrides. Every section and
//! field has a default, so an empty or missing file is a valid config.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::{DatabaseConfig, JwtConfig};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "BLOG_CONFIG";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
            min_connections: defaults.min_connections,
        }
    }
}

/// Token signing and password hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub secret_key: String,
    /// HS256, HS384 or HS512
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            secret_key: jwt.secret,
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: jwt.expiration_minutes,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl SecurityConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == JwtConfig::default().secret
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// `~/.config/blog-service/config.toml` (platform equivalent elsewhere).
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("blog-service").join("config.toml"))
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config file, parse it and apply environment overrides.
    ///
    /// Lookup order: `explicit`, `$BLOG_CONFIG`, [`default_config_path`].
    /// An explicit path must exist; the others are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file(explicit) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        default_config_path().filter(|path| path.exists())
    }

    /// `DATABASE_URL` and `JWT_SECRET` win over file values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            self.security.secret_key = secret;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt_config()?;

        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::ValidationError(format!(
                "security.bcrypt_cost must be between 4 and 31, got {}",
                self.security.bcrypt_cost
            )));
        }
        if self.security.access_token_expire_minutes <= 0 {
            return Err(ConfigError::ValidationError(
                "security.access_token_expire_minutes must be positive".to_string(),
            ));
        }
        if self.database.max_connections == 0
            || self.database.min_connections > self.database.max_connections
        {
            return Err(ConfigError::ValidationError(
                "database pool sizes must satisfy 0 < min_connections <= max_connections"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> Result<JwtConfig, ConfigError> {
        let algorithm = Algorithm::from_str(&self.security.algorithm).map_err(|_| {
            ConfigError::ValidationError(format!(
                "unknown security.algorithm '{}'",
                self.security.algorithm
            ))
        })?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(ConfigError::ValidationError(format!(
                "security.algorithm must be HS256, HS384 or HS512, got {}",
                self.security.algorithm
            )));
        }
        if self.security.secret_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "security.secret_key must not be empty".to_string(),
            ));
        }

        Ok(JwtConfig {
            secret: self.security.secret_key.clone(),
            algorithm,
            expiration_minutes: self.security.access_token_expire_minutes,
        })
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
        }
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Blog service configuration
# DATABASE_URL and JWT_SECRET override the matching values below

[server]
host = "0.0.0.0"
port = 8000
shutdown_timeout = 30

[database]
url = "sqlite://./blog.db?mode=rwc"
max_connections = 10
min_connections = 1

[security]
secret_key = "change-me"
algorithm = "HS256"
access_token_expire_minutes = 30
bcrypt_cost = 12

[logging]
level = "info"
format = "text"  # text or json
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.security.access_token_expire_minutes, 30);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.security.uses_default_secret());
        config.validate().unwrap();
    }

    #[test]
    fn example_config_parses() {
        let config = AppConfig::from_toml_str(&AppConfig::example_toml()).unwrap();
        assert_eq!(config.security.secret_key, "change-me");
        assert_eq!(config.security.bcrypt_cost, 12);
        config.validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9001

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn env_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "JWT_SECRET" => Some("from-env".to_string()),
            _ => None,
        });

        assert_eq!(config.database_config().url, "sqlite::memory:");
        assert_eq!(config.jwt_config().unwrap().secret, "from-env");
        assert!(!config.security.uses_default_secret());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|_| Some(String::new()));
        assert!(config.security.uses_default_secret());
    }

    #[test]
    fn jwt_config_maps_algorithm() {
        let mut config = AppConfig::default();
        config.security.algorithm = "HS512".to_string();
        assert_eq!(config.jwt_config().unwrap().algorithm, Algorithm::HS512);

        config.security.algorithm = "RS256".to_string();
        assert!(matches!(
            config.jwt_config(),
            Err(ConfigError::ValidationError(_))
        ));

        config.security.algorithm = "nonsense".to_string();
        assert!(config.jwt_config().is_err());
    }

    #[test]
    fn out_of_range_cost_is_rejected() {
        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("[server\nport = "),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let err = AppConfig::from_file("/nonexistent/blog-service.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
