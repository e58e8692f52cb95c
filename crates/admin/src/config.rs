//! Admin dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DOCSTORE_URL` - Base URL of the hosted document API
//! - `DOCSTORE_API_TOKEN` - Bearer token for the document API
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_REPORT_CACHE_SECS` - Order-snapshot cache TTL (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Hosted document API connection
    pub docstore: DocstoreConfig,
    /// How long a wholesale order snapshot stays fresh
    pub report_cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Hosted document API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct DocstoreConfig {
    /// Base URL of the document API
    pub url: Url,
    /// Bearer token
    pub api_token: SecretString,
}

impl std::fmt::Debug for DocstoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocstoreConfig")
            .field("url", &self.url.as_str())
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let cache_secs = get_env_or_default("ADMIN_REPORT_CACHE_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_REPORT_CACHE_SECS".to_string(), e.to_string())
            })?;

        let docstore = DocstoreConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            docstore,
            report_cache_ttl: Duration::from_secs(cache_secs),
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DocstoreConfig {
    /// Load document API settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the URL is missing/invalid or the token
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("DOCSTORE_URL")?;
        let url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("DOCSTORE_URL".to_string(), e.to_string()))?;
        let api_token = get_validated_secret("DOCSTORE_API_TOKEN")?;

        Ok(Self { url, api_token })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load a secret from environment, rejecting obvious placeholders.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    reject_placeholder(&value, key)?;
    Ok(SecretString::from(value))
}

fn reject_placeholder(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_token_rejected() {
        let result = reject_placeholder("your-api-key-here", "TEST_ADMIN_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));

        assert!(reject_placeholder("kds_7Hq2mX9fLp4Rv8Tz", "TEST_ADMIN_TOKEN").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 3001,
            docstore: DocstoreConfig {
                url: Url::parse("https://db.example.com").unwrap(),
                api_token: SecretString::from("token"),
            },
            report_cache_ttl: Duration::from_secs(30),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_docstore_config_debug_redacts_token() {
        let config = DocstoreConfig {
            url: Url::parse("https://db.example.com").unwrap(),
            api_token: SecretString::from("kds_7Hq2mX9fLp4Rv8Tz"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("db.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kds_7Hq2mX9fLp4Rv8Tz"));
    }
}
