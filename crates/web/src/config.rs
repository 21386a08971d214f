//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SPOONACULAR_API_KEY` - Recipe API key
//!
//! ## Optional
//! - `FORKFUL_HOST` - Bind address (default: 127.0.0.1)
//! - `FORKFUL_PORT` - Listen port (default: 3000)
//! - `FORKFUL_DATA_DIR` - Snapshot storage directory (default: ./data)
//! - `SPOONACULAR_BASE_URL` - Recipe API base URL
//!   (default: <https://api.spoonacular.com/recipes>)
//! - `SPOONACULAR_TIMEOUT_SECS` - Request timeout in seconds (default: 10)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
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

/// Forkful application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding persisted JSON snapshots
    pub data_dir: PathBuf,
    /// Recipe API configuration
    pub spoonacular: SpoonacularConfig,
}

/// Recipe API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct SpoonacularConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// API key, sent as a query parameter on every request
    pub api_key: SecretString,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SpoonacularConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoonacularConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("FORKFUL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FORKFUL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("FORKFUL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FORKFUL_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("FORKFUL_DATA_DIR", "./data"));

        let spoonacular = SpoonacularConfig::from_env()?;

        Ok(Self {
            host,
            port,
            data_dir,
            spoonacular,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SpoonacularConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default(
            "SPOONACULAR_BASE_URL",
            "https://api.spoonacular.com/recipes",
        )
        .trim_end_matches('/')
        .to_string();
        let api_key = get_validated_secret("SPOONACULAR_API_KEY")?;
        let timeout_secs = get_env_or_default("SPOONACULAR_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SPOONACULAR_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            api_key,
            timeout_secs,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

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

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_changeme() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("d80c4ea7041749cebdb437429a3bedd4", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            spoonacular: SpoonacularConfig {
                base_url: "https://api.spoonacular.com/recipes".to_string(),
                api_key: SecretString::from("key"),
                timeout_secs: 10,
            },
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_spoonacular_config_debug_redacts_key() {
        let config = SpoonacularConfig {
            base_url: "https://api.spoonacular.com/recipes".to_string(),
            api_key: SecretString::from("super_secret_api_key"),
            timeout_secs: 10,
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("api.spoonacular.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }
}
