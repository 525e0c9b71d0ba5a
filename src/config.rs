//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use serde::Deserialize;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Failed to validate configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0),
            port: 3000,
        }
    }
}

/// What to do with a malformed element while transforming a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionPolicy {
    /// Fail the whole call with the element's error
    #[default]
    Abort,
    /// Drop the element and keep the rest
    Skip,
}

impl FromStr for CollectionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(ConfigError::InvalidValue(format!(
                "COLLECTION_POLICY must be 'abort' or 'skip', got '{}'",
                other
            ))),
        }
    }
}

/// HTTP verb the backend expects for the user activate/confirm family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitionMethod {
    #[default]
    Post,
    Patch,
}

impl FromStr for TransitionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            other => Err(ConfigError::InvalidValue(format!(
                "STATE_TRANSITION_METHOD must be 'POST' or 'PATCH', got '{}'",
                other
            ))),
        }
    }
}

/// dmdd-core backend configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BackendConfig {
    #[validate(url(message = "DMDD_API_URL must be an absolute URL"))]
    pub api_url: String,
    pub collection_policy: CollectionPolicy,
    pub transition_method: TransitionMethod,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            collection_policy: CollectionPolicy::default(),
            transition_method: TransitionMethod::default(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub cors: CorsConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let server = ServerConfig {
            host: std::env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().port),
        };

        let backend = BackendConfig {
            api_url: std::env::var("DMDD_API_URL")
                .map(|u| Self::normalize_api_url(&u))
                .unwrap_or_else(|_| BackendConfig::default().api_url),
            collection_policy: match std::env::var("COLLECTION_POLICY") {
                Ok(v) => v.parse()?,
                Err(_) => CollectionPolicy::default(),
            },
            transition_method: match std::env::var("STATE_TRANSITION_METHOD") {
                Ok(v) => v.parse()?,
                Err(_) => TransitionMethod::default(),
            },
        };
        backend.validate()?;
        Self::check_scheme(&backend.api_url)?;

        let cors = CorsConfig {
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        Ok(Self {
            server,
            backend,
            cors,
        })
    }

    /// Endpoints start with '/', so a trailing slash on the base would double it
    fn normalize_api_url(url: &str) -> String {
        url.trim().trim_end_matches('/').to_string()
    }

    fn check_scheme(api_url: &str) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(api_url)
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid DMDD_API_URL: {}", e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidValue(format!(
                "DMDD_API_URL must use http or https, got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_default_backend_config() {
        let config = BackendConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.collection_policy, CollectionPolicy::Abort);
        assert_eq!(config.transition_method, TransitionMethod::Post);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_collection_policy_parsing() {
        assert_eq!("skip".parse::<CollectionPolicy>().unwrap(), CollectionPolicy::Skip);
        assert_eq!(" Abort ".parse::<CollectionPolicy>().unwrap(), CollectionPolicy::Abort);
        assert!("partial".parse::<CollectionPolicy>().is_err());
    }

    #[test]
    fn test_transition_method_parsing() {
        assert_eq!("patch".parse::<TransitionMethod>().unwrap(), TransitionMethod::Patch);
        assert_eq!("POST".parse::<TransitionMethod>().unwrap(), TransitionMethod::Post);
        assert!("PUT".parse::<TransitionMethod>().is_err());
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        assert_eq!(
            Settings::normalize_api_url(" http://core:5000/ "),
            "http://core:5000"
        );
    }

    #[test]
    fn test_api_url_validation() {
        let config = BackendConfig {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(Settings::check_scheme("ftp://core").is_err());
        assert!(Settings::check_scheme("https://core.example.com").is_ok());
    }
}
