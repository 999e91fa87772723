//! Server configuration loaded from the environment

use bbe_matchpoint::DEFAULT_PREDICTION_TIMEOUT;
use bbe_tba::{DEFAULT_RESULTS_TIMEOUT, TBA_API_BASE};
use std::env;
use std::time::Duration;

const DEFAULT_GRPC_ADDRESS: &str = "http://localhost:50051";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TBA API key; results enrichment is disabled without it
    pub tba_api_key: Option<String>,
    pub tba_base_url: String,
    /// Matchpoint gRPC endpoint, always with a scheme
    pub grpc_address: String,
    pub port: u16,
    pub prediction_timeout: Duration,
    pub results_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - TBA_API_KEY (optional)
    /// - TBA_BASE_URL
    /// - GRPC_SERVER_ADDRESS
    /// - SERVER_PORT
    /// - PREDICTION_TIMEOUT_SECS, RESULTS_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let grpc_address = var("GRPC_SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_GRPC_ADDRESS.to_string());
        let grpc_address = if grpc_address.contains("://") {
            grpc_address
        } else {
            format!("http://{}", grpc_address)
        };

        Ok(Self {
            tba_api_key: var("TBA_API_KEY"),
            tba_base_url: var("TBA_BASE_URL").unwrap_or_else(|| TBA_API_BASE.to_string()),
            grpc_address,
            port: parse_or("SERVER_PORT", var("SERVER_PORT"), DEFAULT_PORT)?,
            prediction_timeout: parse_or(
                "PREDICTION_TIMEOUT_SECS",
                var("PREDICTION_TIMEOUT_SECS"),
                DEFAULT_PREDICTION_TIMEOUT.as_secs(),
            )
            .map(Duration::from_secs)?,
            results_timeout: parse_or(
                "RESULTS_TIMEOUT_SECS",
                var("RESULTS_TIMEOUT_SECS"),
                DEFAULT_RESULTS_TIMEOUT.as_secs(),
            )
            .map(Duration::from_secs)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    field: &str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            field: field.to_string(),
            value: raw,
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid number in {field}: {value}")]
    InvalidNumber { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.tba_api_key.is_none());
        assert_eq!(config.tba_base_url, TBA_API_BASE);
        assert_eq!(config.grpc_address, "http://localhost:50051");
        assert_eq!(config.port, 8080);
        assert_eq!(config.prediction_timeout, Duration::from_secs(30));
        assert_eq!(config.results_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_key_is_absent() {
        let config = load(&[("TBA_API_KEY", "  ")]).unwrap();
        assert!(config.tba_api_key.is_none());
    }

    #[test]
    fn test_bare_grpc_address_gets_scheme() {
        let config = load(&[("GRPC_SERVER_ADDRESS", "matchpoint:50051")]).unwrap();
        assert_eq!(config.grpc_address, "http://matchpoint:50051");
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("TBA_API_KEY", "secret"),
            ("SERVER_PORT", "3001"),
            ("RESULTS_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.tba_api_key.as_deref(), Some("secret"));
        assert_eq!(config.port, 3001);
        assert_eq!(config.results_timeout, Duration::from_secs(5));
    }
}
