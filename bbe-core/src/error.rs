//! Error types for the gateway

use thiserror::Error;

/// Gateway-wide error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A required setting (e.g. the results credential) is missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// The upstream call did not complete within its deadline
    #[error("Upstream timeout: {0}")]
    Timeout(String),

    /// Transport failure or non-success status from an upstream
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Caller input rejected before any outbound call
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prediction unavailable: {0}")]
    PredictionUnavailable(String),

    #[error("Simulation unavailable: {0}")]
    SimulationUnavailable(String),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Config(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        EngineError::Timeout(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        EngineError::Unavailable(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        EngineError::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    pub fn prediction_unavailable(msg: impl Into<String>) -> Self {
        EngineError::PredictionUnavailable(msg.into())
    }

    pub fn simulation_unavailable(msg: impl Into<String>) -> Self {
        EngineError::SimulationUnavailable(msg.into())
    }

    /// Whether the error was raised before any outbound call was made
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

/// Result type alias for gateway operations
pub type EngineResult<T> = Result<T, EngineError>;
