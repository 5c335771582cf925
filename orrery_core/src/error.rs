//! Error types for the simulation engine.

use orrery_env::EnvError;
use thiserror::Error;

/// Errors raised while configuring or querying a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Unknown satellite, component, geometry, celestial object or path
    #[error("No {kind} found with name [{name}]")]
    NotFound { kind: &'static str, name: String },

    /// Id or name collision
    #[error("Duplicate {kind} [{key}]")]
    DuplicateKey { kind: &'static str, key: String },

    /// Operation on an undefined simulator or satellite
    #[error("{0} is undefined")]
    UndefinedState(&'static str),

    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by the environment layer
    #[error("Environment error: {0}")]
    Environment(EnvError),
}

impl SimulationError {
    /// Creates a not-found error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Creates a duplicate-key error.
    pub fn duplicate(kind: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<EnvError> for SimulationError {
    fn from(error: EnvError) -> Self {
        match error {
            EnvError::NotFound { kind, name } => Self::NotFound { kind, name },
            other => Self::Environment(other),
        }
    }
}

/// Result alias used throughout the engine.
pub type SimResult<T> = Result<T, SimulationError>;
