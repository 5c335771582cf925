//! Error types for the scenario harness.

use orrery_core::SimulationError;
use orrery_env::EnvError;
use thiserror::Error;

/// Errors raised while building or running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Simulator configuration or query failed
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Environment model failed while building a scenario
    #[error("Environment error: {0}")]
    Environment(#[from] EnvError),

    /// Runner settings are unusable
    #[error("Invalid runner setting: {0}")]
    InvalidSetting(String),

    /// Report could not be written
    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),
}

impl ScenarioError {
    /// Creates an invalid-setting error.
    pub fn invalid_setting(msg: impl Into<String>) -> Self {
        Self::InvalidSetting(msg.into())
    }
}
