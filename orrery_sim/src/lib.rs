//! Orrery Scenario Harness
//!
//! Builds mission scenarios, steps the simulator through time and records
//! when each sensor field of view has access to a celestial target.
//!
//! # Usage
//!
//! ```ignore
//! use orrery_sim::{scenarios, Runner, RunnerConfig, ScenarioId};
//! use orrery_core::Simulator;
//!
//! let config = scenarios::build(ScenarioId::LoftSat, epoch)?;
//! let simulator = Simulator::configure(config)?;
//!
//! let summary = Runner::new(RunnerConfig::default()).run(&simulator)?;
//! for window in &summary.windows {
//!     println!("{} -> {}: {} s", window.component, window.target, window.duration_secs());
//! }
//! ```

pub mod error;
pub mod exporter;
pub mod runner;
pub mod scenarios;

pub use error::ScenarioError;
pub use exporter::AccessReport;
pub use runner::{AccessWindow, RunSummary, Runner, RunnerConfig};
pub use scenarios::ScenarioId;
