//! JSON exporter for access reports.

use crate::runner::{AccessWindow, RunSummary};
use crate::scenarios::ScenarioId;
use orrery_env::Instant;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// Complete record of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessReport {
    /// Scenario name
    pub scenario: String,

    /// Instant of the first sample
    pub epoch: Instant,

    /// Instant of the last sample
    pub end: Instant,

    /// Sampling step in seconds
    pub step_secs: f64,

    /// Number of samples taken
    pub samples: usize,

    /// Access windows, in start order
    pub windows: Vec<AccessWindow>,
}

impl AccessReport {
    /// Creates a report from a run summary.
    pub fn new(scenario: ScenarioId, step_secs: f64, summary: RunSummary) -> Self {
        Self {
            scenario: scenario.name().to_string(),
            epoch: summary.start,
            end: summary.end,
            step_secs,
            samples: summary.samples,
            windows: summary.windows,
        }
    }

    /// Total access time per target, in seconds.
    pub fn access_time_secs(&self, target: &str) -> f64 {
        self.windows
            .iter()
            .filter(|w| w.target == target)
            .map(AccessWindow::duration_secs)
            .sum()
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orrery_env::seconds;

    fn report() -> AccessReport {
        let start = Instant::from_datetime(2020, 1, 1, 0, 0, 0.0).unwrap();
        let window = |target: &str, offset: f64, length: f64| AccessWindow {
            satellite: "LoftSat-1".to_string(),
            component: "Camera".to_string(),
            geometry: "FOV".to_string(),
            target: target.to_string(),
            start: start + seconds(offset).unwrap(),
            end: start + seconds(offset + length).unwrap(),
        };

        AccessReport::new(
            ScenarioId::LoftSat,
            30.0,
            RunSummary {
                start,
                end: start + seconds(600.0).unwrap(),
                samples: 21,
                windows: vec![window("Earth", 0.0, 600.0), window("Moon", 60.0, 90.0)],
            },
        )
    }

    #[test]
    fn test_access_time_per_target() {
        let report = report();
        assert_relative_eq!(report.access_time_secs("Earth"), 600.0, epsilon = 1e-9);
        assert_relative_eq!(report.access_time_secs("Moon"), 90.0, epsilon = 1e-9);
        assert_eq!(report.access_time_secs("Sun"), 0.0);
    }

    #[test]
    fn test_json_fields() {
        let json = serde_json::to_value(report()).unwrap();

        assert_eq!(json["scenario"], "loft_sat");
        assert_eq!(json["samples"], 21);
        assert_eq!(json["windows"][1]["target"], "Moon");
        assert_eq!(json["epoch"], "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join("orrery_access_report_test.json");
        let path = path.to_string_lossy().to_string();

        report().write_to_file(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: AccessReport = serde_json::from_str(&written).unwrap();

        assert_eq!(parsed.windows.len(), 2);
        std::fs::remove_file(&path).unwrap();
    }
}
