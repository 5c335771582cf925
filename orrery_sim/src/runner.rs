//! Scenario runner - steps a simulator and records sensor access windows.

use crate::error::ScenarioError;
use orrery_core::{Component, ComponentHolder, ComponentKind, Geometry, Simulator};
use orrery_env::{seconds, Celestial, Instant};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Upper bound on the number of steps of a single run.
const MAX_STEPS: f64 = 10_000_000.0;

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Simulated span in seconds
    pub duration_secs: f64,

    /// Sampling step in seconds
    pub step_secs: f64,

    /// Celestial objects tested against every sensor geometry
    pub targets: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            duration_secs: 5_700.0, // about one orbit at 500 km
            step_secs: 30.0,
            targets: vec!["Earth".to_string()],
        }
    }
}

/// Interval during which a sensor geometry intersects a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessWindow {
    pub satellite: String,

    /// Component path from the satellite root (`Gimbal/Camera`)
    pub component: String,

    pub geometry: String,
    pub target: String,

    /// First sample with access
    pub start: Instant,

    /// Last sample with access
    pub end: Instant,
}

impl AccessWindow {
    pub fn duration_secs(&self) -> f64 {
        self.end.seconds_since(&self.start)
    }
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub start: Instant,
    pub end: Instant,
    pub samples: usize,
    pub windows: Vec<AccessWindow>,
}

/// A sensor geometry to sample.
struct Probe<'a> {
    satellite: String,
    component: String,
    geometry: &'a Geometry,
}

/// Steps a simulator at a fixed rate.
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    /// Creates a new runner.
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Sets the simulated span.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.config.duration_secs = secs;
        self
    }

    /// Sets the sampling step.
    pub fn with_step(mut self, secs: f64) -> Self {
        self.config.step_secs = secs;
        self
    }

    /// Sets the targets.
    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.config.targets = targets;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Samples every sensor geometry against every target from the current
    /// instant, leaving the simulator at the last sample.
    pub fn run(&self, simulator: &Simulator) -> Result<RunSummary, ScenarioError> {
        if !(self.config.step_secs > 0.0) {
            return Err(ScenarioError::invalid_setting(format!(
                "step must be positive, got {}",
                self.config.step_secs
            )));
        }
        if !(self.config.duration_secs >= 0.0) {
            return Err(ScenarioError::invalid_setting(format!(
                "duration must not be negative, got {}",
                self.config.duration_secs
            )));
        }

        let ratio = (self.config.duration_secs / self.config.step_secs).floor();
        if !ratio.is_finite() || ratio > MAX_STEPS {
            return Err(ScenarioError::invalid_setting(format!(
                "{} s in steps of {} s exceeds {} steps",
                self.config.duration_secs, self.config.step_secs, MAX_STEPS
            )));
        }
        let steps = ratio as usize;

        let targets: Vec<Celestial> = self
            .config
            .targets
            .iter()
            .map(|name| simulator.access_celestial_object_with_name(name))
            .collect::<Result<_, _>>()?;
        let probes = collect_probes(simulator)?;

        let start = simulator.get_instant()?;
        info!(
            "Sampling {} sensor geometries against {} targets, {} steps of {} s",
            probes.len(),
            targets.len(),
            steps,
            self.config.step_secs
        );

        let mut open: HashMap<(usize, usize), (Instant, Instant)> = HashMap::new();
        let mut windows = Vec::new();

        for step in 0..=steps {
            if step > 0 {
                simulator.step_forward(seconds(self.config.step_secs)?)?;
            }
            let now = simulator.get_instant()?;

            for (p, probe) in probes.iter().enumerate() {
                for (t, target) in targets.iter().enumerate() {
                    let key = (p, t);
                    let visible = probe.geometry.intersects(simulator, target)?;

                    if visible {
                        if let Some(span) = open.get_mut(&key) {
                            span.1 = now;
                        } else {
                            debug!(
                                "{}/{} acquires {} at {}",
                                probe.satellite,
                                probe.component,
                                target.name(),
                                now
                            );
                            open.insert(key, (now, now));
                        }
                    } else if let Some((first, last)) = open.remove(&key) {
                        debug!("{}/{} loses {} at {}", probe.satellite, probe.component, target.name(), now);
                        windows.push(window(probe, target, first, last));
                    }
                }
            }
        }

        let mut still_open: Vec<_> = open.into_iter().collect();
        still_open.sort_by_key(|(key, _)| *key);
        for ((p, t), (first, last)) in still_open {
            windows.push(window(&probes[p], &targets[t], first, last));
        }
        windows.sort_by(|a, b| {
            (a.start, &a.satellite, &a.component, &a.target).cmp(&(
                b.start,
                &b.satellite,
                &b.component,
                &b.target,
            ))
        });

        let end = simulator.get_instant()?;
        info!("Recorded {} access windows until {}", windows.len(), end);

        Ok(RunSummary {
            start,
            end,
            samples: steps + 1,
            windows,
        })
    }
}

fn window(probe: &Probe<'_>, target: &Celestial, start: Instant, end: Instant) -> AccessWindow {
    AccessWindow {
        satellite: probe.satellite.clone(),
        component: probe.component.clone(),
        geometry: probe.geometry.name().to_string(),
        target: target.name().to_string(),
        start,
        end,
    }
}

/// Every geometry of every sensor component, satellites in name order.
fn collect_probes(simulator: &Simulator) -> Result<Vec<Probe<'_>>, ScenarioError> {
    let mut names: Vec<&String> = simulator.access_satellite_map()?.keys().collect();
    names.sort();

    let mut probes = Vec::new();
    for name in names {
        let satellite = simulator.access_satellite_with_name(name)?;
        collect_sensor_geometries(name, satellite.access_components()?, &mut probes)?;
    }
    Ok(probes)
}

fn collect_sensor_geometries<'a>(
    satellite: &str,
    components: &'a [Component],
    probes: &mut Vec<Probe<'a>>,
) -> Result<(), ScenarioError> {
    for component in components {
        if component.kind() == ComponentKind::Sensor {
            let path = component.mount().path().join("/");
            for geometry in component.access_geometries() {
                probes.push(Probe {
                    satellite: satellite.to_string(),
                    component: path.clone(),
                    geometry,
                });
            }
        }
        collect_sensor_geometries(satellite, component.access_components()?, probes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{self, ScenarioId};
    use approx::assert_relative_eq;
    use orrery_core::SimulationError;

    fn simulator(scenario: ScenarioId) -> Simulator {
        let epoch = Instant::from_datetime(2020, 1, 1, 0, 0, 0.0).unwrap();
        Simulator::configure(scenarios::build(scenario, epoch).unwrap()).unwrap()
    }

    #[test]
    fn test_nadir_camera_sees_earth_throughout() {
        let simulator = simulator(ScenarioId::LoftSat);
        let runner = Runner::new(RunnerConfig::default())
            .with_duration(600.0)
            .with_step(60.0);

        let summary = runner.run(&simulator).unwrap();

        assert_eq!(summary.samples, 11);
        assert_eq!(summary.windows.len(), 1);
        let window = &summary.windows[0];
        assert_eq!(window.component, "Camera");
        assert_eq!(window.geometry, "FOV");
        assert_eq!(window.start, summary.start);
        assert_eq!(window.end, summary.end);
        assert_relative_eq!(window.duration_secs(), 600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zenith_star_tracker_never_sees_earth() {
        let simulator = simulator(ScenarioId::OffNadir);
        let summary = Runner::new(RunnerConfig::default())
            .with_duration(300.0)
            .with_step(60.0)
            .run(&simulator)
            .unwrap();

        assert!(summary.windows.iter().all(|w| w.component != "StarTracker"));
        assert!(summary.windows.iter().any(|w| w.component == "Gimbal/Camera"));
    }

    #[test]
    fn test_constellation_has_one_window_per_satellite() {
        let simulator = simulator(ScenarioId::Constellation);
        let summary = Runner::new(RunnerConfig::default())
            .with_duration(120.0)
            .with_step(60.0)
            .run(&simulator)
            .unwrap();

        let satellites: Vec<_> = summary.windows.iter().map(|w| w.satellite.as_str()).collect();
        assert_eq!(satellites, vec!["Loft-1", "Loft-2", "Loft-3"]);
    }

    #[test]
    fn test_unknown_target() {
        let simulator = simulator(ScenarioId::LoftSat);
        let result = Runner::new(RunnerConfig::default())
            .with_targets(vec!["Mars".to_string()])
            .run(&simulator);

        assert!(matches!(
            result,
            Err(ScenarioError::Simulation(SimulationError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let simulator = simulator(ScenarioId::LoftSat);
        let result = Runner::new(RunnerConfig::default()).with_step(0.0).run(&simulator);

        assert!(matches!(result, Err(ScenarioError::InvalidSetting(_))));
    }

    #[test]
    fn test_rejects_unbounded_step_count() {
        let simulator = simulator(ScenarioId::LoftSat);
        let start = simulator.get_instant().unwrap();

        let tiny = Runner::new(RunnerConfig::default()).with_step(1e-300).run(&simulator);
        assert!(matches!(tiny, Err(ScenarioError::InvalidSetting(_))));

        let endless = Runner::new(RunnerConfig::default())
            .with_duration(f64::INFINITY)
            .run(&simulator);
        assert!(matches!(endless, Err(ScenarioError::InvalidSetting(_))));

        assert_eq!(simulator.get_instant().unwrap(), start);
    }
}
