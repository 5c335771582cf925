//! Configuration objects consumed once to build the runtime tree.

use crate::component::ComponentKind;
use crate::simulator::SharedEnvironment;
use nalgebra::UnitQuaternion;
use orrery_env::{Composite, Instant, Profile};
use std::sync::Arc;

// ============================================================================
// SIMULATOR
// ============================================================================

/// Configuration for a simulation.
#[derive(Debug, Clone)]
pub struct SimulatorConfiguration {
    /// Environment shared with every clone of the handle
    pub environment: SharedEnvironment,

    /// Satellites to materialize
    pub satellites: Vec<SatelliteConfiguration>,

    /// Overrides the environment instant when present
    pub instant: Option<Instant>,
}

impl SimulatorConfiguration {
    pub fn new(environment: SharedEnvironment) -> Self {
        Self {
            environment,
            satellites: Vec::new(),
            instant: None,
        }
    }

    pub fn with_satellite(mut self, satellite: SatelliteConfiguration) -> Self {
        self.satellites.push(satellite);
        self
    }

    pub fn with_instant(mut self, instant: Instant) -> Self {
        self.instant = Some(instant);
        self
    }
}

// ============================================================================
// SATELLITE
// ============================================================================

/// Configuration for a satellite.
#[derive(Debug, Clone)]
pub struct SatelliteConfiguration {
    /// UUID, unique within a simulation
    pub id: String,

    /// Name, unique within a simulation
    pub name: String,

    pub tags: Vec<String>,

    /// Position and attitude over time
    pub profile: Arc<dyn Profile>,

    pub components: Vec<ComponentConfiguration>,

    /// Shapes expressed in the satellite body frame
    pub geometries: Vec<GeometryConfiguration>,
}

impl SatelliteConfiguration {
    pub fn new(id: impl Into<String>, name: impl Into<String>, profile: Arc<dyn Profile>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: Vec::new(),
            profile,
            components: Vec::new(),
            geometries: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_component(mut self, component: ComponentConfiguration) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_geometry(mut self, geometry: GeometryConfiguration) -> Self {
        self.geometries.push(geometry);
        self
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Configuration for a component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentConfiguration {
    /// Generated when empty
    pub id: String,

    pub name: String,

    pub kind: ComponentKind,

    pub tags: Vec<String>,

    /// Rotation of the component frame relative to its parent frame
    pub orientation: UnitQuaternion<f64>,

    pub geometries: Vec<GeometryConfiguration>,

    pub components: Vec<ComponentConfiguration>,
}

impl ComponentConfiguration {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ComponentKind::Undefined,
            tags: Vec::new(),
            orientation: UnitQuaternion::identity(),
            geometries: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_orientation(mut self, orientation: UnitQuaternion<f64>) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_geometry(mut self, geometry: GeometryConfiguration) -> Self {
        self.geometries.push(geometry);
        self
    }

    pub fn with_component(mut self, component: ComponentConfiguration) -> Self {
        self.components.push(component);
        self
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Configuration for a named shape in its owner's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryConfiguration {
    pub name: String,
    pub composite: Composite,
}

impl GeometryConfiguration {
    pub fn new(name: impl Into<String>, composite: impl Into<Composite>) -> Self {
        Self {
            name: name.into(),
            composite: composite.into(),
        }
    }
}
