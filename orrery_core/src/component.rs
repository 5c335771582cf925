//! Components: typed nodes of the satellite tree.

use crate::configuration::ComponentConfiguration;
use crate::error::{SimResult, SimulationError};
use crate::geometry::Geometry;
use crate::holder::{ComponentHolder, Mount};
use crate::identifier;
use crate::simulator::Simulator;
use nalgebra::UnitQuaternion;
use orrery_env::{Composite, Frame};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Undefined,
    Assembly,
    Controller,
    Sensor,
    Actuator,
    Other,
}

impl ComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Undefined => "Undefined",
            ComponentKind::Assembly => "Assembly",
            ComponentKind::Controller => "Controller",
            ComponentKind::Sensor => "Sensor",
            ComponentKind::Actuator => "Actuator",
            ComponentKind::Other => "Other",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "undefined" => Ok(ComponentKind::Undefined),
            "assembly" => Ok(ComponentKind::Assembly),
            "controller" => Ok(ComponentKind::Controller),
            "sensor" => Ok(ComponentKind::Sensor),
            "actuator" => Ok(ComponentKind::Actuator),
            "other" => Ok(ComponentKind::Other),
            _ => Err(format!("Unknown component kind: {}", s)),
        }
    }
}

/// A node of the satellite tree owning geometries and sub-components.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: String,
    name: String,
    kind: ComponentKind,
    tags: Vec<String>,
    orientation: UnitQuaternion<f64>,
    geometries: Vec<Geometry>,
    components: Vec<Component>,
    mount: Mount,
}

impl Component {
    /// Builds a component (and its subtree) under the owner at `parent`.
    ///
    /// An empty id is replaced by a generated UUID.
    pub fn configure(config: &ComponentConfiguration, parent: &Mount) -> SimResult<Self> {
        if config.name.is_empty() {
            return Err(SimulationError::configuration(format!(
                "component name is empty (owner [{}])",
                parent
            )));
        }

        let id = if config.id.is_empty() {
            identifier::generate()
        } else {
            config.id.clone()
        };
        let mount = parent.child(config.name.as_str());

        let mut geometries: Vec<Geometry> = Vec::with_capacity(config.geometries.len());
        for geometry_config in &config.geometries {
            if geometries.iter().any(|g| g.name() == geometry_config.name) {
                return Err(SimulationError::duplicate("geometry", geometry_config.name.as_str()));
            }
            geometries.push(Geometry::configure(geometry_config, mount.clone())?);
        }

        let mut components: Vec<Component> = Vec::with_capacity(config.components.len());
        for child_config in &config.components {
            if components.iter().any(|c| c.name() == child_config.name) {
                return Err(SimulationError::duplicate("component", child_config.name.as_str()));
            }
            components.push(Component::configure(child_config, &mount)?);
        }

        Ok(Self {
            id,
            name: config.name.clone(),
            kind: config.kind,
            tags: config.tags.clone(),
            orientation: config.orientation,
            geometries,
            components,
            mount,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Rotation of this component frame relative to its parent frame.
    pub fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.orientation
    }

    /// Position of this component in its satellite tree.
    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn access_geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn access_geometry_with_name(&self, name: &str) -> SimResult<&Geometry> {
        self.geometries
            .iter()
            .find(|g| g.name() == name)
            .ok_or_else(|| SimulationError::not_found("geometry", name))
    }

    pub fn has_geometry_with_name(&self, name: &str) -> bool {
        self.geometries.iter().any(|g| g.name() == name)
    }

    /// All geometries merged into one composite, in the component frame.
    pub fn access_composite(&self) -> Composite {
        self.geometries.iter().fold(Composite::empty(), |mut acc, g| {
            acc.merge(g.access_composite().clone());
            acc
        })
    }

    /// Component frame at the simulator instant.
    pub fn access_frame(&self, simulator: &Simulator) -> SimResult<Frame> {
        simulator.resolve_frame(&self.mount)
    }

    pub(crate) fn children(&self) -> &[Component] {
        &self.components
    }
}

impl ComponentHolder for Component {
    fn access_components(&self) -> SimResult<&[Component]> {
        Ok(&self.components)
    }
}
