//! Satellites: a profile plus a tree of components.

use crate::component::Component;
use crate::configuration::SatelliteConfiguration;
use crate::error::{SimResult, SimulationError};
use crate::geometry::Geometry;
use crate::holder::{ComponentHolder, Mount};
use crate::identifier;
use orrery_env::{Frame, Instant, Profile, ProfileTransform, State};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A satellite of the simulation.
///
/// The undefined sentinel ([`Satellite::undefined`]) fails every operation
/// except [`Satellite::is_defined`].
#[derive(Debug, Clone)]
pub struct Satellite {
    id: String,
    name: String,
    tags: Vec<String>,
    profile: Option<Arc<dyn Profile>>,
    components: Vec<Component>,
    geometries: Vec<Geometry>,
}

impl Satellite {
    /// Builds a satellite and its component tree.
    pub fn configure(config: SatelliteConfiguration) -> SimResult<Self> {
        if config.id.is_empty() {
            return Err(SimulationError::configuration("satellite id is empty"));
        }
        if config.name.is_empty() {
            return Err(SimulationError::configuration("satellite name is empty"));
        }
        if !identifier::is_uuid(&config.id) {
            warn!("Satellite [{}] id [{}] is not a UUID", config.name, config.id);
        }

        let root = Mount::satellite(config.name.as_str());

        let mut components: Vec<Component> = Vec::with_capacity(config.components.len());
        for component_config in &config.components {
            if components.iter().any(|c| c.name() == component_config.name) {
                return Err(SimulationError::duplicate("component", component_config.name.as_str()));
            }
            components.push(Component::configure(component_config, &root)?);
        }

        let mut geometries: Vec<Geometry> = Vec::with_capacity(config.geometries.len());
        for geometry_config in &config.geometries {
            if geometries.iter().any(|g| g.name() == geometry_config.name) {
                return Err(SimulationError::duplicate("geometry", geometry_config.name.as_str()));
            }
            geometries.push(Geometry::configure(geometry_config, root.clone())?);
        }

        check_unique_ids(&components)?;

        debug!(
            "Configured satellite [{}] with {} components",
            config.name,
            components.len()
        );

        Ok(Self {
            id: config.id,
            name: config.name,
            tags: config.tags,
            profile: Some(config.profile),
            components,
            geometries,
        })
    }

    pub fn undefined() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            tags: Vec::new(),
            profile: None,
            components: Vec::new(),
            geometries: Vec::new(),
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty() && self.profile.is_some()
    }

    pub fn id(&self) -> SimResult<&str> {
        self.ensure_defined()?;
        Ok(&self.id)
    }

    pub fn name(&self) -> SimResult<&str> {
        self.ensure_defined()?;
        Ok(&self.name)
    }

    pub fn tags(&self) -> SimResult<&[String]> {
        self.ensure_defined()?;
        Ok(&self.tags)
    }

    pub fn access_profile(&self) -> SimResult<&Arc<dyn Profile>> {
        self.profile
            .as_ref()
            .ok_or(SimulationError::UndefinedState("Satellite"))
    }

    /// Kinematic state from the profile at `instant`.
    pub fn get_state_at(&self, instant: &Instant) -> SimResult<State> {
        Ok(self.access_profile()?.get_state_at(instant)?)
    }

    /// Body-frame geometries.
    pub fn access_geometries(&self) -> SimResult<&[Geometry]> {
        self.ensure_defined()?;
        Ok(&self.geometries)
    }

    pub fn access_geometry_with_name(&self, name: &str) -> SimResult<&Geometry> {
        self.access_geometries()?
            .iter()
            .find(|g| g.name() == name)
            .ok_or_else(|| SimulationError::not_found("geometry", name))
    }

    /// The body frame, a profile-driven frame with GCRF as parent.
    pub fn access_frame(&self) -> SimResult<Frame> {
        let profile = self.access_profile()?;
        Ok(Frame::dynamic(
            format!("Satellite [{}]", self.id),
            &Frame::gcrf(),
            Arc::new(ProfileTransform::new(Arc::clone(profile))),
        ))
    }

    fn ensure_defined(&self) -> SimResult<()> {
        if self.is_defined() {
            Ok(())
        } else {
            Err(SimulationError::UndefinedState("Satellite"))
        }
    }
}

impl ComponentHolder for Satellite {
    fn access_components(&self) -> SimResult<&[Component]> {
        self.ensure_defined()?;
        Ok(&self.components)
    }
}

impl PartialEq for Satellite {
    fn eq(&self, other: &Self) -> bool {
        let same_profile = match (&self.profile, &other.profile) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };

        same_profile
            && self.id == other.id
            && self.name == other.name
            && self.tags == other.tags
            && self.components == other.components
            && self.geometries == other.geometries
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_defined() {
            return write!(f, "Satellite [undefined]");
        }
        write!(
            f,
            "Satellite [{}] ({}) - {} components, {} geometries",
            self.name,
            self.id,
            self.components.len(),
            self.geometries.len()
        )
    }
}

fn check_unique_ids(components: &[Component]) -> SimResult<()> {
    fn walk<'a>(components: &'a [Component], seen: &mut HashSet<&'a str>) -> SimResult<()> {
        for component in components {
            if !seen.insert(component.id()) {
                return Err(SimulationError::duplicate("component id", component.id()));
            }
            walk(component.children(), seen)?;
        }
        Ok(())
    }

    walk(components, &mut HashSet::new())
}
