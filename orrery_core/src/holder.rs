//! Component ownership utilities shared by satellites and components.
//!
//! Children never hold references to their owners. Instead every component and
//! geometry carries a [`Mount`]: the owning satellite name plus the path of
//! component names leading to its owner. The ancestor chain is resolved
//! through the simulator at query time.

use crate::component::Component;
use crate::error::{SimResult, SimulationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator of explicit component paths (`"Gimbal/Camera"`).
pub const PATH_SEPARATOR: char = '/';

/// Non-owning back-reference to a position in the satellite tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mount {
    satellite: String,
    path: Vec<String>,
}

impl Mount {
    /// The root of the satellite named `satellite`.
    pub fn satellite(satellite: impl Into<String>) -> Self {
        Self {
            satellite: satellite.into(),
            path: Vec::new(),
        }
    }

    /// The mount of a child component named `component`.
    pub fn child(&self, component: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(component.into());
        Self {
            satellite: self.satellite.clone(),
            path,
        }
    }

    pub fn satellite_name(&self) -> &str {
        &self.satellite
    }

    /// Component names from the satellite root (empty for the body itself).
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_satellite_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.satellite)?;
        for name in &self.path {
            write!(f, "{}{}", PATH_SEPARATOR, name)?;
        }
        Ok(())
    }
}

/// Anything owning a list of components.
///
/// Name lookups only inspect immediate children; id and tag lookups search the
/// whole subtree; [`access_component_at`](ComponentHolder::access_component_at)
/// walks an explicit path.
pub trait ComponentHolder {
    /// Immediate child components.
    fn access_components(&self) -> SimResult<&[Component]>;

    fn access_component_with_name(&self, name: &str) -> SimResult<&Component> {
        if name.is_empty() {
            return Err(SimulationError::configuration("component name is empty"));
        }
        self.access_components()?
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| SimulationError::not_found("component", name))
    }

    fn has_component_with_name(&self, name: &str) -> SimResult<bool> {
        Ok(self.access_components()?.iter().any(|c| c.name() == name))
    }

    fn access_component_with_id(&self, id: &str) -> SimResult<&Component> {
        find_with_id(self.access_components()?, id)
            .ok_or_else(|| SimulationError::not_found("component", id))
    }

    fn has_component_with_id(&self, id: &str) -> SimResult<bool> {
        Ok(find_with_id(self.access_components()?, id).is_some())
    }

    /// Every component of the subtree carrying `tag`, depth first.
    fn access_components_with_tag(&self, tag: &str) -> SimResult<Vec<&Component>> {
        let mut found = Vec::new();
        collect_with_tag(self.access_components()?, tag, &mut found);
        Ok(found)
    }

    /// Resolves a `/`-separated path of component names.
    fn access_component_at(&self, path: &str) -> SimResult<&Component> {
        let mut names = path.split(PATH_SEPARATOR).filter(|n| !n.is_empty());
        let first = names
            .next()
            .ok_or_else(|| SimulationError::configuration("component path is empty"))?;

        let mut current = self
            .access_component_with_name(first)
            .map_err(|_| SimulationError::not_found("component path", path))?;
        for name in names {
            current = current
                .access_component_with_name(name)
                .map_err(|_| SimulationError::not_found("component path", path))?;
        }
        Ok(current)
    }

    fn has_component_at(&self, path: &str) -> SimResult<bool> {
        match self.access_component_at(path) {
            Ok(_) => Ok(true),
            Err(SimulationError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn find_with_id<'a>(components: &'a [Component], id: &str) -> Option<&'a Component> {
    components.iter().find_map(|c| {
        if c.id() == id {
            Some(c)
        } else {
            find_with_id(c.children(), id)
        }
    })
}

fn collect_with_tag<'a>(components: &'a [Component], tag: &str, found: &mut Vec<&'a Component>) {
    for component in components {
        if component.tags().iter().any(|t| t == tag) {
            found.push(component);
        }
        collect_with_tag(component.children(), tag, found);
    }
}
