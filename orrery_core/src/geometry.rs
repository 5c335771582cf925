//! Named, frame-relative shapes mounted on satellites and components.
//!
//! A [`Geometry`] stores its shape in the frame of its owner and nothing
//! else. Every query resolves the owner's frame afresh from the simulator
//! instant, so there is no pose to go stale when time moves.
//!
//! # Example
//!
//! ```ignore
//! let camera = satellite.access_component_with_name("Camera")?;
//! let fov = camera.access_geometry_with_name("FOV")?;
//! let earth = simulator.access_celestial_object_with_name("Earth")?;
//!
//! if fov.intersects(&simulator, &earth)? {
//!     let footprint = fov.intersection_with(&simulator, &earth)?;
//! }
//! ```

use crate::configuration::GeometryConfiguration;
use crate::error::{SimResult, SimulationError};
use crate::holder::Mount;
use crate::simulator::Simulator;
use orrery_env::{Celestial, Composite, Frame, ObjectGeometry};

/// Anything that can be placed in space at the simulator instant.
pub trait Intersectable {
    /// Shape of `self` with the frame it is expressed in.
    fn object_geometry(&self, simulator: &Simulator) -> SimResult<ObjectGeometry>;
}

impl Intersectable for ObjectGeometry {
    fn object_geometry(&self, _simulator: &Simulator) -> SimResult<ObjectGeometry> {
        Ok(self.clone())
    }
}

impl Intersectable for Celestial {
    fn object_geometry(&self, _simulator: &Simulator) -> SimResult<ObjectGeometry> {
        Ok(self.access_geometry().clone())
    }
}

impl Intersectable for Geometry {
    fn object_geometry(&self, simulator: &Simulator) -> SimResult<ObjectGeometry> {
        Ok(ObjectGeometry::new(
            self.composite.clone(),
            self.access_frame(simulator)?,
        ))
    }
}

/// A named shape in the frame of its owning component (or satellite body).
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    name: String,
    composite: Composite,
    mount: Mount,
}

impl Geometry {
    /// Builds a geometry owned by the entity at `mount`.
    pub fn configure(config: &GeometryConfiguration, mount: Mount) -> SimResult<Self> {
        if config.name.is_empty() {
            return Err(SimulationError::configuration(format!(
                "geometry name is empty (owner [{}])",
                mount
            )));
        }
        if config.composite.is_empty() {
            return Err(SimulationError::configuration(format!(
                "geometry [{}] has no shape",
                config.name
            )));
        }

        Ok(Self {
            name: config.name.clone(),
            composite: config.composite.clone(),
            mount,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Static shape in the owner frame.
    pub fn access_composite(&self) -> &Composite {
        &self.composite
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Owner frame, rebuilt from the satellite profile and component offsets.
    pub fn access_frame(&self, simulator: &Simulator) -> SimResult<Frame> {
        simulator.resolve_frame(&self.mount)
    }

    /// The shape expressed in `frame` at the simulator instant.
    pub fn get_geometry_in(&self, simulator: &Simulator, frame: &Frame) -> SimResult<ObjectGeometry> {
        let environment = simulator.access_environment()?.read();
        let instant = environment.get_instant();

        Ok(self.object_geometry(simulator)?.in_frame(frame, &instant)?)
    }

    /// True if this shape and `other` overlap at the simulator instant.
    pub fn intersects<T: Intersectable + ?Sized>(
        &self,
        simulator: &Simulator,
        other: &T,
    ) -> SimResult<bool> {
        let environment = simulator.access_environment()?.read();
        let instant = environment.get_instant();

        let mine = self.object_geometry(simulator)?;
        let theirs = other.object_geometry(simulator)?;
        Ok(mine.intersects(&theirs, &instant)?)
    }

    /// Intersection locus with `other` at the simulator instant, in GCRF.
    ///
    /// A pyramidal field of view against an ellipsoidal body yields the entry
    /// and exit traces of the view boundary on the body surface.
    pub fn intersection_with<T: Intersectable + ?Sized>(
        &self,
        simulator: &Simulator,
        other: &T,
    ) -> SimResult<ObjectGeometry> {
        let environment = simulator.access_environment()?.read();
        let instant = environment.get_instant();

        let mine = self.object_geometry(simulator)?;
        let theirs = other.object_geometry(simulator)?;
        Ok(mine.intersection_with(&theirs, &instant)?)
    }

    /// True if `other` lies entirely inside this shape at the simulator instant.
    pub fn contains<T: Intersectable + ?Sized>(
        &self,
        simulator: &Simulator,
        other: &T,
    ) -> SimResult<bool> {
        let environment = simulator.access_environment()?.read();
        let instant = environment.get_instant();

        let mine = self.object_geometry(simulator)?;
        let theirs = other.object_geometry(simulator)?;
        Ok(mine.contains(&theirs, &instant)?)
    }
}
