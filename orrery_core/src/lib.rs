//! Orrery Core - Time-Driven Satellite Scene Graph
//!
//! A simulation is a tree of owned entities:
//!
//! ```text
//! Simulator -> Satellite -> Component -> ... -> Geometry
//! ```
//!
//! driven by a single time cursor held in the shared environment. Geometries
//! store their shapes in their owner's frame; every query rebuilds the frame
//! chain (satellite profile, then component offsets) at the current instant,
//! transforms both operands into GCRF and only then intersects them.
//!
//! 1. **Configure**: immutable configuration objects are validated and
//!    materialized once (`Simulator::configure`)
//! 2. **Advance**: `set_instant` / `step_forward` move the shared cursor
//! 3. **Query**: `Geometry::intersects`, `intersection_with`, `get_geometry_in`

pub mod component;
pub mod configuration;
pub mod error;
pub mod geometry;
pub mod holder;
pub mod identifier;
pub mod satellite;
pub mod simulator;

// Re-export key types for convenience
pub use component::{Component, ComponentKind};
pub use configuration::{
    ComponentConfiguration, GeometryConfiguration, SatelliteConfiguration, SimulatorConfiguration,
};
pub use error::{SimResult, SimulationError};
pub use geometry::{Geometry, Intersectable};
pub use holder::{ComponentHolder, Mount};
pub use satellite::Satellite;
pub use simulator::{share, SharedEnvironment, Simulator};
