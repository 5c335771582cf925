//! Orrery Environment Layer
//!
//! This crate provides the collaborators the simulation engine consumes
//! without reimplementing: time, reference frames, attitude/position
//! profiles, celestial bodies and the 3D geometry primitives.
//!
//! # Core Concept: Everything Resolves Through an Instant
//!
//! Nothing in this crate keeps a "current pose". Frames are chains ending at
//! GCRF and are evaluated at an explicit [`Instant`]:
//! - Profiles map an instant to a pose (`Profile::get_state_at`)
//! - Dynamic frames wrap a [`TransformProvider`] (profiles, ephemerides)
//! - Shapes carry the frame they are expressed in ([`ObjectGeometry`])
//!
//! # Example
//!
//! ```ignore
//! use orrery_env::{Environment, Frame, Instant};
//!
//! let epoch = Instant::from_datetime(2020, 1, 1, 0, 0, 0.0)?;
//! let environment = Environment::default_at(epoch);
//! let earth = environment.access_celestial_object_with_name("Earth")?;
//!
//! let in_gcrf = earth.access_geometry().in_frame(&Frame::gcrf(), &epoch)?;
//! ```

mod celestial;
mod environment;
mod ephemeris;
mod error;
mod frame;
mod geometry;
mod intersection;
mod orbit;
mod profile;
mod time;

pub use celestial::{
    Celestial, EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING, EARTH_GRAVITATIONAL_PARAMETER, EARTH_J2,
};
pub use environment::Environment;
pub use ephemeris::{moon_position, sun_position, ASTRONOMICAL_UNIT};
pub use error::{EnvError, EnvResult};
pub use frame::{earth_rotation_angle, Frame, TransformProvider};
pub use geometry::{
    Composite, Ellipsoid, LineString, Object, ObjectGeometry, Polygon, Pyramid, Ray,
};
pub use orbit::{Orbit, Trajectory};
pub use profile::{InertialPointing, NadirPointing, Profile, ProfileTransform, State, StaticProfile};
pub use time::{seconds, Duration, Instant};
