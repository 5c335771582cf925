//! Error types for the environment layer.

use thiserror::Error;

/// Errors raised by frames, profiles, celestial lookups and geometry primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// Named object (celestial body, frame) does not exist
    #[error("No {kind} found with name [{name}]")]
    NotFound { kind: &'static str, name: String },

    /// Two objects of the environment share a name
    #[error("Duplicate object with name [{0}]")]
    DuplicateObject(String),

    /// Shape is degenerate or malformed
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The primitive library has no algorithm for this pair of shapes
    #[error("Intersection between {left} and {right} is not supported")]
    UnsupportedIntersection {
        left: &'static str,
        right: &'static str,
    },

    /// Orbit parameters cannot describe a physical orbit
    #[error("Invalid orbit: {0}")]
    InvalidOrbit(String),

    /// Instant is out of range or could not be built
    #[error("Invalid instant: {0}")]
    InvalidInstant(String),
}

impl EnvError {
    /// Creates a not-found error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Creates an invalid-geometry error.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Creates an unsupported-intersection error.
    pub fn unsupported(left: &'static str, right: &'static str) -> Self {
        Self::UnsupportedIntersection { left, right }
    }
}

/// Result alias used throughout the environment layer.
pub type EnvResult<T> = Result<T, EnvError>;
