//! Reference frames and the transforms between them.
//!
//! Every frame is a chain of parents ending at GCRF. The transform of a frame
//! into GCRF at an instant is obtained by walking that chain, and the transform
//! between two arbitrary frames is
//!
//! ```text
//! T(target <- source) = T(gcrf <- target)^-1 * T(gcrf <- source)
//! ```
//!
//! so the result never depends on which intermediate frame a caller goes through.

use crate::error::EnvResult;
use crate::time::Instant;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::TAU;
use std::fmt;
use std::sync::Arc;

/// Source of a time-dependent frame pose.
///
/// # Implementations
///
/// - **Profiles**: `ProfileTransform` (satellite body frames)
/// - **Ephemerides**: Sun and Moon centered frames
pub trait TransformProvider: Send + Sync + fmt::Debug {
    /// Pose of the frame in its parent at `instant`.
    ///
    /// The isometry maps coordinates expressed in the frame to coordinates
    /// expressed in the parent frame.
    fn transform_at(&self, instant: &Instant) -> EnvResult<Isometry3<f64>>;
}

/// Earth Rotation Angle (IERS 2003) in radians, within `[0, 2π)`.
pub fn earth_rotation_angle(instant: &Instant) -> f64 {
    let days = instant.days_since_j2000();
    let turns = 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * days + days.fract();
    (turns.rem_euclid(1.0)) * TAU
}

#[derive(Debug)]
enum FrameKind {
    Gcrf,
    Itrf,
    Fixed {
        parent: Frame,
        transform: Isometry3<f64>,
    },
    Dynamic {
        parent: Frame,
        provider: Arc<dyn TransformProvider>,
    },
}

#[derive(Debug)]
struct FrameNode {
    name: String,
    kind: FrameKind,
}

/// A coordinate reference frame.
///
/// Frames are cheap to clone (shared chain). Two frames are equal when they
/// share the same node, or when both are the GCRF or the ITRF root; names are
/// labels only.
#[derive(Debug, Clone)]
pub struct Frame {
    node: Arc<FrameNode>,
}

impl Frame {
    /// Geocentric Celestial Reference Frame (the inertial root).
    pub fn gcrf() -> Self {
        Self::from_kind("GCRF", FrameKind::Gcrf)
    }

    /// International Terrestrial Reference Frame (Earth-fixed, rotating).
    ///
    /// Modelled as a rotation of GCRF about its z axis by the Earth Rotation
    /// Angle; precession, nutation and polar motion are ignored.
    pub fn itrf() -> Self {
        Self::from_kind("ITRF", FrameKind::Itrf)
    }

    /// A frame with a constant pose relative to `parent`.
    pub fn fixed(name: impl Into<String>, parent: &Frame, transform: Isometry3<f64>) -> Self {
        Self::from_kind(
            name,
            FrameKind::Fixed {
                parent: parent.clone(),
                transform,
            },
        )
    }

    /// A frame whose pose relative to `parent` is produced on demand.
    pub fn dynamic(
        name: impl Into<String>,
        parent: &Frame,
        provider: Arc<dyn TransformProvider>,
    ) -> Self {
        Self::from_kind(
            name,
            FrameKind::Dynamic {
                parent: parent.clone(),
                provider,
            },
        )
    }

    fn from_kind(name: impl Into<String>, kind: FrameKind) -> Self {
        Self {
            node: Arc::new(FrameNode {
                name: name.into(),
                kind,
            }),
        }
    }

    /// Returns the frame name.
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Returns the parent frame (`None` for GCRF).
    pub fn parent(&self) -> Option<Frame> {
        match &self.node.kind {
            FrameKind::Gcrf => None,
            FrameKind::Itrf => Some(Frame::gcrf()),
            FrameKind::Fixed { parent, .. } | FrameKind::Dynamic { parent, .. } => {
                Some(parent.clone())
            }
        }
    }

    /// True for the inertial root.
    pub fn is_inertial(&self) -> bool {
        matches!(self.node.kind, FrameKind::Gcrf)
    }

    /// Number of links between this frame and GCRF.
    pub fn depth(&self) -> usize {
        self.parent().map_or(0, |parent| parent.depth() + 1)
    }

    /// Pose of this frame in GCRF at `instant`.
    pub fn transform_to_gcrf(&self, instant: &Instant) -> EnvResult<Isometry3<f64>> {
        match &self.node.kind {
            FrameKind::Gcrf => Ok(Isometry3::identity()),
            FrameKind::Itrf => Ok(Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(&Vector3::z_axis(), earth_rotation_angle(instant)),
            )),
            FrameKind::Fixed { parent, transform } => {
                Ok(parent.transform_to_gcrf(instant)? * transform)
            }
            FrameKind::Dynamic { parent, provider } => {
                Ok(parent.transform_to_gcrf(instant)? * provider.transform_at(instant)?)
            }
        }
    }

    /// Isometry mapping coordinates in `self` to coordinates in `target` at `instant`.
    pub fn transform_to(&self, target: &Frame, instant: &Instant) -> EnvResult<Isometry3<f64>> {
        if self == target {
            return Ok(Isometry3::identity());
        }

        let source_to_gcrf = self.transform_to_gcrf(instant)?;
        let target_to_gcrf = target.transform_to_gcrf(instant)?;

        Ok(target_to_gcrf.inverse() * source_to_gcrf)
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        match (&self.node.kind, &other.node.kind) {
            (FrameKind::Gcrf, FrameKind::Gcrf) | (FrameKind::Itrf, FrameKind::Itrf) => true,
            _ => Arc::ptr_eq(&self.node, &other.node),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node.name)
    }
}
