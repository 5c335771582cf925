//! Position and attitude profiles.
//!
//! A profile maps an instant to the full kinematic [`State`] of a body. The
//! satellite body frame is a dynamic frame driven by its profile through
//! [`ProfileTransform`].

use crate::error::{EnvError, EnvResult};
use crate::frame::TransformProvider;
use crate::orbit::Trajectory;
use crate::time::Instant;
use nalgebra::{Isometry3, Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kinematic state in GCRF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub instant: Instant,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    /// Rotation from body coordinates to GCRF coordinates
    pub attitude: UnitQuaternion<f64>,
}

impl State {
    /// Body-to-GCRF isometry.
    pub fn pose(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.attitude)
    }
}

/// Source of a body state over time.
pub trait Profile: Send + Sync + fmt::Debug {
    fn get_state_at(&self, instant: &Instant) -> EnvResult<State>;
}

/// Points the body +z axis at the geocenter.
///
/// Axes follow the VVLH convention: +z toward nadir, -y along the orbit
/// normal, +x completing the triad (along velocity for circular orbits).
#[derive(Debug, Clone)]
pub struct NadirPointing {
    trajectory: Arc<dyn Trajectory>,
}

impl NadirPointing {
    pub fn new(trajectory: impl Trajectory + 'static) -> Self {
        Self {
            trajectory: Arc::new(trajectory),
        }
    }

    pub fn access_trajectory(&self) -> &Arc<dyn Trajectory> {
        &self.trajectory
    }
}

impl Profile for NadirPointing {
    fn get_state_at(&self, instant: &Instant) -> EnvResult<State> {
        let (position, velocity) = self.trajectory.get_position_velocity_at(instant)?;
        let attitude = vvlh_attitude(&position.coords, &velocity)?;

        Ok(State {
            instant: *instant,
            position,
            velocity,
            attitude,
        })
    }
}

fn vvlh_attitude(position: &Vector3<f64>, velocity: &Vector3<f64>) -> EnvResult<UnitQuaternion<f64>> {
    let momentum = position.cross(velocity);
    if position.norm() <= f64::EPSILON || momentum.norm() <= f64::EPSILON {
        return Err(EnvError::InvalidOrbit(
            "nadir pointing needs non-collinear position and velocity".to_string(),
        ));
    }

    let z = -position.normalize();
    let y = -momentum.normalize();
    let x = y.cross(&z);

    let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]));
    Ok(UnitQuaternion::from_rotation_matrix(&rotation))
}

/// Follows a trajectory with a constant inertial attitude.
#[derive(Debug, Clone)]
pub struct InertialPointing {
    trajectory: Arc<dyn Trajectory>,
    attitude: UnitQuaternion<f64>,
}

impl InertialPointing {
    pub fn new(trajectory: impl Trajectory + 'static, attitude: UnitQuaternion<f64>) -> Self {
        Self {
            trajectory: Arc::new(trajectory),
            attitude,
        }
    }
}

impl Profile for InertialPointing {
    fn get_state_at(&self, instant: &Instant) -> EnvResult<State> {
        let (position, velocity) = self.trajectory.get_position_velocity_at(instant)?;
        Ok(State {
            instant: *instant,
            position,
            velocity,
            attitude: self.attitude,
        })
    }
}

/// Constant pose at rest in GCRF.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticProfile {
    position: Point3<f64>,
    attitude: UnitQuaternion<f64>,
}

impl StaticProfile {
    pub fn new(position: Point3<f64>, attitude: UnitQuaternion<f64>) -> Self {
        Self { position, attitude }
    }
}

impl Profile for StaticProfile {
    fn get_state_at(&self, instant: &Instant) -> EnvResult<State> {
        Ok(State {
            instant: *instant,
            position: self.position,
            velocity: Vector3::zeros(),
            attitude: self.attitude,
        })
    }
}

/// Drives a dynamic frame from a profile.
#[derive(Debug, Clone)]
pub struct ProfileTransform {
    profile: Arc<dyn Profile>,
}

impl ProfileTransform {
    pub fn new(profile: Arc<dyn Profile>) -> Self {
        Self { profile }
    }
}

impl TransformProvider for ProfileTransform {
    fn transform_at(&self, instant: &Instant) -> EnvResult<Isometry3<f64>> {
        Ok(self.profile.get_state_at(instant)?.pose())
    }
}
