//! Odometry tracking for robot position estimation.
//!
//! This module provides odometry tracking using perpendicular tracking wheels
//! and an inertial sensor to estimate the robot's global position on the field.
//!
//! # Module Structure
//!
//! - **[`devices`]**: Sensor contracts, tracking wheels and the [`Pose`] type.
//! - **[`tracker`]**: The [`TwoRotationInertialOdometry`] estimator.
//!
//! # How It Works
//!
//! Odometry uses wheel encoders to measure how far the robot has traveled
//! and an inertial sensor (IMU) to measure rotation. By combining these
//! measurements over time, we can estimate the robot's (x, y) position
//! and heading on the field.
//!
//! # Frame
//!
//! Heading 0 points along +x and heading increases clockwise, matching the V5
//! inertial sensor. At heading 0 the robot's right side faces +y.
//!
//! # Hardware Requirements
//!
//! - **Forward tracking wheel**: Measures forward/backward movement.
//! - **Lateral tracking wheel**: Measures sideways movement.
//! - **Inertial sensor (IMU)**: Measures heading.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rev::motion::odom::{Odometry, devices::TrackingWheel, tracker::TwoRotationInertialOdometry};
//! use rev::units::UnitExt;
//!
//! let forward = TrackingWheel::new(forward_sensor, 63.89.millimeters(), -1.125.inches());
//! let lateral = TrackingWheel::new(lateral_sensor, 63.89.millimeters(), -1.0.inches());
//! let odom = Arc::new(TwoRotationInertialOdometry::new(forward, lateral, imu));
//! odom.reset_position();
//! ```

mod algorithm;

/// Tracking devices and position types.
pub mod devices;

/// Main odometry tracking controller.
pub mod tracker;

pub use devices::{HeadingSensor, Pose, RotationSensor, SensorError, TrackingWheel};
pub use tracker::TwoRotationInertialOdometry;

use crate::units::{AngularVelocity, Velocity};

/// Rate of change of a [`Pose`], in the global frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseVelocity {
    pub x:     Velocity,
    pub y:     Velocity,
    pub theta: AngularVelocity,
}

impl PoseVelocity {
    /// Magnitude of the linear velocity.
    pub fn speed(&self) -> Velocity { self.x.hypot(self.y) }
}

/// Everything an estimator publishes in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OdometryState {
    pub pos: Pose,
    pub vel: PoseVelocity,
}

/// A source of the robot's global pose.
///
/// Controllers hold an `Arc<dyn Odometry>`, so they can run against the real
/// estimator, the simulator, or a test double.
pub trait Odometry: Send + Sync {
    /// A consistent snapshot of the latest state.
    fn get_state(&self) -> OdometryState;

    /// Moves the estimate to `pose` and re-baselines the sensors, so motion
    /// before the call is not integrated. This is the general form of
    /// [`reset_position`](Self::reset_position).
    fn set_position(&self, pose: Pose);

    /// Moves the estimate to the origin. Use
    /// [`set_position`](Self::set_position) to start from another pose.
    fn reset_position(&self) { self.set_position(Pose::origin()); }
}
