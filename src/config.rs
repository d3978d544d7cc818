//! Physical configuration of the robot.
//!
//! These values describe how the robot is built. They are supplied once when
//! the odometry and controllers are constructed and never change during a
//! run.
//!
//! # Example
//!
//! ```ignore
//! use rev::config::RobotConfig;
//! use rev::motion::{odom::TwoRotationInertialOdometry, turn::CampbellTurn};
//!
//! let config = RobotConfig::default();
//! let odom = TwoRotationInertialOdometry::new(
//!     config.forward_wheel(forward_sensor),
//!     config.lateral_wheel(lateral_sensor),
//!     imu,
//! );
//! let turn = CampbellTurn::new(chassis, odom, config.turn_gains);
//! ```

use crate::{
    motion::{
        odom::{RotationSensor, TrackingWheel},
        turn::TurnGains,
    },
    units::{Length, UnitExt},
};

/// The robot's physical configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotConfig {
    /// Diameter of both tracking wheels.
    pub wheel_diameter:       Length,
    /// Distance of the forward wheel to the right of the centre of rotation.
    pub forward_wheel_offset: Length,
    /// Distance of the lateral wheel behind the centre of rotation.
    pub lateral_wheel_offset: Length,
    pub turn_gains:           TurnGains,
}

impl RobotConfig {
    pub fn new(
        wheel_diameter: Length,
        forward_wheel_offset: Length,
        lateral_wheel_offset: Length,
        turn_gains: TurnGains,
    ) -> Self {
        Self {
            wheel_diameter,
            forward_wheel_offset,
            lateral_wheel_offset,
            turn_gains,
        }
    }

    /// The forward tracking wheel, reading from `sensor`.
    pub fn forward_wheel<S: RotationSensor + 'static>(&self, sensor: S) -> TrackingWheel {
        TrackingWheel::new(sensor, self.wheel_diameter, self.forward_wheel_offset)
    }

    /// The lateral tracking wheel, reading from `sensor`.
    pub fn lateral_wheel<S: RotationSensor + 'static>(&self, sensor: S) -> TrackingWheel {
        TrackingWheel::new(sensor, self.wheel_diameter, self.lateral_wheel_offset)
    }
}

impl Default for RobotConfig {
    /// The competition robot: 63.89 mm tracking wheels, the forward wheel
    /// 1.125" left of centre and the lateral wheel 1" ahead of it.
    fn default() -> Self {
        Self::new(
            63.89.millimeters(),
            -1.125.inches(),
            -1.0.inches(),
            TurnGains::new(0.18, 0.07),
        )
    }
}
