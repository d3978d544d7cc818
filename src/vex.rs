//! Adapters between V5 devices and the sensor and motor traits.
//!
//! # Example
//!
//! ```ignore
//! use rev::{config::RobotConfig, drivetrain::SkidSteerChassis, vex::V5Motor};
//! use rev::motion::odom::TwoRotationInertialOdometry;
//! use vexide::prelude::*;
//!
//! let config = RobotConfig::default();
//! let odom = TwoRotationInertialOdometry::new(
//!     config.forward_wheel(RotationSensor::new(peripherals.port_9, Direction::Forward)),
//!     config.lateral_wheel(RotationSensor::new(peripherals.port_10, Direction::Forward)),
//!     InertialSensor::new(peripherals.port_11),
//! );
//! let chassis = SkidSteerChassis::new(
//!     vec![V5Motor::new(Motor::new(peripherals.port_1, Gearset::Blue, Direction::Reverse))],
//!     vec![V5Motor::new(Motor::new(peripherals.port_2, Gearset::Blue, Direction::Forward))],
//! );
//! ```

use log::warn;
use vexide::{
    adi::encoder::AdiOpticalEncoder,
    smart::{imu::InertialSensor, motor::Motor, rotation::RotationSensor as V5RotationSensor},
};

use crate::{
    drivetrain::{BrakeMode, MotorGroup},
    motion::odom::{HeadingSensor, RotationSensor, SensorError},
    units::{Angle, UnitExt},
};

/// Voltage of a V5 motor at full power.
const MAX_VOLTAGE: f64 = 12.0;

impl RotationSensor for V5RotationSensor {
    fn rotation(&mut self) -> Result<Angle, SensorError> {
        let position = self.position().map_err(|_| SensorError::Disconnected)?;
        Ok(position.as_radians().radians())
    }
}

impl RotationSensor for AdiOpticalEncoder {
    fn rotation(&mut self) -> Result<Angle, SensorError> {
        let position = self.position().map_err(|_| SensorError::Disconnected)?;
        Ok(position.as_radians().radians())
    }
}

impl HeadingSensor for InertialSensor {
    fn heading(&mut self) -> Result<Angle, SensorError> {
        if self.is_calibrating().map_err(|_| SensorError::Disconnected)? {
            return Err(SensorError::Calibrating);
        }
        let heading = InertialSensor::heading(self).map_err(|_| SensorError::Disconnected)?;
        Ok(heading.as_degrees().degrees())
    }
}

/// A V5 smart motor driven by voltage.
pub struct V5Motor {
    motor: Motor,
    mode:  BrakeMode,
}

impl V5Motor {
    pub fn new(motor: Motor) -> Self {
        Self {
            motor,
            mode: BrakeMode::default(),
        }
    }
}

fn v5_brake_mode(mode: BrakeMode) -> vexide::smart::motor::BrakeMode {
    match mode {
        BrakeMode::Coast => vexide::smart::motor::BrakeMode::Coast,
        BrakeMode::Brake => vexide::smart::motor::BrakeMode::Brake,
        BrakeMode::Hold => vexide::smart::motor::BrakeMode::Hold,
    }
}

impl MotorGroup for V5Motor {
    fn set_power(&mut self, power: f64) {
        let result = if power == 0.0 && self.mode != BrakeMode::Coast {
            self.motor.brake(v5_brake_mode(self.mode))
        } else {
            self.motor.set_voltage(power.clamp(-1.0, 1.0) * MAX_VOLTAGE)
        };
        if let Err(e) = result {
            warn!("Motor Error: {}", e);
        }
    }

    fn set_brake_mode(&mut self, mode: BrakeMode) { self.mode = mode; }
}
