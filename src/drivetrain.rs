//! Differential drivetrain control.
//!
//! This module turns motion commands into per-side power for robots with
//! separate left and right motor groups, commonly known as a "tank drive" or
//! "skid-steer" configuration.
//!
//! Power is a signed, normalized value in `[-1.0, 1.0]`. Hardware adapters
//! implement [`MotorGroup`] to apply it (a V5 motor scales it to ±12 V), and
//! controllers only ever talk to the [`Chassis`] trait.
//!
//! # Example
//!
//! ```ignore
//! use rev::drivetrain::{Chassis, SkidSteerChassis};
//!
//! let chassis = SkidSteerChassis::new(left_motors, right_motors);
//!
//! // Forward at half power while turning clockwise.
//! chassis.drive_arcade(0.5, 0.2);
//! chassis.stop();
//! ```

use std::sync::{Mutex, PoisonError};

/// How a motor group behaves when no power is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrakeMode {
    /// Motors spin freely.
    #[default]
    Coast,
    /// Motors short their windings and resist rotation.
    Brake,
    /// Motors actively hold their position.
    Hold,
}

/// Left and right power levels for one drive command.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TankPowers {
    pub left:  f64,
    pub right: f64,
}

impl TankPowers {
    pub fn new(left: f64, right: f64) -> Self { Self { left, right } }

    /// Mixes a linear and an angular command into per-side power.
    ///
    /// `left = linear + angular` and `right = linear - angular`, so a positive
    /// angular command turns the robot clockwise.
    pub fn arcade(linear: f64, angular: f64) -> Self {
        Self {
            left:  linear + angular,
            right: linear - angular,
        }
    }

    /// Restricts both sides to the valid power range `[-1.0, 1.0]`.
    pub fn clamped(self) -> Self {
        Self {
            left:  self.left.clamp(-1.0, 1.0),
            right: self.right.clamp(-1.0, 1.0),
        }
    }
}

/// One side of the drivetrain.
///
/// Writes are applied immediately and are idempotent, so controllers may
/// write every cycle.
pub trait MotorGroup: Send {
    /// Applies a signed, normalized power in `[-1.0, 1.0]`.
    fn set_power(&mut self, power: f64);

    fn set_brake_mode(&mut self, mode: BrakeMode);
}

impl<M: MotorGroup> MotorGroup for Vec<M> {
    fn set_power(&mut self, power: f64) {
        for motor in self.iter_mut() {
            motor.set_power(power);
        }
    }

    fn set_brake_mode(&mut self, mode: BrakeMode) {
        for motor in self.iter_mut() {
            motor.set_brake_mode(mode);
        }
    }
}

/// A drivetrain that motion controllers can command.
///
/// At most one controller should be commanding a chassis at a time. Nothing
/// here enforces that; overlapping writers simply race per cycle.
pub trait Chassis: Send + Sync {
    /// Sends independent power levels to each side.
    fn drive_tank(&self, left: f64, right: f64);

    /// Sends a linear and an angular command, mixed as in [`TankPowers::arcade`].
    fn drive_arcade(&self, linear: f64, angular: f64) {
        let powers = TankPowers::arcade(linear, angular);
        self.drive_tank(powers.left, powers.right);
    }

    fn set_brake_mode(&self, mode: BrakeMode);

    /// Engages [`BrakeMode::Hold`] and cuts power.
    fn stop(&self) {
        self.set_brake_mode(BrakeMode::Hold);
        self.drive_tank(0.0, 0.0);
    }
}

/// A differential drivetrain with one motor group per side.
///
/// Each side sits behind its own lock, so a command never blocks on a
/// different side. Power is clamped to `[-1.0, 1.0]` before it reaches the
/// motors.
pub struct SkidSteerChassis {
    left:  Mutex<Box<dyn MotorGroup>>,
    right: Mutex<Box<dyn MotorGroup>>,
}

impl SkidSteerChassis {
    /// Creates a chassis from the left and right motor groups.
    ///
    /// Motors on opposite sides usually spin in opposite directions to move
    /// forward; configure that in the motor groups, not here.
    pub fn new<L: MotorGroup + 'static, R: MotorGroup + 'static>(left: L, right: R) -> Self {
        Self {
            left:  Mutex::new(Box::new(left)),
            right: Mutex::new(Box::new(right)),
        }
    }
}

impl Chassis for SkidSteerChassis {
    fn drive_tank(&self, left: f64, right: f64) {
        let powers = TankPowers::new(left, right).clamped();
        self.left
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_power(powers.left);
        self.right
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_power(powers.right);
    }

    fn set_brake_mode(&self, mode: BrakeMode) {
        self.left
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_brake_mode(mode);
        self.right
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_brake_mode(mode);
    }
}
