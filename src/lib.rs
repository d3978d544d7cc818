//! # Rev
//!
//! Rev is the autonomous core of a VEX V5 differential-drive robot, built on
//! top of [Vexide](https://vexide.dev). It provides:
//!
//! - **Units**: Compile-time checked physical quantities, so a length can never
//!   be added to a time.
//! - **Drivetrain Control**: A skid-steer chassis with tank and arcade mixing.
//! - **Odometry**: Pose tracking from two perpendicular tracking wheels and an
//!   inertial sensor.
//! - **Motion Control**: Fixed-period background runners, a composable
//!   straight-segment path follower and a damped point-turn controller.
//! - **Simulation**: A simulated robot that runs everything above off the Brain.
//! - **Logging**: A console and file logger for debugging and telemetry.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use rev::{
//!     config::RobotConfig,
//!     motion::{odom::*, reckless::*, runner::Runner, turn::CampbellTurn},
//!     units::UnitExt,
//! };
//!
//! let config = RobotConfig::default();
//! let odom = Arc::new(TwoRotationInertialOdometry::new(
//!     config.forward_wheel(forward_sensor),
//!     config.lateral_wheel(lateral_sensor),
//!     imu,
//! ));
//! odom.reset_position();
//!
//! let reckless = Arc::new(Reckless::new(chassis.clone(), odom.clone()));
//! let turn = Arc::new(CampbellTurn::new(chassis.clone(), odom.clone(), config.turn_gains));
//! let _runners = [
//!     Runner::with_default_period(odom.clone()),
//!     Runner::with_default_period(reckless.clone()),
//!     Runner::with_default_period(turn.clone()),
//! ];
//!
//! reckless.go(RecklessPath::new().with_segment(RecklessPathSegment::new(
//!     ConstantMotion::new(0.5),
//!     PilonsCorrection::new(4.0, 0.3.inches()),
//!     SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3),
//!     Pose::inches(20.0, 0.0, 0.0),
//!     0.5.inches(),
//! )));
//! reckless.wait().await;
//!
//! turn.turn_to_target_absolute(0.7, 90.0.degrees());
//! turn.wait().await;
//! ```
//!
//! ## Modules
//!
//! - [`units`]: Typed physical quantities and unit constants.
//! - [`drivetrain`]: Skid-steer chassis and the motor group contract.
//! - [`motion`]: Odometry, runners, path following and turning.
//! - [`config`]: The robot's physical configuration.
//! - [`sim`]: A simulated robot for running without hardware.
//! - [`fs`]: Filesystem utilities including logging.

/// Program uptime.
pub mod clock;

/// Physical configuration.
pub mod config;

/// Differential drivetrain control module.
///
/// Provides the [`Chassis`](drivetrain::Chassis) trait and the
/// [`SkidSteerChassis`](drivetrain::SkidSteerChassis) implementation.
pub mod drivetrain;

/// Filesystem utilities module.
///
/// Contains logging functionality for recording robot telemetry and debug
/// information to files on the V5 Brain's SD card.
pub mod fs;

/// Autonomous motion control module.
///
/// Provides odometry, background runners and the motion controllers:
///
/// - **Odometry**: Position tracking using tracking wheels and an inertial sensor.
/// - **Reckless**: Straight-segment path following with pluggable strategies.
/// - **Turn**: Point turns to an absolute heading.
pub mod motion;

/// Simulated robot.
pub mod sim;

/// Typed physical quantities.
pub mod units;

/// V5 device adapters.
#[cfg(target_os = "vexos")]
pub mod vex;
