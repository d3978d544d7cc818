//! Autonomous motion control algorithms.
//!
//! This module provides tools for precise robot movement during autonomous
//! periods. It includes:
//!
//! - **Odometry**: Position tracking using tracking wheels and an inertial sensor.
//! - **Runner**: Fixed-period background loops that advance each controller.
//! - **Reckless**: A path follower built from pluggable motion, correction and
//!   stop strategies.
//! - **Turn**: A point-turn controller with derivative damping.
//!
//! # Architecture
//!
//! Every controller implements [`runner::Updatable`] and is advanced by its own
//! [`runner::Runner`]. The autonomous routine only submits goals and waits for
//! them, so timing never leaks into routine code. Only one controller should
//! command the chassis at a time; sequence goals rather than overlapping them.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rev::motion::{reckless::*, runner::Runner, turn::CampbellTurn};
//! use rev::units::UnitExt;
//!
//! let _odom_runner = Runner::with_default_period(odom.clone());
//! let _reckless_runner = Runner::with_default_period(reckless.clone());
//! let _turn_runner = Runner::with_default_period(turn.clone());
//!
//! reckless.go(RecklessPath::new().with_segment(RecklessPathSegment::new(
//!     ConstantMotion::new(0.5),
//!     PilonsCorrection::new(4.0, 0.3.inches()),
//!     SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3),
//!     Pose::inches(20.0, 0.0, 0.0),
//!     0.5.inches(),
//! )));
//! reckless.wait();
//!
//! turn.turn_to_target_absolute(0.7, 90.0.degrees());
//! turn.wait();
//! ```

use std::time::Duration;

/// Odometry tracking for position estimation.
///
/// Provides the [`Odometry`](odom::Odometry) trait and the
/// [`TwoRotationInertialOdometry`](odom::TwoRotationInertialOdometry) estimator.
pub mod odom;

/// Straight-segment path following.
///
/// [`Reckless`](reckless::Reckless) drives a [`RecklessPath`](reckless::RecklessPath)
/// segment by segment.
pub mod reckless;

/// Fixed-period background loops.
pub mod runner;

/// Point turns to an absolute heading.
pub mod turn;

/// Polling interval for waiting on a goal. Controllers started with
/// [`Runner::with_default_period`](runner::Runner::with_default_period)
/// update at the same rate.
const LOOPRATE: Duration = runner::DEFAULT_PERIOD;

/// Blocks until `done` returns true or `timeout` passes.
///
/// Returns the final value of `done`.
#[cfg(not(target_os = "vexos"))]
pub(crate) fn wait_until(done: impl Fn() -> bool, timeout: Option<Duration>) -> bool {
    let deadline = timeout.map(|t| crate::clock::uptime() + t);
    while !done() {
        if deadline.is_some_and(|d| crate::clock::uptime() >= d) {
            return done();
        }
        std::thread::sleep(LOOPRATE);
    }
    true
}

/// Yields until `done` returns true or `timeout` passes.
///
/// Returns the final value of `done`.
#[cfg(target_os = "vexos")]
pub(crate) async fn wait_until(done: impl Fn() -> bool, timeout: Option<Duration>) -> bool {
    let deadline = timeout.map(|t| crate::clock::uptime() + t);
    while !done() {
        if deadline.is_some_and(|d| crate::clock::uptime() >= d) {
            return done();
        }
        vexide::time::sleep(LOOPRATE).await;
    }
    true
}
