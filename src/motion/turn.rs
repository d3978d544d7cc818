//! Point turns to an absolute heading.
//!
//! [`CampbellTurn`] rotates the robot in place with a two-term law: a term
//! proportional to the heading error, minus a term proportional to the
//! angular velocity. The damping term keeps the robot from swinging through
//! the target, and the goal only completes once the robot is both on target
//! and nearly still.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rev::motion::{runner::Runner, turn::{CampbellTurn, TurnGains}};
//! use rev::units::UnitExt;
//!
//! let turn = Arc::new(CampbellTurn::new(chassis.clone(), odom.clone(), TurnGains::new(0.18, 0.07)));
//! let _runner = Runner::with_default_period(turn.clone());
//!
//! turn.turn_to_target_absolute(0.7, 90.0.degrees());
//! turn.wait();
//! ```

use std::{
    f64::consts::PI,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use log::{debug, info};

use crate::{
    drivetrain::{BrakeMode, Chassis},
    motion::{odom::Odometry, runner::Updatable},
    units::{
        Angle, AngularVelocity,
        consts::{DEGREE, RADIAN, RADIANS_PER_SECOND},
    },
};

/// Largest heading error at which a turn can complete, 1°.
const SETTLE_ERROR: Angle = Angle::new(PI / 180.0);

/// Largest angular velocity at which a turn can complete, 5°/s.
const SETTLE_RATE: AngularVelocity = AngularVelocity::new(5.0 * PI / 180.0);

/// Gains for [`CampbellTurn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnGains {
    /// Power per radian of heading error.
    pub kp: f64,
    /// Power per radian per second of angular velocity.
    pub kd: f64,
}

impl TurnGains {
    pub fn new(kp: f64, kd: f64) -> Self { Self { kp, kd } }
}

/// Turn power for one cycle, clipped to `±max_power`.
///
/// Positive power turns clockwise.
pub fn turn_power(gains: TurnGains, max_power: f64, error: Angle, rate: AngularVelocity) -> f64 {
    let max_power = max_power.abs();
    let power = gains.kp * error.convert(RADIAN) - gains.kd * rate.convert(RADIANS_PER_SECOND);
    power.clamp(-max_power, max_power)
}

#[derive(Debug, Clone, Copy)]
struct TurnGoal {
    max_power: f64,
    target:    Angle,
}

/// Point-turn controller.
///
/// Before the first goal the controller is idle and reports itself
/// completed.
pub struct CampbellTurn {
    chassis:   Arc<dyn Chassis>,
    odometry:  Arc<dyn Odometry>,
    gains:     TurnGains,
    goal:      Mutex<Option<TurnGoal>>,
    completed: AtomicBool,
}

impl CampbellTurn {
    pub fn new(chassis: Arc<dyn Chassis>, odometry: Arc<dyn Odometry>, gains: TurnGains) -> Self {
        Self {
            chassis,
            odometry,
            gains,
            goal: Mutex::new(None),
            completed: AtomicBool::new(true),
        }
    }

    pub fn gains(&self) -> TurnGains { self.gains }

    /// Starts turning to `target`, abandoning any goal in progress.
    ///
    /// The robot always turns the short way round, and power is bounded by
    /// `max_power`.
    pub fn turn_to_target_absolute(&self, max_power: f64, target: Angle) {
        let mut goal = self.goal.lock().unwrap_or_else(PoisonError::into_inner);
        info!(
            "Turn started to {:.1} deg at {:.0}% power",
            target.wrapped_positive().convert(DEGREE),
            max_power.abs() * 100.0
        );
        *goal = Some(TurnGoal { max_power, target });
        self.completed.store(false, Ordering::Release);
    }

    /// Whether the last turn has settled on its target.
    pub fn is_completed(&self) -> bool { self.completed.load(Ordering::Acquire) }

    /// Blocks until the turn completes. Never returns for a stalled goal.
    #[cfg(not(target_os = "vexos"))]
    pub fn wait(&self) { super::wait_until(|| self.is_completed(), None); }

    /// Blocks until the turn completes or `timeout` passes. The turn itself is
    /// not cancelled. Returns whether it completed.
    #[cfg(not(target_os = "vexos"))]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        super::wait_until(|| self.is_completed(), Some(timeout))
    }

    /// Waits until the turn completes. Never returns for a stalled goal.
    #[cfg(target_os = "vexos")]
    pub async fn wait(&self) { super::wait_until(|| self.is_completed(), None).await; }

    /// Waits until the turn completes or `timeout` passes. The turn itself is
    /// not cancelled. Returns whether it completed.
    #[cfg(target_os = "vexos")]
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        super::wait_until(|| self.is_completed(), Some(timeout)).await
    }
}

impl Updatable for CampbellTurn {
    fn update(&self) {
        let goal = self.goal.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(goal) = *goal else {
            return;
        };
        if self.completed.load(Ordering::Acquire) {
            return;
        }

        let state = self.odometry.get_state();
        let error = (goal.target - state.pos.theta).wrapped();
        let rate = state.vel.theta;

        if error.abs() < SETTLE_ERROR && rate.abs() < SETTLE_RATE {
            self.chassis.stop();
            self.completed.store(true, Ordering::Release);
            info!("Turn completed at {:.1} deg", state.pos.theta.wrapped_positive().convert(DEGREE));
            return;
        }

        let power = turn_power(self.gains, goal.max_power, error, rate);
        debug!("Turn error {:.2} deg, power {:.3}", error.convert(DEGREE), power);
        self.chassis.set_brake_mode(BrakeMode::Coast);
        self.chassis.drive_arcade(0.0, power);
    }
}
