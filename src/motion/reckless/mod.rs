//! Straight-segment path following.
//!
//! [`Reckless`] drives a [`RecklessPath`], one straight segment at a time.
//! Each segment is composed of three independent strategies:
//!
//! - a [`MotionProfile`] choosing the nominal power,
//! - a [`Correction`] steering back onto the segment line,
//! - a [`StopCondition`] deciding when to coast in and when to brake.
//!
//! All three only see a [`SegmentProgress`] snapshot, so they can be tested
//! without hardware and swapped per segment.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rev::motion::{odom::Pose, reckless::*, runner::Runner};
//! use rev::units::UnitExt;
//!
//! let reckless = Arc::new(Reckless::new(chassis.clone(), odom.clone()));
//! let _runner = Runner::with_default_period(reckless.clone());
//!
//! reckless.go(RecklessPath::new().with_segment(RecklessPathSegment::new(
//!     ConstantMotion::new(0.5),                              // 50% power
//!     PilonsCorrection::new(4.0, 0.3.inches()),              // correct beyond 0.3"
//!     SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3),  // coast at 30%, then brake
//!     Pose::inches(20.0, 0.0, 0.0),
//!     0.5.inches(),
//! )));
//! reckless.wait();
//! ```

mod algorithm;

/// Nominal power profiles.
pub mod profile;

/// Cross-track corrections.
pub mod correction;

/// Coast and brake decisions.
pub mod stop;

/// Paths and their segments.
pub mod path;

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use log::{debug, info};

pub use self::{
    algorithm::{SegmentCommand, SegmentProgress, segment_command, steer},
    correction::{Correction, NoCorrection, PilonsCorrection},
    path::{RecklessPath, RecklessPathSegment},
    profile::{ConstantMotion, MotionProfile, RampMotion},
    stop::{SimpleStop, StopCondition, StopState},
};
use crate::{
    drivetrain::{BrakeMode, Chassis},
    motion::{
        odom::{Odometry, Pose},
        runner::Updatable,
    },
};

/// The goal currently being driven.
#[derive(Default)]
struct Goal {
    path:  RecklessPath,
    /// Index of the active segment.
    index: usize,
    /// Pose at which the active segment became active.
    start: Pose,
}

/// Path follower for [`RecklessPath`]s.
///
/// Call [`Reckless::go`] to submit a path and let a
/// [`Runner`](crate::motion::runner::Runner) call [`Updatable::update`]. Before
/// the first goal the follower is idle and reports itself completed.
pub struct Reckless {
    chassis:   Arc<dyn Chassis>,
    odometry:  Arc<dyn Odometry>,
    goal:      Mutex<Goal>,
    completed: AtomicBool,
}

impl Reckless {
    pub fn new(chassis: Arc<dyn Chassis>, odometry: Arc<dyn Odometry>) -> Self {
        Self {
            chassis,
            odometry,
            goal: Mutex::new(Goal::default()),
            completed: AtomicBool::new(true),
        }
    }

    /// Starts driving `path`, abandoning any goal in progress.
    ///
    /// The first segment starts from the current pose. An empty path
    /// completes immediately without touching the chassis.
    pub fn go(&self, path: RecklessPath) {
        let mut goal = self.goal.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.completed.load(Ordering::Acquire) {
            info!("Reckless goal replaced before completion");
        }
        let start = self.odometry.get_state().pos;
        info!("Reckless goal started: {} segment(s) from {}", path.len(), start);
        let empty = path.is_empty();
        *goal = Goal {
            path,
            index: 0,
            start,
        };
        self.completed.store(empty, Ordering::Release);
    }

    /// Whether the last submitted path has been driven to the end.
    pub fn is_completed(&self) -> bool { self.completed.load(Ordering::Acquire) }

    /// Blocks until the goal completes. Never returns for a stalled goal.
    #[cfg(not(target_os = "vexos"))]
    pub fn wait(&self) { super::wait_until(|| self.is_completed(), None); }

    /// Blocks until the goal completes or `timeout` passes. The goal itself is
    /// not cancelled. Returns whether it completed.
    #[cfg(not(target_os = "vexos"))]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        super::wait_until(|| self.is_completed(), Some(timeout))
    }

    /// Waits until the goal completes. Never returns for a stalled goal.
    #[cfg(target_os = "vexos")]
    pub async fn wait(&self) { super::wait_until(|| self.is_completed(), None).await; }

    /// Waits until the goal completes or `timeout` passes. The goal itself is
    /// not cancelled. Returns whether it completed.
    #[cfg(target_os = "vexos")]
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        super::wait_until(|| self.is_completed(), Some(timeout)).await
    }
}

impl Updatable for Reckless {
    fn update(&self) {
        let mut goal = self.goal.lock().unwrap_or_else(PoisonError::into_inner);
        if self.completed.load(Ordering::Acquire) {
            return;
        }
        let state = self.odometry.get_state();

        let Some(segment) = goal.path.segments().get(goal.index) else {
            return;
        };
        if state.pos.distance_to(&segment.target) <= segment.tolerance {
            goal.index += 1;
            if goal.index >= goal.path.len() {
                self.chassis.stop();
                self.completed.store(true, Ordering::Release);
                info!("Reckless goal completed at {}", state.pos);
                return;
            }
            debug!("Reckless segment {} reached at {}", goal.index, state.pos);
            goal.start = state.pos;
        }

        let segment = &goal.path.segments()[goal.index];
        let progress = SegmentProgress::new(goal.start, segment.target, segment.tolerance, state);
        match segment_command(segment, &progress) {
            SegmentCommand::Brake => self.chassis.stop(),
            SegmentCommand::Drive(powers) => {
                self.chassis.set_brake_mode(BrakeMode::Coast);
                self.chassis.drive_tank(powers.left, powers.right);
            }
        }
    }
}
