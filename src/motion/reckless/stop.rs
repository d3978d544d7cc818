//! Deciding when to slow down and when to brake.

use super::algorithm::SegmentProgress;
use crate::units::{Length, Time, Velocity};

/// Along-line speed under which a robot past its target counts as stopped,
/// 1 in/s.
const SETTLED_SPEED: Velocity = Velocity::new(0.0254);

/// What the robot should do with its power this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopState {
    /// Drive at the nominal power.
    Go,
    /// Drive at reduced power.
    Coast,
    /// Cut power and hold position.
    Brake,
    /// Drive back towards a target the robot has passed, at coast power.
    Return,
}

/// Chooses between driving, coasting in and braking.
pub trait StopCondition: Send + Sync {
    fn stop_state(&self, progress: &SegmentProgress) -> StopState;

    /// Power to use while coasting, given the nominal power.
    fn coast_power(&self, nominal: f64) -> f64 { nominal }
}

/// Brakes and coasts based on the estimated time to arrival.
///
/// Time to arrival is the remaining distance divided by the speed along the
/// segment line. Once it drops under `coast_threshold` power is cut to
/// `coast_power`; under `harsh_threshold`, or once the robot has passed the
/// target, it brakes. While the robot is stationary or moving away it always
/// goes.
///
/// A robot that ends up beyond the far side of the tolerance circle brakes
/// until it has stopped, then returns along the line at `coast_power`, braking
/// again by the same time-to-arrival rule on the way back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleStop {
    pub harsh_threshold: Time,
    pub coast_threshold: Time,
    pub coast_power:     f64,
}

impl SimpleStop {
    pub fn new(harsh_threshold: Time, coast_threshold: Time, coast_power: f64) -> Self {
        Self {
            harsh_threshold,
            coast_threshold,
            coast_power,
        }
    }

    /// Time-to-arrival decision for `distance` left at `speed` towards it.
    fn approach(&self, distance: Length, speed: Velocity) -> StopState {
        if speed <= Velocity::zero() {
            return StopState::Go;
        }
        let time_left: Time = distance / speed;
        if time_left < self.harsh_threshold {
            StopState::Brake
        } else if time_left < self.coast_threshold {
            StopState::Coast
        } else {
            StopState::Go
        }
    }
}

impl StopCondition for SimpleStop {
    fn stop_state(&self, progress: &SegmentProgress) -> StopState {
        if progress.overshoot > Length::zero() {
            return if progress.speed > SETTLED_SPEED {
                StopState::Brake
            } else if progress.speed >= -SETTLED_SPEED {
                StopState::Return
            } else {
                match self.approach(progress.overshoot, -progress.speed) {
                    StopState::Brake => StopState::Brake,
                    _ => StopState::Return,
                }
            };
        }
        if progress.remaining <= Length::zero() {
            return StopState::Brake;
        }
        self.approach(progress.remaining, progress.speed)
    }

    fn coast_power(&self, nominal: f64) -> f64 {
        nominal.abs().min(self.coast_power.abs()).copysign(nominal)
    }
}
