//! Steering corrections that pull the robot back onto the segment line.

use super::algorithm::SegmentProgress;
use crate::units::{Length, consts::RADIAN};

/// Chooses a steering adjustment for the current point of a segment.
///
/// Positive steering turns clockwise. Zero means drive straight.
pub trait Correction: Send + Sync {
    fn steering(&self, progress: &SegmentProgress) -> f64;
}

/// Drives straight without correcting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoCorrection;

impl Correction for NoCorrection {
    fn steering(&self, _progress: &SegmentProgress) -> f64 { 0.0 }
}

/// Proportional correction towards the target once the robot drifts off
/// the line.
///
/// While the cross-track error is within `max_error` the robot drives
/// straight. Beyond it, steering is `looks` times the heading error to the
/// target in radians, so a larger `looks` snaps back to the line harder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilonsCorrection {
    pub looks:     f64,
    pub max_error: Length,
}

impl PilonsCorrection {
    pub fn new(looks: f64, max_error: Length) -> Self { Self { looks, max_error } }
}

impl Correction for PilonsCorrection {
    fn steering(&self, progress: &SegmentProgress) -> f64 {
        if progress.cross_track.abs() <= self.max_error {
            return 0.0;
        }
        self.looks * progress.heading_error.convert(RADIAN)
    }
}
