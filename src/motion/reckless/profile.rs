//! Nominal forward power along a segment.

use super::algorithm::SegmentProgress;
use crate::units::Length;

/// Chooses the nominal power for the current point of a segment.
///
/// Negative power drives the segment in reverse.
pub trait MotionProfile: Send + Sync {
    fn power(&self, progress: &SegmentProgress) -> f64;
}

/// The same power for the whole segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantMotion {
    pub power: f64,
}

impl ConstantMotion {
    pub fn new(power: f64) -> Self { Self { power } }
}

impl MotionProfile for ConstantMotion {
    fn power(&self, _progress: &SegmentProgress) -> f64 { self.power }
}

/// Ramps up from `min_power` after the start and back down before the
/// target.
///
/// Both ramps are square-root shaped, which is the power a constant
/// acceleration reaches over a distance. Off the ends of the segment the
/// profile holds `min_power` so the robot never stalls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampMotion {
    pub max_power: f64,
    pub min_power: f64,
    pub ramp_up:   Length,
    pub ramp_down: Length,
}

impl RampMotion {
    pub fn new(max_power: f64, min_power: f64, ramp_up: Length, ramp_down: Length) -> Self {
        Self {
            max_power,
            min_power,
            ramp_up,
            ramp_down,
        }
    }
}

/// Fraction of a ramp covered after `distance`, shaped as `sqrt`.
fn ramp_fraction(distance: Length, ramp: Length) -> f64 {
    if ramp <= Length::zero() {
        return 1.0;
    }
    (distance / ramp).raw().clamp(0.0, 1.0).sqrt()
}

impl MotionProfile for RampMotion {
    fn power(&self, progress: &SegmentProgress) -> f64 {
        let up = ramp_fraction(progress.travelled, self.ramp_up);
        let down = ramp_fraction(progress.remaining, self.ramp_down);
        let magnitude = (self.max_power.abs() * up.min(down)).max(self.min_power.abs());
        magnitude.copysign(self.max_power)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        motion::odom::{OdometryState, Pose},
        units::UnitExt,
    };

    fn at(x: f64) -> SegmentProgress {
        let state = OdometryState {
            pos: Pose::inches(x, 0.0, 0.0),
            ..Default::default()
        };
        SegmentProgress::new(Pose::origin(), Pose::inches(40.0, 0.0, 0.0), Length::zero(), state)
    }

    #[test]
    fn constant_ignores_progress() {
        let motion = ConstantMotion::new(0.5);
        assert_eq!(motion.power(&at(0.0)), 0.5);
        assert_eq!(motion.power(&at(39.0)), 0.5);
    }

    #[test]
    fn ramp_rises_cruises_and_falls() {
        let motion = RampMotion::new(0.8, 0.1, 10.0.inches(), 10.0.inches());
        assert_relative_eq!(motion.power(&at(0.0)), 0.1);
        assert_relative_eq!(motion.power(&at(2.5)), 0.4, epsilon = 1e-9);
        assert_relative_eq!(motion.power(&at(20.0)), 0.8, epsilon = 1e-9);
        assert_relative_eq!(motion.power(&at(37.5)), 0.4, epsilon = 1e-9);
        assert_relative_eq!(motion.power(&at(45.0)), 0.1);

        let samples: Vec<f64> = (0..=10).map(|i| motion.power(&at(i as f64))).collect();
        assert!(samples.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn reverse_ramp_keeps_sign() {
        let motion = RampMotion::new(-0.6, 0.2, 5.0.inches(), 5.0.inches());
        assert_relative_eq!(motion.power(&at(0.0)), -0.2);
        assert_relative_eq!(motion.power(&at(20.0)), -0.6, epsilon = 1e-9);
    }
}
