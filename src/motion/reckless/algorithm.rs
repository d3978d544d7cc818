use super::{path::RecklessPathSegment, stop::StopState};
use crate::{
    drivetrain::TankPowers,
    motion::odom::{OdometryState, Pose},
    units::{Angle, Length, Velocity, atan2},
};

/// Where the robot is relative to the active segment.
///
/// This is the only input the motion, correction and stop strategies see, so
/// each of them is a pure function of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProgress {
    /// Pose at which the segment became active.
    pub start:         Pose,
    pub target:        Pose,
    pub state:         OdometryState,
    /// Distance covered along the start-to-target line.
    pub travelled:     Length,
    /// Distance left along the line before the tolerance circle.
    pub remaining:     Length,
    /// Distance along the line past the far side of the tolerance circle.
    pub overshoot:     Length,
    /// Signed distance from the line, positive to the right of it.
    pub cross_track:   Length,
    /// Turn needed to face the target, in `[-180°, 180°)`, positive clockwise.
    pub heading_error: Angle,
    /// Velocity component along the line, positive towards the target.
    pub speed:         Velocity,
}

impl SegmentProgress {
    pub fn new(start: Pose, target: Pose, tolerance: Length, state: OdometryState) -> Self {
        let pos = state.pos;
        let length = start.distance_to(&target);
        // A zero-length segment has no line; measure along the robot's heading.
        let (ux, uy) = if length > Length::zero() {
            (((target.x - start.x) / length).raw(), ((target.y - start.y) / length).raw())
        } else {
            (pos.theta.cos().raw(), pos.theta.sin().raw())
        };
        let (dx, dy) = (pos.x - start.x, pos.y - start.y);
        let travelled = dx * ux + dy * uy;
        let bearing = atan2(target.y - pos.y, target.x - pos.x);

        Self {
            start,
            target,
            state,
            travelled,
            remaining: length - travelled - tolerance,
            overshoot: travelled - length - tolerance,
            cross_track: dy * ux - dx * uy,
            heading_error: (bearing - pos.theta).wrapped(),
            speed: state.vel.x * ux + state.vel.y * uy,
        }
    }

    /// The same progress with the heading error measured from the robot's
    /// rear, for driving a segment in reverse.
    pub fn from_rear(mut self) -> Self {
        self.heading_error = (self.heading_error + Angle::new(core::f64::consts::PI)).wrapped();
        self
    }
}

/// What the chassis should do this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentCommand {
    Drive(TankPowers),
    Brake,
}

/// Applies `steering` to `power` by attenuating the inside side.
///
/// Positive steering turns clockwise: driving forwards that slows the right
/// side to `power * e^-s`, driving backwards it slows the left side.
pub fn steer(power: f64, steering: f64) -> TankPowers {
    let attenuated = power * (-steering.abs()).exp();
    let slow_right = (steering > 0.0) == (power >= 0.0);
    if steering == 0.0 {
        TankPowers::new(power, power)
    } else if slow_right {
        TankPowers::new(power, attenuated)
    } else {
        TankPowers::new(attenuated, power)
    }
}

/// Runs the segment's strategies against `progress`.
pub fn segment_command(segment: &RecklessPathSegment, progress: &SegmentProgress) -> SegmentCommand {
    let nominal = segment.motion.power(progress);
    let power = match segment.stop.stop_state(progress) {
        StopState::Brake => return SegmentCommand::Brake,
        StopState::Coast => segment.stop.coast_power(nominal),
        StopState::Go => nominal,
        StopState::Return => -segment.stop.coast_power(nominal),
    };
    let steering = if power < 0.0 {
        segment.correction.steering(&progress.from_rear())
    } else {
        segment.correction.steering(progress)
    };
    SegmentCommand::Drive(steer(power, steering))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        motion::{
            odom::PoseVelocity,
            reckless::{ConstantMotion, NoCorrection, PilonsCorrection, SimpleStop},
        },
        units::{UnitExt, consts::*},
    };

    fn progress_at(pose: Pose, vel: PoseVelocity) -> SegmentProgress {
        SegmentProgress::new(
            Pose::inches(0.0, 0.0, 0.0),
            Pose::inches(20.0, 0.0, 0.0),
            Length::zero(),
            OdometryState { pos: pose, vel },
        )
    }

    #[test]
    fn progress_along_an_axis() {
        let vel = PoseVelocity {
            x: 10.0.inches_per_second(),
            y: 3.0.inches_per_second(),
            ..Default::default()
        };
        let p = progress_at(Pose::inches(5.0, 2.0, 0.0), vel);
        assert_relative_eq!(p.travelled.convert(INCH), 5.0, epsilon = 1e-9);
        assert_relative_eq!(p.remaining.convert(INCH), 15.0, epsilon = 1e-9);
        assert_relative_eq!(p.overshoot.convert(INCH), -15.0, epsilon = 1e-9);
        assert_relative_eq!(p.cross_track.convert(INCH), 2.0, epsilon = 1e-9);
        assert_relative_eq!(p.speed.convert(INCHES_PER_SECOND), 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.heading_error.convert(RADIAN), (-2.0f64 / 15.0).atan(), epsilon = 1e-9);
    }

    #[test]
    fn progress_on_a_diagonal() {
        let p = SegmentProgress::new(
            Pose::inches(0.0, 0.0, 0.0),
            Pose::inches(10.0, 10.0, 0.0),
            1.0.inches(),
            OdometryState {
                pos: Pose::inches(5.0, 5.0, 45.0),
                ..Default::default()
            },
        );
        let half = 50f64.sqrt();
        assert_relative_eq!(p.travelled.convert(INCH), half, epsilon = 1e-9);
        assert_relative_eq!(p.remaining.convert(INCH), half - 1.0, epsilon = 1e-9);
        assert_relative_eq!(p.cross_track.convert(INCH), 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.heading_error.convert(DEGREE), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn heading_error_wraps_from_rear() {
        let p = progress_at(Pose::inches(0.0, 0.0, 170.0), PoseVelocity::default());
        assert_relative_eq!(p.heading_error.convert(DEGREE), -170.0, epsilon = 1e-9);
        assert_relative_eq!(p.from_rear().heading_error.convert(DEGREE), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn steering_attenuates_inside_side() {
        assert_eq!(steer(0.5, 0.0), TankPowers::new(0.5, 0.5));

        let right = steer(0.5, 1.0);
        assert_eq!(right.left, 0.5);
        assert_relative_eq!(right.right, 0.5 * (-1.0f64).exp());

        let left = steer(0.5, -1.0);
        assert_relative_eq!(left.left, 0.5 * (-1.0f64).exp());
        assert_eq!(left.right, 0.5);

        let reverse = steer(-0.5, 1.0);
        assert_relative_eq!(reverse.left, -0.5 * (-1.0f64).exp());
        assert_eq!(reverse.right, -0.5);
    }

    #[test]
    fn command_follows_stop_state() {
        let segment = RecklessPathSegment::new(
            ConstantMotion::new(0.5),
            NoCorrection,
            SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3),
            Pose::inches(20.0, 0.0, 0.0),
            Length::zero(),
        );
        let vel = |ips: f64| PoseVelocity {
            x: ips.inches_per_second(),
            ..Default::default()
        };

        let far = progress_at(Pose::inches(1.0, 0.0, 0.0), vel(30.0));
        assert_eq!(segment_command(&segment, &far), SegmentCommand::Drive(TankPowers::new(0.5, 0.5)));

        let near = progress_at(Pose::inches(17.0, 0.0, 0.0), vel(30.0));
        assert_eq!(segment_command(&segment, &near), SegmentCommand::Drive(TankPowers::new(0.3, 0.3)));

        let past = progress_at(Pose::inches(20.2, 0.0, 0.0), vel(30.0));
        assert_eq!(segment_command(&segment, &past), SegmentCommand::Brake);

        let stopped_past = progress_at(Pose::inches(20.2, 0.0, 0.0), vel(0.0));
        assert_eq!(
            segment_command(&segment, &stopped_past),
            SegmentCommand::Drive(TankPowers::new(-0.3, -0.3))
        );
    }

    #[test]
    fn command_steers_back_to_line() {
        let segment = RecklessPathSegment::new(
            ConstantMotion::new(0.5),
            PilonsCorrection::new(4.0, 0.3.inches()),
            SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3),
            Pose::inches(20.0, 0.0, 0.0),
            Length::zero(),
        );
        // Right of the line: the left side slows to turn back.
        let progress = progress_at(Pose::inches(5.0, 1.0, 0.0), PoseVelocity::default());
        let SegmentCommand::Drive(powers) = segment_command(&segment, &progress) else {
            panic!("expected a drive command");
        };
        assert!(powers.left < powers.right);
        assert_eq!(powers.right, 0.5);
    }
}
