#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rev::{
    drivetrain::{BrakeMode, Chassis},
    motion::{
        odom::{Odometry, OdometryState, Pose},
        reckless::{ConstantMotion, PilonsCorrection, RecklessPath, RecklessPathSegment, SimpleStop},
        runner::Updatable,
    },
    sim::SimulatedRobot,
    units::{Length, UnitExt},
};

/// Odometry whose state is set by the test.
#[derive(Default)]
pub struct FakeOdometry {
    state: Mutex<OdometryState>,
}

impl FakeOdometry {
    pub fn at(pose: Pose) -> Arc<Self> {
        let odom = Arc::new(Self::default());
        odom.set_position(pose);
        odom
    }

    pub fn set_state(&self, state: OdometryState) { *self.state.lock().unwrap() = state; }
}

impl Odometry for FakeOdometry {
    fn get_state(&self) -> OdometryState { *self.state.lock().unwrap() }

    fn set_position(&self, pose: Pose) {
        *self.state.lock().unwrap() = OdometryState {
            pos: pose,
            ..Default::default()
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Tank(f64, f64),
    Mode(BrakeMode),
}

/// Chassis that records every command it receives.
#[derive(Default)]
pub struct RecordingChassis {
    commands: Mutex<Vec<Command>>,
}

impl RecordingChassis {
    pub fn commands(&self) -> Vec<Command> { self.commands.lock().unwrap().clone() }

    pub fn last_tank(&self) -> Option<(f64, f64)> {
        self.commands().into_iter().rev().find_map(|c| match c {
            Command::Tank(l, r) => Some((l, r)),
            Command::Mode(_) => None,
        })
    }

    pub fn clear(&self) { self.commands.lock().unwrap().clear(); }
}

impl Chassis for RecordingChassis {
    fn drive_tank(&self, left: f64, right: f64) { self.commands.lock().unwrap().push(Command::Tank(left, right)); }

    fn set_brake_mode(&self, mode: BrakeMode) { self.commands.lock().unwrap().push(Command::Mode(mode)); }
}

/// A single straight leg at half power, as driven in the autonomous routine.
pub fn leg(x: f64, y: f64, tolerance: Length) -> RecklessPath {
    RecklessPath::new().with_segment(RecklessPathSegment::new(
        ConstantMotion::new(0.5),
        PilonsCorrection::new(4.0, 0.3.inches()),
        SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3),
        Pose::inches(x, y, 0.0),
        tolerance,
    ))
}

/// Steps the robot, then the odometry, then `controller`, once per 10 ms until
/// `done` or `max_steps` run out. Returns the number of steps taken.
pub fn drive_until(
    robot: &SimulatedRobot,
    odom: &rev::motion::odom::TwoRotationInertialOdometry,
    controller: &dyn Updatable,
    done: impl Fn() -> bool,
    max_steps: usize,
) -> usize {
    for step in 0..max_steps {
        if done() {
            return step;
        }
        robot.step(10.0.millis());
        odom.update_with_dt(10.0.millis());
        controller.update();
    }
    max_steps
}
