//! The competition autonomous routine, run against the simulated robot.
//!
//! Drives 20" forward, then turns to face 90°, logging to the console and to
//! `log.txt`.

use std::{sync::Arc, time::Duration};

use log::{LevelFilter, info, warn};
use rev::{
    config::RobotConfig,
    fs::logger,
    motion::{
        odom::{Odometry, Pose},
        reckless::{ConstantMotion, PilonsCorrection, Reckless, RecklessPath, RecklessPathSegment, SimpleStop},
        runner::Runner,
        turn::CampbellTurn,
    },
    sim::{SimConfig, SimulatedRobot},
    units::UnitExt,
};

const GOAL_TIMEOUT: Duration = Duration::from_secs(10);

fn main() {
    if let Err(e) = logger::init_with_file(LevelFilter::Info, "log.txt") {
        eprintln!("Logger init failed: {e}");
    }

    let config = RobotConfig::default();
    let robot = Arc::new(SimulatedRobot::new(SimConfig::from_robot(&config)));
    let chassis = Arc::new(robot.chassis());
    let odom = Arc::new(robot.odometry());
    odom.reset_position();

    let turn = Arc::new(CampbellTurn::new(chassis.clone(), odom.clone(), config.turn_gains));
    let reckless = Arc::new(Reckless::new(chassis, odom.clone()));

    let _sim_runner = Runner::with_default_period(robot.clone());
    let _odom_runner = Runner::with_default_period(odom.clone());
    let _reckless_runner = Runner::with_default_period(reckless.clone());
    let _turn_runner = Runner::with_default_period(turn.clone());

    reckless.go(RecklessPath::new().with_segment(RecklessPathSegment::new(
        ConstantMotion::new(0.5),                             // 50% power
        PilonsCorrection::new(4.0, 0.3.inches()),             // correct beyond 0.3"
        SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3), // coast at 30%, then brake
        Pose::inches(20.0, 0.0, 0.0),
        0.5.inches(),
    )));
    if !reckless.wait_timeout(GOAL_TIMEOUT) {
        warn!("Drive did not finish in time");
    }

    turn.turn_to_target_absolute(0.7, 90.0.degrees());
    if !turn.wait_timeout(GOAL_TIMEOUT) {
        warn!("Turn did not finish in time");
    }

    info!("Estimated pose: {}", odom.get_state().pos);
    info!("Actual pose:    {}", robot.true_pose());
    log::logger().flush();
}
