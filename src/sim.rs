//! A simulated skid-steer robot.
//!
//! [`SimulatedRobot`] integrates a simple differential drive model so the
//! odometry and the controllers can run without hardware. Motor power sets a
//! target wheel speed, which each side approaches with a first-order lag. The
//! body then follows the exact arc for the step, and the tracking wheels and
//! IMU report what they would have seen from that motion.
//!
//! The sensor and motor handles implement the same adapter traits as the V5
//! devices, so the real estimator and chassis drive the simulation unchanged.
//!
//! # Example
//!
//! ```
//! use rev::{
//!     drivetrain::Chassis,
//!     motion::odom::Odometry,
//!     sim::SimulatedRobot,
//!     units::{UnitExt, consts::INCH},
//! };
//!
//! let robot = SimulatedRobot::default();
//! let chassis = robot.chassis();
//! let odom = robot.odometry();
//!
//! chassis.drive_tank(0.5, 0.5);
//! for _ in 0..100 {
//!     robot.step(10.0.millis());
//!     odom.update_with_dt(10.0.millis());
//! }
//! assert!(odom.get_state().pos.x.convert(INCH) > 10.0);
//! ```

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use crate::{
    config::RobotConfig,
    drivetrain::{BrakeMode, MotorGroup, SkidSteerChassis},
    motion::{
        odom::{HeadingSensor, Pose, RotationSensor, SensorError, TwoRotationInertialOdometry},
        runner::Updatable,
    },
    units::{Angle, Length, Time, UnitExt, Velocity, consts::SECOND},
};

/// Constants of the simulated robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Distance between the left and right drive wheels.
    pub track_width:             Length,
    /// Wheel speed at full power.
    pub max_wheel_speed:         Velocity,
    /// Time constant of the wheels following a power change.
    pub time_constant:           Time,
    /// Time constant of the wheels stopping under brake or hold.
    pub brake_time_constant:     Time,
    pub tracking_wheel_diameter: Length,
    /// Distance of the forward tracking wheel to the right of centre.
    pub forward_wheel_offset:    Length,
    /// Distance of the lateral tracking wheel behind centre.
    pub lateral_wheel_offset:    Length,
    /// Step taken on every [`Updatable::update`].
    pub period:                  Duration,
}

impl SimConfig {
    /// A simulation of the robot described by `robot`.
    pub fn from_robot(robot: &RobotConfig) -> Self {
        Self {
            tracking_wheel_diameter: robot.wheel_diameter,
            forward_wheel_offset: robot.forward_wheel_offset,
            lateral_wheel_offset: robot.lateral_wheel_offset,
            ..Self::default()
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let robot = RobotConfig::default();
        Self {
            track_width:             12.0.inches(),
            max_wheel_speed:         60.0.inches_per_second(),
            time_constant:           0.1.seconds(),
            brake_time_constant:     0.03.seconds(),
            tracking_wheel_diameter: robot.wheel_diameter,
            forward_wheel_offset:    robot.forward_wheel_offset,
            lateral_wheel_offset:    robot.lateral_wheel_offset,
            period:                  Duration::from_millis(10),
        }
    }
}

/// One of the simulated sensors, for fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimSensor {
    Forward,
    Lateral,
    Imu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default)]
struct Wheel {
    power: f64,
    mode:  BrakeMode,
    speed: Velocity,
}

impl Wheel {
    fn step(&mut self, config: &SimConfig, dt: Time) {
        let holding = self.power == 0.0 && self.mode != BrakeMode::Coast;
        let tau = if holding { config.brake_time_constant } else { config.time_constant };
        let target = config.max_wheel_speed * self.power;
        let blend = 1.0 - (-(dt / tau).raw()).exp();
        self.speed += (target - self.speed) * blend;
    }
}

#[derive(Debug, Default)]
struct SimState {
    pose:           Pose,
    left:           Wheel,
    right:          Wheel,
    forward_travel: Length,
    lateral_travel: Length,
    forward_fault:  Option<SensorError>,
    lateral_fault:  Option<SensorError>,
    imu_fault:      Option<SensorError>,
}

impl SimState {
    fn wheel(&mut self, side: Side) -> &mut Wheel {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// The simulated robot. Clones share the same state.
#[derive(Clone)]
pub struct SimulatedRobot {
    config: SimConfig,
    state:  Arc<Mutex<SimState>>,
}

impl Default for SimulatedRobot {
    fn default() -> Self { Self::new(SimConfig::default()) }
}

impl SimulatedRobot {
    /// A robot standing still at the origin.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(SimState::default())),
        }
    }

    pub fn config(&self) -> &SimConfig { &self.config }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advances the simulation by `dt`.
    pub fn step(&self, dt: Time) {
        if dt <= Time::zero() {
            return;
        }
        let config = &self.config;
        let mut state = self.lock();
        state.left.step(config, dt);
        state.right.step(config, dt);

        let (left, right) = (state.left.speed, state.right.speed);
        let distance = (left + right) * dt / 2.0;
        // Left faster than right turns clockwise, which is positive.
        let turn = Angle::new(((left - right) * dt / config.track_width).raw());

        let chord = distance * (turn / 2.0).sinc().raw();
        let mid = state.pose.theta + turn / 2.0;
        state.pose.x += chord * mid.cos().raw();
        state.pose.y += chord * mid.sin().raw();
        state.pose.theta += turn;

        // The wheels sit off the centre of rotation, so turning rolls them too.
        let turn_rad = turn.raw();
        state.forward_travel += distance - config.forward_wheel_offset * turn_rad;
        state.lateral_travel -= config.lateral_wheel_offset * turn_rad;
    }

    /// Where the robot actually is. Heading is not wrapped.
    pub fn true_pose(&self) -> Pose { self.lock().pose }

    /// Moves the robot without rolling its wheels, as if it was picked up.
    pub fn place(&self, pose: Pose) {
        let mut state = self.lock();
        state.pose = pose;
        state.left.speed = Velocity::zero();
        state.right.speed = Velocity::zero();
    }

    /// Current (left, right) wheel speeds.
    pub fn wheel_speeds(&self) -> (Velocity, Velocity) {
        let state = self.lock();
        (state.left.speed, state.right.speed)
    }

    /// Makes `sensor` report `fault` until it is cleared with `None`.
    pub fn set_sensor_fault(&self, sensor: SimSensor, fault: Option<SensorError>) {
        let mut state = self.lock();
        match sensor {
            SimSensor::Forward => state.forward_fault = fault,
            SimSensor::Lateral => state.lateral_fault = fault,
            SimSensor::Imu => state.imu_fault = fault,
        }
    }

    pub fn forward_sensor(&self) -> SimRotationSensor { self.rotation_sensor(SimSensor::Forward) }

    pub fn lateral_sensor(&self) -> SimRotationSensor { self.rotation_sensor(SimSensor::Lateral) }

    fn rotation_sensor(&self, sensor: SimSensor) -> SimRotationSensor {
        SimRotationSensor {
            state: Arc::clone(&self.state),
            sensor,
            radius: self.config.tracking_wheel_diameter / 2.0,
        }
    }

    pub fn imu(&self) -> SimHeadingSensor {
        SimHeadingSensor {
            state: Arc::clone(&self.state),
        }
    }

    pub fn left_motors(&self) -> SimMotorGroup { self.motor_group(Side::Left) }

    pub fn right_motors(&self) -> SimMotorGroup { self.motor_group(Side::Right) }

    fn motor_group(&self, side: Side) -> SimMotorGroup {
        SimMotorGroup {
            state: Arc::clone(&self.state),
            side,
        }
    }

    /// A chassis driving this robot's motors.
    pub fn chassis(&self) -> SkidSteerChassis {
        SkidSteerChassis::new(self.left_motors(), self.right_motors())
    }

    /// An estimator reading this robot's tracking wheels and IMU.
    pub fn odometry(&self) -> TwoRotationInertialOdometry {
        let robot = RobotConfig {
            wheel_diameter: self.config.tracking_wheel_diameter,
            forward_wheel_offset: self.config.forward_wheel_offset,
            lateral_wheel_offset: self.config.lateral_wheel_offset,
            ..RobotConfig::default()
        };
        TwoRotationInertialOdometry::new(
            robot.forward_wheel(self.forward_sensor()),
            robot.lateral_wheel(self.lateral_sensor()),
            self.imu(),
        )
    }
}

impl Updatable for SimulatedRobot {
    fn update(&self) { self.step(Time::from_raw(self.config.period.as_secs_f64(), SECOND)); }
}

/// A simulated tracking wheel sensor.
pub struct SimRotationSensor {
    state:  Arc<Mutex<SimState>>,
    sensor: SimSensor,
    radius: Length,
}

impl RotationSensor for SimRotationSensor {
    fn rotation(&mut self) -> Result<Angle, SensorError> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (travel, fault) = match self.sensor {
            SimSensor::Lateral => (state.lateral_travel, state.lateral_fault),
            _ => (state.forward_travel, state.forward_fault),
        };
        match fault {
            Some(e) => Err(e),
            None => Ok(Angle::new((travel / self.radius).raw())),
        }
    }
}

/// A simulated inertial sensor. Reports heading in `[0°, 360°)`.
pub struct SimHeadingSensor {
    state: Arc<Mutex<SimState>>,
}

impl HeadingSensor for SimHeadingSensor {
    fn heading(&mut self) -> Result<Angle, SensorError> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.imu_fault {
            Some(e) => Err(e),
            None => Ok(state.pose.theta.wrapped_positive()),
        }
    }
}

/// One side of the simulated drivetrain.
pub struct SimMotorGroup {
    state: Arc<Mutex<SimState>>,
    side:  Side,
}

impl MotorGroup for SimMotorGroup {
    fn set_power(&mut self, power: f64) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.wheel(self.side).power = power.clamp(-1.0, 1.0);
    }

    fn set_brake_mode(&mut self, mode: BrakeMode) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.wheel(self.side).mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        drivetrain::Chassis,
        units::consts::{DEGREE, INCH, INCHES_PER_SECOND},
    };

    fn run(robot: &SimulatedRobot, seconds: f64) {
        for _ in 0..(seconds * 100.0).round() as usize {
            robot.step(10.0.millis());
        }
    }

    #[test]
    fn wheels_approach_commanded_speed() {
        let robot = SimulatedRobot::default();
        robot.chassis().drive_tank(0.5, 0.5);
        run(&robot, 1.0);
        let (left, right) = robot.wheel_speeds();
        assert_relative_eq!(left.convert(INCHES_PER_SECOND), 30.0, epsilon = 0.01);
        assert_eq!(left, right);
        let pose = robot.true_pose();
        assert!(pose.x.convert(INCH) > 20.0);
        assert_relative_eq!(pose.y.convert(INCH), 0.0);
    }

    #[test]
    fn left_faster_turns_clockwise() {
        let robot = SimulatedRobot::default();
        robot.chassis().drive_arcade(0.0, 0.5);
        run(&robot, 0.5);
        let pose = robot.true_pose();
        assert!(pose.theta > Angle::zero());
        assert_relative_eq!(pose.x.convert(INCH), 0.0, epsilon = 1e-9);
        assert_relative_eq!(pose.y.convert(INCH), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn turning_in_place_rolls_offset_wheels() {
        let robot = SimulatedRobot::default();
        robot.chassis().drive_arcade(0.0, 0.5);
        run(&robot, 0.5);
        let turned = robot.true_pose().theta.raw();
        let state = robot.lock();
        // Forward wheel is left of centre, so it rolls forward on a clockwise turn.
        assert_relative_eq!(state.forward_travel.convert(INCH), 1.125 * turned, epsilon = 1e-9);
        assert_relative_eq!(state.lateral_travel.convert(INCH), 1.0 * turned, epsilon = 1e-9);
    }

    #[test]
    fn imu_wraps_and_faults() {
        let robot = SimulatedRobot::default();
        robot.place(Pose::inches(0.0, 0.0, -10.0));
        let mut imu = robot.imu();
        assert_relative_eq!(imu.heading().expect("heading").convert(DEGREE), 350.0, epsilon = 1e-9);

        robot.set_sensor_fault(SimSensor::Imu, Some(SensorError::Disconnected));
        assert_eq!(imu.heading(), Err(SensorError::Disconnected));
        robot.set_sensor_fault(SimSensor::Imu, None);
        assert!(imu.heading().is_ok());
    }

    #[test]
    fn braking_stops_faster_than_coasting() {
        let coast = SimulatedRobot::default();
        let brake = SimulatedRobot::default();
        for robot in [&coast, &brake] {
            robot.chassis().drive_tank(1.0, 1.0);
            run(robot, 1.0);
        }
        coast.chassis().drive_tank(0.0, 0.0);
        brake.chassis().stop();
        run(&coast, 0.1);
        run(&brake, 0.1);
        assert!(brake.wheel_speeds().0 < coast.wheel_speeds().0);
    }
}
