//! Odometry tracking controller.
//!
//! This module provides [`TwoRotationInertialOdometry`], which estimates the
//! robot's global pose from a forward tracking wheel, a lateral tracking
//! wheel and an inertial sensor.
//!
//! Each update reads all three sensors, corrects the wheel travel for the
//! heading change, converts the arc into a chord and rotates it into the
//! global frame using the heading halfway through the cycle. The new state is
//! published with a single store, so readers always see a whole pose.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rev::motion::{odom::{Odometry, tracker::TwoRotationInertialOdometry}, runner::Runner};
//!
//! let odom = Arc::new(TwoRotationInertialOdometry::new(forward, lateral, imu));
//! odom.reset_position();
//! let _runner = Runner::with_default_period(odom.clone());
//!
//! let pose = odom.get_state().pos;
//! println!("Position: {pose}");
//! ```

use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use log::{debug, warn};

use super::{
    Odometry, OdometryState, PoseVelocity,
    algorithm::*,
    devices::{HeadingSensor, Pose, SensorError, TrackingWheel},
};
use crate::{
    clock::uptime,
    motion::runner::Updatable,
    units::{Angle, Length, Time, consts::SECOND},
};

/// One snapshot of the raw sensor values.
#[derive(Debug, Clone, Copy)]
struct Readings {
    forward: Length,
    lateral: Length,
    heading: Angle,
}

struct Sensors {
    forward:  TrackingWheel,
    lateral:  TrackingWheel,
    imu:      Box<dyn HeadingSensor>,
    /// Baseline for the next delta. `None` until the first good reading.
    previous: Option<Readings>,
    /// Uptime of the previous update, used for the velocity estimate.
    last_update: Option<Duration>,
}

impl Sensors {
    fn read(&mut self) -> Result<Readings, SensorError> {
        let forward = self.forward.travel()?;
        let lateral = self.lateral.travel()?;
        let heading = self.imu.heading()?;
        if !heading.raw().is_finite() {
            return Err(SensorError::InvalidReading);
        }
        Ok(Readings {
            forward,
            lateral,
            heading,
        })
    }
}

/// Pose estimator using two perpendicular tracking wheels and an IMU.
///
/// The forward wheel measures travel along the robot's heading and the
/// lateral wheel measures travel to the robot's right. Heading comes only
/// from the IMU; the wheels never contribute to it.
pub struct TwoRotationInertialOdometry {
    sensors: Mutex<Sensors>,
    state:   Mutex<OdometryState>,
}

impl TwoRotationInertialOdometry {
    /// Creates an estimator starting at the origin.
    ///
    /// The first update only records a baseline, so motion before it is
    /// ignored.
    pub fn new<H: HeadingSensor + 'static>(
        forward: TrackingWheel,
        lateral: TrackingWheel,
        imu: H,
    ) -> Self {
        Self {
            sensors: Mutex::new(Sensors {
                forward,
                lateral,
                imu: Box::new(imu),
                previous: None,
                last_update: None,
            }),
            state:   Mutex::new(OdometryState::default()),
        }
    }

    /// Integrates one cycle of motion that took `dt`.
    ///
    /// [`Updatable::update`] calls this with the measured time since the
    /// previous update. Calling it directly gives a deterministic time step,
    /// which is what simulations and tests want. A zero `dt` keeps the
    /// previous velocity estimate.
    pub fn update_with_dt(&self, dt: Time) {
        let mut sensors = self.sensors.lock().unwrap_or_else(PoisonError::into_inner);
        let readings = match sensors.read() {
            Ok(readings) => readings,
            Err(e) => {
                warn!("Odometry Sensor Error, holding pose: {}", e);
                return;
            }
        };
        let Some(previous) = sensors.previous.replace(readings) else {
            debug!("Odometry baseline recorded");
            return;
        };

        let delta_theta = heading_delta(previous.heading, readings.heading);
        let forward_travel = readings.forward - previous.forward;
        let lateral_travel = readings.lateral - previous.lateral;
        // A heading change with both wheels still is IMU noise, not travel.
        let (local_forward, local_lateral) =
            if forward_travel == Length::zero() && lateral_travel == Length::zero() {
                (Length::zero(), Length::zero())
            } else {
                local_displacement(
                    forward_travel,
                    lateral_travel,
                    delta_theta,
                    sensors.forward.offset,
                    sensors.lateral.offset,
                )
            };

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let average_theta = state.pos.theta + delta_theta / 2.0;
        let (dx, dy) = rotate_vec(local_forward, local_lateral, average_theta);
        let pos = Pose::new(state.pos.x + dx, state.pos.y + dy, state.pos.theta + delta_theta);
        let vel = if dt > Time::zero() {
            PoseVelocity {
                x:     dx / dt,
                y:     dy / dt,
                theta: delta_theta / dt,
            }
        } else {
            state.vel
        };
        *state = OdometryState { pos, vel };
    }
}

impl Odometry for TwoRotationInertialOdometry {
    fn get_state(&self) -> OdometryState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves the estimate to `pose` and re-baselines the sensors.
    fn set_position(&self, pose: Pose) {
        let mut sensors = self.sensors.lock().unwrap_or_else(PoisonError::into_inner);
        sensors.previous = sensors.read().ok();
        sensors.last_update = None;
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = OdometryState {
            pos: pose,
            vel: PoseVelocity::default(),
        };
        debug!("Odometry position set to {}", pose);
    }
}

impl Updatable for TwoRotationInertialOdometry {
    fn update(&self) {
        let now = uptime();
        let dt = {
            let mut sensors = self.sensors.lock().unwrap_or_else(PoisonError::into_inner);
            sensors
                .last_update
                .replace(now)
                .map_or(Duration::ZERO, |last| now.saturating_sub(last))
        };
        self.update_with_dt(Time::from_raw(dt.as_secs_f64(), SECOND));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        config::RobotConfig,
        motion::odom::devices::RotationSensor,
        units::{UnitExt, consts::*},
    };

    /// A sensor whose reading the test sets directly.
    #[derive(Clone)]
    struct Scripted(Arc<Mutex<Result<Angle, SensorError>>>);

    impl Default for Scripted {
        fn default() -> Self { Self(Arc::new(Mutex::new(Ok(Angle::zero())))) }
    }

    impl Scripted {
        fn set(&self, reading: Result<Angle, SensorError>) { *self.0.lock().unwrap() = reading; }
    }

    impl RotationSensor for Scripted {
        fn rotation(&mut self) -> Result<Angle, SensorError> { *self.0.lock().unwrap() }
    }

    impl HeadingSensor for Scripted {
        fn heading(&mut self) -> Result<Angle, SensorError> { *self.0.lock().unwrap() }
    }

    struct Rig {
        odom:    TwoRotationInertialOdometry,
        forward: Scripted,
        lateral: Scripted,
        imu:     Scripted,
    }

    /// 2" wheels, so one radian of wheel rotation is one inch of travel.
    fn rig(forward_offset: Length, lateral_offset: Length) -> Rig {
        let (forward, lateral, imu) =
            (Scripted::default(), Scripted::default(), Scripted::default());
        let odom = TwoRotationInertialOdometry::new(
            TrackingWheel::new(forward.clone(), 2.0.inches(), forward_offset),
            TrackingWheel::new(lateral.clone(), 2.0.inches(), lateral_offset),
            imu.clone(),
        );
        odom.update_with_dt(10.0.millis());
        Rig {
            odom,
            forward,
            lateral,
            imu,
        }
    }

    impl Rig {
        fn step(&self, forward_in: f64, lateral_in: f64, heading_deg: f64) {
            self.forward.set(Ok(forward_in.radians()));
            self.lateral.set(Ok(lateral_in.radians()));
            self.imu.set(Ok(heading_deg.rem_euclid(360.0).degrees()));
            self.odom.update_with_dt(10.0.millis());
        }
    }

    #[test]
    fn straight_drive_along_heading() {
        let rig = rig(Length::zero(), Length::zero());
        for i in 1..=10 {
            rig.step(i as f64 * 2.0, 0.0, 0.0);
        }
        let state = rig.odom.get_state();
        assert_relative_eq!(state.pos.x.convert(INCH), 20.0, epsilon = 1e-9);
        assert_relative_eq!(state.pos.y.convert(INCH), 0.0, epsilon = 1e-9);
        assert_relative_eq!(state.vel.x.convert(INCHES_PER_SECOND), 200.0, epsilon = 1e-6);
    }

    #[test]
    fn heading_90_drives_along_y() {
        let rig = rig(Length::zero(), Length::zero());
        rig.step(0.0, 0.0, 90.0);
        rig.step(10.0, 0.0, 90.0);
        let pos = rig.odom.get_state().pos;
        assert_relative_eq!(pos.x.convert(INCH), 0.0, epsilon = 1e-9);
        assert_relative_eq!(pos.y.convert(INCH), 10.0, epsilon = 1e-9);
        assert_relative_eq!(pos.theta.convert(DEGREE), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn rectangle_loop_returns_home() {
        // Turns happen in place, with the offset wheels rolling as they would
        // on a real robot.
        let (r_f, r_l) = (-1.125, -1.0);
        let rig = rig(r_f.inches(), r_l.inches());
        let (mut forward, mut lateral, mut heading) = (0.0, 0.0, 0.0);
        for _ in 0..4 {
            for _ in 0..20 {
                forward += 1.0;
                rig.step(forward, lateral, heading);
            }
            for _ in 0..9 {
                heading += 10.0;
                let swept = 10f64.to_radians();
                forward -= r_f * swept;
                lateral -= r_l * swept;
                rig.step(forward, lateral, heading);
            }
        }
        let pos = rig.odom.get_state().pos;
        assert_relative_eq!(pos.x.convert(INCH), 0.0, epsilon = 1e-6);
        assert_relative_eq!(pos.y.convert(INCH), 0.0, epsilon = 1e-6);
        assert_relative_eq!(pos.theta.convert(DEGREE), 360.0, epsilon = 1e-6);
        assert_relative_eq!(pos.theta.wrapped().convert(DEGREE), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn heading_accumulates_across_wrap() {
        let rig = rig(Length::zero(), Length::zero());
        for heading in [-10.0, -20.0, -30.0] {
            rig.step(0.0, 0.0, heading);
        }
        assert_relative_eq!(rig.odom.get_state().pos.theta.convert(DEGREE), -30.0, epsilon = 1e-9);
    }

    #[test]
    fn sensor_glitch_holds_pose_then_catches_up() {
        let rig = rig(Length::zero(), Length::zero());
        rig.step(5.0, 0.0, 0.0);
        let before = rig.odom.get_state();

        rig.forward.set(Ok(8.0.radians()));
        rig.imu.set(Err(SensorError::Calibrating));
        rig.odom.update_with_dt(10.0.millis());
        assert_eq!(rig.odom.get_state(), before);

        rig.step(8.0, 0.0, 0.0);
        assert_relative_eq!(rig.odom.get_state().pos.x.convert(INCH), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn set_position_rebaselines() {
        let rig = rig(Length::zero(), Length::zero());
        rig.step(30.0, 0.0, 0.0);
        rig.odom.set_position(Pose::inches(-10.0, 5.0, 0.0));
        assert_eq!(rig.odom.get_state().pos, Pose::inches(-10.0, 5.0, 0.0));

        rig.step(32.0, 0.0, 0.0);
        assert_relative_eq!(rig.odom.get_state().pos.x.convert(INCH), -8.0, epsilon = 1e-9);

        rig.odom.reset_position();
        assert_eq!(rig.odom.get_state().pos, Pose::origin());
    }

    #[test]
    fn zero_dt_keeps_velocity() {
        let rig = rig(Length::zero(), Length::zero());
        rig.step(1.0, 0.0, 0.0);
        let vel = rig.odom.get_state().vel;
        rig.forward.set(Ok(2.0.radians()));
        rig.odom.update_with_dt(Time::zero());
        assert_eq!(rig.odom.get_state().vel, vel);
    }

    #[test]
    fn imu_jitter_with_offset_wheels_holds_position() {
        let config = RobotConfig::default();
        let rig = rig(config.forward_wheel_offset, config.lateral_wheel_offset);
        for heading in [0.0, 3.0, -2.0, 4.0, 1.5, -3.0, 2.5] {
            rig.step(0.0, 0.0, heading);
        }
        let pos = rig.odom.get_state().pos;
        assert_eq!(pos.x, Length::zero());
        assert_eq!(pos.y, Length::zero());
        assert_relative_eq!(pos.theta.convert(DEGREE), 2.5, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn heading_noise_without_travel_holds_position(
            noise in prop::collection::vec(-30.0f64..30.0, 1..50),
        ) {
            let config = RobotConfig::default();
            let rig = rig(config.forward_wheel_offset, config.lateral_wheel_offset);
            for heading in noise {
                rig.step(0.0, 0.0, heading);
            }
            let pos = rig.odom.get_state().pos;
            prop_assert_eq!(pos.x, Length::zero());
            prop_assert_eq!(pos.y, Length::zero());
        }
    }
}
