//! Tracking devices and position types for odometry.
//!
//! This module provides the sensor contracts and data types used by the
//! odometry tracking system. It includes:
//!
//! - **RotationSensor**: Anything that reports an accumulated shaft angle.
//! - **HeadingSensor**: Anything that reports an absolute heading.
//! - **TrackingWheel**: A rotation sensor plus the geometry of its wheel.
//! - **Pose**: A 2D position with heading.
//!
//! # Example
//!
//! ```ignore
//! use rev::motion::odom::devices::TrackingWheel;
//! use rev::units::UnitExt;
//!
//! // 63.89 mm wheel mounted 1.125" left of the centre of rotation.
//! let forward = TrackingWheel::new(forward_sensor, 63.89.millimeters(), -1.125.inches());
//! let lateral = TrackingWheel::new(lateral_sensor, 63.89.millimeters(), -1.0.inches())
//!     .with_reversed(true);
//! ```

use thiserror::Error;

use crate::units::{
    Angle, Length, UnitExt,
    consts::{DEGREE, INCH, RADIAN},
};

/// A reading a sensor adapter could not provide.
///
/// Odometry treats all of these as transient: the cycle is skipped and the
/// pose is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The device is unplugged or not responding on its port.
    #[error("sensor is disconnected")]
    Disconnected,
    /// The device is still calibrating and its output is not usable yet.
    #[error("sensor is calibrating")]
    Calibrating,
    /// The device answered, but the value is not usable (NaN, out of range).
    #[error("sensor returned an invalid reading")]
    InvalidReading,
}

/// A relative rotation sensor, such as a V5 rotation sensor or a 3-wire
/// optical encoder.
pub trait RotationSensor: Send {
    /// Total shaft rotation since the sensor was zeroed. Does not wrap.
    fn rotation(&mut self) -> Result<Angle, SensorError>;
}

/// An absolute heading sensor, such as the V5 inertial sensor.
pub trait HeadingSensor: Send {
    /// Current heading in `[0°, 360°)`, increasing clockwise.
    fn heading(&mut self) -> Result<Angle, SensorError>;
}

/// An unpowered wheel with a rotation sensor, used to measure travel.
///
/// `offset` is the perpendicular distance from the robot's centre of rotation
/// to the wheel's line of travel. For the forward wheel it is measured
/// positive to the right; for the lateral wheel, positive to the rear.
pub struct TrackingWheel {
    /// The sensor measuring wheel rotation.
    pub sensor:         Box<dyn RotationSensor>,
    pub wheel_diameter: Length,
    pub offset:         Length,
    /// Wheel turns per sensor turn. `1.0` for a sensor on the wheel's axle.
    pub gear_ratio:     f64,
    /// Flips the sign of the reading for sensors mounted backwards.
    pub reversed:       bool,
}

impl TrackingWheel {
    /// Creates a directly mounted, non-reversed tracking wheel.
    pub fn new<S: RotationSensor + 'static>(
        sensor: S,
        wheel_diameter: Length,
        offset: Length,
    ) -> Self {
        Self {
            sensor: Box::new(sensor),
            wheel_diameter,
            offset,
            gear_ratio: 1.0,
            reversed: false,
        }
    }

    pub fn with_gear_ratio(mut self, gear_ratio: f64) -> Self {
        self.gear_ratio = gear_ratio;
        self
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Distance the wheel has rolled since its sensor was zeroed.
    pub fn travel(&mut self) -> Result<Length, SensorError> {
        let rotation = self.sensor.rotation()?;
        if !rotation.raw().is_finite() {
            return Err(SensorError::InvalidReading);
        }
        let sign = if self.reversed { -1.0 } else { 1.0 };
        Ok(self.wheel_diameter * (sign * self.gear_ratio * rotation.convert(RADIAN) / 2.0))
    }
}

/// A 2D position with heading.
///
/// Heading is measured clockwise from the +x axis and is not wrapped while
/// it accumulates. Use [`Angle::wrapped`] when presenting or comparing it.
///
/// # Example
///
/// ```
/// use rev::motion::odom::devices::Pose;
/// use rev::units::UnitExt;
///
/// let start = Pose::origin();
/// let target = Pose::new(20.0.inches(), 0.0.inches(), 0.0.degrees());
/// assert!((start.distance_to(&target) - 20.0.inches()).raw().abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x:     Length,
    pub y:     Length,
    pub theta: Angle,
}

impl Pose {
    pub fn new(x: Length, y: Length, theta: Angle) -> Self { Self { x, y, theta } }

    /// Creates a Pose at the origin (0, 0) with heading 0.
    pub fn origin() -> Self { Self::default() }

    /// Builds a pose from inches and degrees.
    pub fn inches(x: f64, y: f64, theta_degrees: f64) -> Self {
        Self::new(x.inches(), y.inches(), theta_degrees.degrees())
    }

    /// Straight-line distance between the two positions, ignoring heading.
    pub fn distance_to(&self, other: &Pose) -> Length { (other.x - self.x).hypot(other.y - self.y) }
}

impl core::fmt::Display for Pose {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "({:.2} in, {:.2} in, {:.1} deg)",
            self.x.convert(INCH),
            self.y.convert(INCH),
            self.theta.convert(DEGREE)
        )
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    struct Fixed(Result<Angle, SensorError>);

    impl RotationSensor for Fixed {
        fn rotation(&mut self) -> Result<Angle, SensorError> { self.0 }
    }

    #[test]
    fn travel_scales_by_radius_ratio_and_direction() {
        let diameter = 2.0.inches();
        let mut wheel = TrackingWheel::new(Fixed(Ok(1.0.rotations())), diameter, 0.0.inches());
        assert_relative_eq!(wheel.travel().unwrap().convert(INCH), 2.0 * PI, epsilon = 1e-9);

        let mut geared = TrackingWheel::new(Fixed(Ok(1.0.rotations())), diameter, 0.0.inches())
            .with_gear_ratio(0.5)
            .with_reversed(true);
        assert_relative_eq!(geared.travel().unwrap().convert(INCH), -PI, epsilon = 1e-9);
    }

    #[test]
    fn travel_rejects_bad_readings() {
        let unplugged = Fixed(Err(SensorError::Disconnected));
        let mut wheel = TrackingWheel::new(unplugged, 2.0.inches(), 0.0.inches());
        assert_eq!(wheel.travel(), Err(SensorError::Disconnected));

        let garbage = Fixed(Ok(Angle::new(f64::NAN)));
        let mut nan = TrackingWheel::new(garbage, 2.0.inches(), 0.0.inches());
        assert_eq!(nan.travel(), Err(SensorError::InvalidReading));
    }

    #[test]
    fn pose_display_uses_field_units() {
        assert_eq!(Pose::inches(20.0, -3.5, 90.0).to_string(), "(20.00 in, -3.50 in, 90.0 deg)");
    }
}
