//! Unit constants and the [`UnitExt`] shorthand.
//!
//! Every constant is the quantity representation of "one" of that unit, so
//! `Length::from_raw(20.0, INCH)` builds twenty inches and
//! `distance.convert(INCH)` reads a distance back in inches.

use core::f64::consts::{PI, TAU};

use super::quantity::{
    Acceleration, Angle, AngularVelocity, Frequency, Length, Mass, Number, Time, Velocity,
};

pub const NUMBER: Number = Number::new(1.0);

pub const KILOGRAM: Mass = Mass::new(1.0);
pub const GRAM: Mass = Mass::new(0.001);

pub const METER: Length = Length::new(1.0);
pub const CENTIMETER: Length = Length::new(0.01);
pub const MILLIMETER: Length = Length::new(0.001);
pub const INCH: Length = Length::new(0.0254);
pub const FOOT: Length = Length::new(0.3048);
/// One field tile, 24 inches.
pub const TILE: Length = Length::new(0.6096);

pub const SECOND: Time = Time::new(1.0);
pub const MILLISECOND: Time = Time::new(0.001);
pub const MINUTE: Time = Time::new(60.0);

pub const HERTZ: Frequency = Frequency::new(1.0);

pub const RADIAN: Angle = Angle::new(1.0);
pub const DEGREE: Angle = Angle::new(PI / 180.0);
pub const ROTATION: Angle = Angle::new(TAU);

pub const METERS_PER_SECOND: Velocity = Velocity::new(1.0);
pub const INCHES_PER_SECOND: Velocity = Velocity::new(0.0254);
pub const METERS_PER_SECOND_SQUARED: Acceleration = Acceleration::new(1.0);

pub const RADIANS_PER_SECOND: AngularVelocity = AngularVelocity::new(1.0);
pub const DEGREES_PER_SECOND: AngularVelocity = AngularVelocity::new(PI / 180.0);
pub const RPM: AngularVelocity = AngularVelocity::new(TAU / 60.0);

/// Unit shorthand for plain numbers, e.g. `20.0.inches()` or `90.0.degrees()`.
pub trait UnitExt {
    fn number(self) -> Number;
    fn kilograms(self) -> Mass;
    fn meters(self) -> Length;
    fn centimeters(self) -> Length;
    fn millimeters(self) -> Length;
    fn inches(self) -> Length;
    fn feet(self) -> Length;
    fn tiles(self) -> Length;
    fn seconds(self) -> Time;
    fn millis(self) -> Time;
    fn radians(self) -> Angle;
    fn degrees(self) -> Angle;
    fn rotations(self) -> Angle;
    fn inches_per_second(self) -> Velocity;
    fn degrees_per_second(self) -> AngularVelocity;
    fn rpm(self) -> AngularVelocity;
}

impl UnitExt for f64 {
    fn number(self) -> Number { Number::from_raw(self, NUMBER) }

    fn kilograms(self) -> Mass { Mass::from_raw(self, KILOGRAM) }

    fn meters(self) -> Length { Length::from_raw(self, METER) }

    fn centimeters(self) -> Length { Length::from_raw(self, CENTIMETER) }

    fn millimeters(self) -> Length { Length::from_raw(self, MILLIMETER) }

    fn inches(self) -> Length { Length::from_raw(self, INCH) }

    fn feet(self) -> Length { Length::from_raw(self, FOOT) }

    fn tiles(self) -> Length { Length::from_raw(self, TILE) }

    fn seconds(self) -> Time { Time::from_raw(self, SECOND) }

    fn millis(self) -> Time { Time::from_raw(self, MILLISECOND) }

    fn radians(self) -> Angle { Angle::from_raw(self, RADIAN) }

    fn degrees(self) -> Angle { Angle::from_raw(self, DEGREE) }

    fn rotations(self) -> Angle { Angle::from_raw(self, ROTATION) }

    fn inches_per_second(self) -> Velocity { Velocity::from_raw(self, INCHES_PER_SECOND) }

    fn degrees_per_second(self) -> AngularVelocity {
        AngularVelocity::from_raw(self, DEGREES_PER_SECOND)
    }

    fn rpm(self) -> AngularVelocity { AngularVelocity::from_raw(self, RPM) }
}
