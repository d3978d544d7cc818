//! Compile-time checked physical quantities.
//!
//! Every distance, angle, duration and speed in this crate is a [`Quantity`]
//! tagged with the exponents of its dimension. Mixing incompatible quantities
//! is a type error, so a wheel offset can never be added to a heading and a
//! velocity can never be handed to something that expects a distance.
//!
//! # Example
//!
//! ```
//! use rev::units::{Angle, Length, Time, UnitExt, Velocity, consts::INCHES_PER_SECOND};
//!
//! let distance: Length = 20.0.inches();
//! let elapsed: Time = 2.0.seconds();
//! let speed: Velocity = distance / elapsed;
//! assert!((speed.convert(INCHES_PER_SECOND) - 10.0).abs() < 1e-9);
//!
//! let heading: Angle = 350.0.degrees() + 30.0.degrees();
//! assert!((heading.wrapped().convert(rev::units::consts::DEGREE) - 20.0).abs() < 1e-9);
//! ```
//!
//! Adding quantities of different dimensions does not compile:
//!
//! ```compile_fail
//! use rev::units::UnitExt;
//!
//! let _ = 1.0.inches() + 1.0.seconds();
//! ```

/// Unit constants and the `f64` shorthand trait.
pub mod consts;

/// Powers, roots, rounding and trigonometry.
pub mod math;

/// The [`Quantity`] type and its arithmetic.
pub mod quantity;

pub use consts::UnitExt;
pub use math::{acos, acosh, asin, asinh, atan, atan2, atanh};
pub use quantity::*;
pub use typenum;
