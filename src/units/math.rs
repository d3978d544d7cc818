//! Dimension-aware math on quantities.
//!
//! Powers and roots scale every exponent of the dimension, so their output
//! type is computed by `typenum`. Roots use exact division: taking the square
//! root of a length does not type-check because `1 / 2` is not an integer.
//! Trigonometric functions are only defined for [`Angle`] and produce a
//! [`Number`]; the inverse functions go the other way.

use core::{
    f64::consts::{PI, TAU},
    ops::Mul,
};

use typenum::{
    Integer,
    consts::{P2, P3, Z0},
    operator_aliases::{PartialQuot, Prod},
    type_operators::PartialDiv,
};

use super::quantity::{Angle, Number, Quantity};

impl<M, L, T, A> Quantity<M, L, T, A> {
    /// Absolute value.
    pub fn abs(self) -> Self { Self::new(self.raw().abs()) }

    /// `1.0` for positive quantities, `-1.0` for negative ones.
    pub fn signum(self) -> f64 { self.raw().signum() }

    /// The smaller of two quantities.
    pub fn min(self, other: Self) -> Self { Self::new(self.raw().min(other.raw())) }

    /// The larger of two quantities.
    pub fn max(self, other: Self) -> Self { Self::new(self.raw().max(other.raw())) }

    /// Restricts the quantity to `[min, max]`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(self.raw().clamp(min.raw(), max.raw()))
    }

    /// Length of the hypotenuse with legs `self` and `other`.
    pub fn hypot(self, other: Self) -> Self { Self::new(self.raw().hypot(other.raw())) }

    /// Floating point remainder of `self / divisor`, with the sign of `self`.
    pub fn modulo(self, divisor: Self) -> Self { Self::new(self.raw() % divisor.raw()) }

    /// The magnitude of `self` with the sign of `sign`.
    pub fn copysign<M2, L2, T2, A2>(self, sign: Quantity<M2, L2, T2, A2>) -> Self {
        Self::new(self.raw().copysign(sign.raw()))
    }

    /// Rounds down to a whole multiple of `step`.
    pub fn floor_to(self, step: Self) -> Self {
        Self::new((self.raw() / step.raw()).floor() * step.raw())
    }

    /// Rounds up to a whole multiple of `step`.
    pub fn ceil_to(self, step: Self) -> Self {
        Self::new((self.raw() / step.raw()).ceil() * step.raw())
    }

    /// Rounds to the nearest whole multiple of `step`.
    pub fn round_to(self, step: Self) -> Self {
        Self::new((self.raw() / step.raw()).round() * step.raw())
    }

    /// Rounds towards zero to a whole multiple of `step`.
    pub fn trunc_to(self, step: Self) -> Self {
        Self::new((self.raw() / step.raw()).trunc() * step.raw())
    }

    /// Raises the quantity to the integer power `E`.
    ///
    /// ```
    /// use rev::units::{Area, Length, typenum::P2};
    ///
    /// let side = Length::new(3.0);
    /// let area: Area = side.powi::<P2>();
    /// assert_eq!(area.raw(), 9.0);
    /// ```
    #[allow(clippy::type_complexity)]
    pub fn powi<E: Integer>(self) -> Quantity<Prod<M, E>, Prod<L, E>, Prod<T, E>, Prod<A, E>>
    where
        M: Mul<E>,
        L: Mul<E>,
        T: Mul<E>,
        A: Mul<E>,
    {
        Quantity::new(self.raw().powi(E::to_i32()))
    }

    /// Takes the `E`th root. Only compiles when every exponent divides evenly.
    #[allow(clippy::type_complexity)]
    pub fn root<E: Integer>(
        self,
    ) -> Quantity<PartialQuot<M, E>, PartialQuot<L, E>, PartialQuot<T, E>, PartialQuot<A, E>>
    where
        M: PartialDiv<E>,
        L: PartialDiv<E>,
        T: PartialDiv<E>,
        A: PartialDiv<E>,
    {
        Quantity::new(self.raw().powf(1.0 / E::to_i32() as f64))
    }

    /// Square of the quantity.
    #[allow(clippy::type_complexity)]
    pub fn square(self) -> Quantity<Prod<M, P2>, Prod<L, P2>, Prod<T, P2>, Prod<A, P2>>
    where
        M: Mul<P2>,
        L: Mul<P2>,
        T: Mul<P2>,
        A: Mul<P2>,
    {
        Quantity::new(self.raw() * self.raw())
    }

    /// Cube of the quantity.
    #[allow(clippy::type_complexity)]
    pub fn cube(self) -> Quantity<Prod<M, P3>, Prod<L, P3>, Prod<T, P3>, Prod<A, P3>>
    where
        M: Mul<P3>,
        L: Mul<P3>,
        T: Mul<P3>,
        A: Mul<P3>,
    {
        Quantity::new(self.raw().powi(3))
    }

    /// Square root.
    ///
    /// ```compile_fail
    /// use rev::units::Length;
    ///
    /// // A length has no square root in whole exponents.
    /// let _ = Length::new(4.0).sqrt();
    /// ```
    #[allow(clippy::type_complexity)]
    pub fn sqrt(
        self,
    ) -> Quantity<PartialQuot<M, P2>, PartialQuot<L, P2>, PartialQuot<T, P2>, PartialQuot<A, P2>>
    where
        M: PartialDiv<P2>,
        L: PartialDiv<P2>,
        T: PartialDiv<P2>,
        A: PartialDiv<P2>,
    {
        Quantity::new(self.raw().sqrt())
    }

    /// Cube root.
    #[allow(clippy::type_complexity)]
    pub fn cbrt(
        self,
    ) -> Quantity<PartialQuot<M, P3>, PartialQuot<L, P3>, PartialQuot<T, P3>, PartialQuot<A, P3>>
    where
        M: PartialDiv<P3>,
        L: PartialDiv<P3>,
        T: PartialDiv<P3>,
        A: PartialDiv<P3>,
    {
        Quantity::new(self.raw().cbrt())
    }
}

impl Quantity<Z0, Z0, Z0, typenum::consts::P1> {
    /// Sine.
    ///
    /// ```compile_fail
    /// use rev::units::UnitExt;
    ///
    /// // Only angles have a sine.
    /// let _ = 20.0.inches().sin();
    /// ```
    pub fn sin(self) -> Number { Number::new(self.raw().sin()) }

    /// Cosine.
    pub fn cos(self) -> Number { Number::new(self.raw().cos()) }

    /// Tangent.
    pub fn tan(self) -> Number { Number::new(self.raw().tan()) }

    /// Hyperbolic sine.
    pub fn sinh(self) -> Number { Number::new(self.raw().sinh()) }

    /// Hyperbolic cosine.
    pub fn cosh(self) -> Number { Number::new(self.raw().cosh()) }

    /// Hyperbolic tangent.
    pub fn tanh(self) -> Number { Number::new(self.raw().tanh()) }

    /// `sin(x) / x`, continuous at zero.
    pub fn sinc(self) -> Number {
        let x = self.raw();
        if x == 0.0 { Number::new(1.0) } else { Number::new(x.sin() / x) }
    }

    /// The equivalent angle in `[-180°, 180°)`.
    pub fn wrapped(self) -> Angle { Angle::new((self.raw() + PI).rem_euclid(TAU) - PI) }

    /// The equivalent angle in `[0°, 360°)`.
    pub fn wrapped_positive(self) -> Angle { Angle::new(self.raw().rem_euclid(TAU)) }
}

/// Arcsine.
pub fn asin(x: Number) -> Angle { Angle::new(x.raw().asin()) }

/// Arccosine.
pub fn acos(x: Number) -> Angle { Angle::new(x.raw().acos()) }

/// Arctangent.
pub fn atan(x: Number) -> Angle { Angle::new(x.raw().atan()) }

/// Inverse hyperbolic sine.
pub fn asinh(x: Number) -> Angle { Angle::new(x.raw().asinh()) }

/// Inverse hyperbolic cosine.
pub fn acosh(x: Number) -> Angle { Angle::new(x.raw().acosh()) }

/// Inverse hyperbolic tangent.
pub fn atanh(x: Number) -> Angle { Angle::new(x.raw().atanh()) }

/// Four-quadrant arctangent of `y / x` for any two quantities of one dimension.
pub fn atan2<M, L, T, A>(y: Quantity<M, L, T, A>, x: Quantity<M, L, T, A>) -> Angle {
    Angle::new(y.raw().atan2(x.raw()))
}
