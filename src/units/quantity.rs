//! The dimensioned scalar type and its arithmetic.
//!
//! A [`Quantity`] is a plain `f64` tagged with four `typenum` integers, the
//! exponents of mass, length, time and angle. Addition and comparison are only
//! implemented between identical tags, while multiplication and division add
//! or subtract the exponents. All of this is resolved by the type checker; at
//! runtime a quantity is exactly one `f64`.

use core::{
    cmp::Ordering,
    fmt,
    iter::Sum as IterSum,
    marker::PhantomData,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use typenum::{
    Integer,
    consts::{N1, N2, P1, P2, Z0},
    operator_aliases::{Diff, Negate, Sum},
};

/// A physical quantity with compile-time dimension exponents.
///
/// `M`, `L`, `T` and `A` are the exponents of mass, length, time and angle.
/// The stored magnitude is always expressed in base units (kilogram, metre,
/// second, radian); use [`Quantity::convert`] to read it in any other unit.
pub struct Quantity<M, L, T, A> {
    value:     f64,
    dimension: PhantomData<(M, L, T, A)>,
}

/// A dimensionless number.
pub type Number = Quantity<Z0, Z0, Z0, Z0>;
/// Mass, base unit kilogram.
pub type Mass = Quantity<P1, Z0, Z0, Z0>;
/// Length, base unit metre.
pub type Length = Quantity<Z0, P1, Z0, Z0>;
/// Area, base unit square metre.
pub type Area = Quantity<Z0, P2, Z0, Z0>;
/// Time, base unit second.
pub type Time = Quantity<Z0, Z0, P1, Z0>;
/// Frequency, base unit hertz.
pub type Frequency = Quantity<Z0, Z0, N1, Z0>;
/// Angle, base unit radian.
pub type Angle = Quantity<Z0, Z0, Z0, P1>;
/// Linear velocity, base unit metre per second.
pub type Velocity = Quantity<Z0, P1, N1, Z0>;
/// Linear acceleration, base unit metre per second squared.
pub type Acceleration = Quantity<Z0, P1, N2, Z0>;
/// Angular velocity, base unit radian per second.
pub type AngularVelocity = Quantity<Z0, Z0, N1, P1>;
/// Angular acceleration, base unit radian per second squared.
pub type AngularAcceleration = Quantity<Z0, Z0, N2, P1>;
/// Curvature, base unit radian per metre.
pub type Curvature = Quantity<Z0, N1, Z0, P1>;

impl<M, L, T, A> Quantity<M, L, T, A> {
    /// Creates a quantity from a magnitude in base units.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            dimension: PhantomData,
        }
    }

    /// Creates a quantity of `value` multiples of `unit`.
    ///
    /// # Example
    ///
    /// ```
    /// use rev::units::{Length, consts::INCH};
    ///
    /// let distance = Length::from_raw(20.0, INCH);
    /// assert!((distance.convert(INCH) - 20.0).abs() < 1e-12);
    /// ```
    pub fn from_raw(value: f64, unit: Self) -> Self { Self::new(value * unit.value) }

    /// Returns the magnitude of this quantity expressed in multiples of `unit`.
    pub fn convert(self, unit: Self) -> f64 { self.value / unit.value }

    /// Returns the magnitude in base units.
    pub const fn raw(self) -> f64 { self.value }

    /// The zero quantity of this dimension.
    pub const fn zero() -> Self { Self::new(0.0) }
}

impl<M, L, T, A> Clone for Quantity<M, L, T, A> {
    fn clone(&self) -> Self { *self }
}

impl<M, L, T, A> Copy for Quantity<M, L, T, A> {}

impl<M, L, T, A> Default for Quantity<M, L, T, A> {
    fn default() -> Self { Self::zero() }
}

impl<M, L, T, A> PartialEq for Quantity<M, L, T, A> {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}

impl<M, L, T, A> PartialOrd for Quantity<M, L, T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

fn write_dimension(f: &mut fmt::Formatter<'_>, symbol: &str, exponent: i32) -> fmt::Result {
    match exponent {
        0 => Ok(()),
        1 => write!(f, " {symbol}"),
        e => write!(f, " {symbol}^{e}"),
    }
}

impl<M: Integer, L: Integer, T: Integer, A: Integer> fmt::Display for Quantity<M, L, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value;
        match f.precision() {
            Some(precision) => write!(f, "{value:.precision$}")?,
            None if value != 0.0 && !(1e-4..1e9).contains(&value.abs()) => write!(f, "{value:e}")?,
            None => write!(f, "{value}")?,
        }
        write_dimension(f, "kg", M::to_i32())?;
        write_dimension(f, "m", L::to_i32())?;
        write_dimension(f, "s", T::to_i32())?;
        write_dimension(f, "rad", A::to_i32())
    }
}

impl<M: Integer, L: Integer, T: Integer, A: Integer> fmt::Debug for Quantity<M, L, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(self, f) }
}

impl<M, L, T, A> Add for Quantity<M, L, T, A> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self { Self::new(self.value + rhs.value) }
}

impl<M, L, T, A> Sub for Quantity<M, L, T, A> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self { Self::new(self.value - rhs.value) }
}

impl<M, L, T, A> Neg for Quantity<M, L, T, A> {
    type Output = Self;

    fn neg(self) -> Self { Self::new(-self.value) }
}

impl<M, L, T, A> AddAssign for Quantity<M, L, T, A> {
    fn add_assign(&mut self, rhs: Self) { self.value += rhs.value; }
}

impl<M, L, T, A> SubAssign for Quantity<M, L, T, A> {
    fn sub_assign(&mut self, rhs: Self) { self.value -= rhs.value; }
}

impl<M1, L1, T1, A1, M2, L2, T2, A2> Mul<Quantity<M2, L2, T2, A2>> for Quantity<M1, L1, T1, A1>
where
    M1: Add<M2>,
    L1: Add<L2>,
    T1: Add<T2>,
    A1: Add<A2>,
{
    type Output = Quantity<Sum<M1, M2>, Sum<L1, L2>, Sum<T1, T2>, Sum<A1, A2>>;

    fn mul(self, rhs: Quantity<M2, L2, T2, A2>) -> Self::Output {
        Quantity::new(self.value * rhs.value)
    }
}

impl<M1, L1, T1, A1, M2, L2, T2, A2> Div<Quantity<M2, L2, T2, A2>> for Quantity<M1, L1, T1, A1>
where
    M1: Sub<M2>,
    L1: Sub<L2>,
    T1: Sub<T2>,
    A1: Sub<A2>,
{
    type Output = Quantity<Diff<M1, M2>, Diff<L1, L2>, Diff<T1, T2>, Diff<A1, A2>>;

    fn div(self, rhs: Quantity<M2, L2, T2, A2>) -> Self::Output {
        Quantity::new(self.value / rhs.value)
    }
}

impl<M, L, T, A> Mul<f64> for Quantity<M, L, T, A> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self { Self::new(self.value * rhs) }
}

impl<M, L, T, A> Mul<Quantity<M, L, T, A>> for f64 {
    type Output = Quantity<M, L, T, A>;

    fn mul(self, rhs: Quantity<M, L, T, A>) -> Quantity<M, L, T, A> {
        Quantity::new(self * rhs.value)
    }
}

impl<M, L, T, A> Div<f64> for Quantity<M, L, T, A> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self { Self::new(self.value / rhs) }
}

impl<M, L, T, A> Div<Quantity<M, L, T, A>> for f64
where
    M: Neg,
    L: Neg,
    T: Neg,
    A: Neg,
{
    type Output = Quantity<Negate<M>, Negate<L>, Negate<T>, Negate<A>>;

    fn div(self, rhs: Quantity<M, L, T, A>) -> Self::Output { Quantity::new(self / rhs.value) }
}

impl<M, L, T, A> MulAssign<f64> for Quantity<M, L, T, A> {
    fn mul_assign(&mut self, rhs: f64) { self.value *= rhs; }
}

impl<M, L, T, A> DivAssign<f64> for Quantity<M, L, T, A> {
    fn div_assign(&mut self, rhs: f64) { self.value /= rhs; }
}

impl<M, L, T, A> IterSum for Quantity<M, L, T, A> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self { iter.fold(Self::zero(), |acc, q| acc + q) }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self { Self::new(value) }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self { value.value }
}
