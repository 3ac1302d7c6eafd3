//! Numeric values and the cross-width numeric order
//!
//! [`NumberValue`] keeps the exact width a number was stored with, but every
//! comparison and hash goes through a widened form: integral widths widen to
//! `i64`, floating widths widen to `f64`. Mixed integral/floating comparison
//! never rounds the integer through `f64`.
//!
//! Rules:
//! - NaN is greater than every other number, including +Infinity, and equal
//!   to itself
//! - `-0.0` equals `0.0`
//! - an integral value equals a floating value iff the double is integral and
//!   denotes exactly the same integer (`5 == 5.0`)

use core::cmp::Ordering;
use core::hash::Hasher;

use crate::writer::ValueWriter;

/// 2^63, the smallest double greater than every `i64`
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

const INTEGRAL_HASH_TAG: u8 = 0;
const FLOATING_HASH_TAG: u8 = 1;

/// A number at its stored width
#[derive(Debug, Clone, Copy)]
pub enum NumberValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

/// Widened form of a number, the only form comparison and hashing look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widened {
    Integral(i64),
    Floating(f64),
}

impl NumberValue {
    /// Check if this is one of the integral widths
    #[inline]
    pub const fn is_integral(&self) -> bool {
        matches!(
            self,
            Self::Byte(_) | Self::Short(_) | Self::Int(_) | Self::Long(_)
        )
    }

    /// Check if this is NaN
    #[inline]
    pub fn is_nan(&self) -> bool {
        match *self {
            Self::Float(v) => v.is_nan(),
            Self::Double(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Value as `i64`
    ///
    /// Floating values truncate toward zero and saturate at the `i64` bounds;
    /// NaN yields 0.
    #[inline]
    pub fn long_value(&self) -> i64 {
        match *self {
            Self::Byte(v) => v.into(),
            Self::Short(v) => v.into(),
            Self::Int(v) => v.into(),
            Self::Long(v) => v,
            Self::Float(v) => v as i64,
            Self::Double(v) => v as i64,
        }
    }

    /// Value as `f64`; longs beyond 2^53 round to the nearest double
    #[inline]
    pub fn double_value(&self) -> f64 {
        match *self {
            Self::Byte(v) => v.into(),
            Self::Short(v) => v.into(),
            Self::Int(v) => v.into(),
            Self::Long(v) => v as f64,
            Self::Float(v) => v.into(),
            Self::Double(v) => v,
        }
    }

    /// Widened form
    #[inline]
    pub fn widen(&self) -> Widened {
        if self.is_integral() {
            Widened::Integral(self.long_value())
        } else {
            Widened::Floating(self.double_value())
        }
    }

    /// Compare two numbers of any widths
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.widen(), other.widen()) {
            (Widened::Integral(a), Widened::Integral(b)) => a.cmp(&b),
            (Widened::Floating(a), Widened::Floating(b)) => compare_floating(a, b),
            (Widened::Integral(a), Widened::Floating(b)) => compare_integral_floating(a, b),
            (Widened::Floating(a), Widened::Integral(b)) => {
                compare_integral_floating(b, a).reverse()
            }
        }
    }

    /// Feed the width-independent hash of this number into `state`
    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        match self.widen() {
            Widened::Integral(v) => hash_integral(v, state),
            Widened::Floating(v) => hash_floating(v, state),
        }
    }

    /// Push this number through the writer method for its width
    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match *self {
            Self::Byte(v) => writer.write_i8(v),
            Self::Short(v) => writer.write_i16(v),
            Self::Int(v) => writer.write_i32(v),
            Self::Long(v) => writer.write_i64(v),
            Self::Float(v) => writer.write_f32(v),
            Self::Double(v) => writer.write_f64(v),
        }
    }
}

/// Compare two doubles: NaN greatest and self-equal, `-0.0 == 0.0`
#[inline]
pub fn compare_floating(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            if a < b {
                Ordering::Less
            } else if a > b {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
    }
}

/// Compare a long with a double without rounding the long
pub fn compare_integral_floating(l: i64, d: f64) -> Ordering {
    if d.is_nan() || d >= TWO_POW_63 {
        return Ordering::Less;
    }
    if d < -TWO_POW_63 {
        return Ordering::Greater;
    }
    // d is in [-2^63, 2^63): its integer part fits an i64 exactly and the
    // fractional part is exactly representable.
    let whole = d.trunc();
    match l.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = d - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        unequal => unequal,
    }
}

pub(crate) fn hash_integral<H: Hasher>(value: i64, state: &mut H) {
    state.write_u8(INTEGRAL_HASH_TAG);
    state.write_i64(value);
}

/// Integral doubles inside the `i64` range hash exactly like that long
pub(crate) fn hash_floating<H: Hasher>(value: f64, state: &mut H) {
    if value.is_nan() {
        state.write_u8(FLOATING_HASH_TAG);
        state.write_u64(f64::NAN.to_bits());
    } else if value.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&value) {
        hash_integral(value as i64, state);
    } else {
        state.write_u8(FLOATING_HASH_TAG);
        state.write_u64(value.to_bits());
    }
}

macro_rules! impl_from_number {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for NumberValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_number! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
}
