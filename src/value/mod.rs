//! Logical value types a cell can hold.
//!
//! A cell stores its value as raw bits inside a [`Word`](crate::word::Word).
//! The traits here describe what a value type promises about those bits:
//!
//! - [`CellValue`]: the value has a fixed [`Shape`] and its bytes can be read
//!   without padding (`zerocopy::AsBytes`). Every kind requires it.
//! - [`BoolLike`]: zero means false, anything else means true.
//! - [`Ordinal`]: ordinals grow with declaration order, between `MIN` and `MAX`.
//! - [`SetLike`]: bit `i` of the raw pattern is membership of index `i`.
//! - [`Integer`]: plain two's-complement or unsigned integers.

mod bool_repr;
mod flag_set;
mod macros;

use core::fmt;

use num_traits::{
    AsPrimitive, PrimInt, WrappingAdd, WrappingMul, WrappingShl, WrappingShr, WrappingSub,
};
use zerocopy::{AsBytes, FromBytes};

use crate::shape::{Category, Shape};
use crate::word::Word;

pub use bool_repr::{LongBool, WordBool};
pub use flag_set::{FlagIter, FlagSet, OutOfDomain};

/// A value type that can live inside a cell.
///
/// Implementations must report their true byte width in [`SHAPE`](Self::SHAPE);
/// the cell kinds validate it against their storage when they are instantiated.
pub trait CellValue: AsBytes + Copy + Send + Sync + 'static {
    /// Category and width of the type.
    const SHAPE: Shape;
}

/// A boolean-like value: the all-zero pattern is false, every other pattern true.
pub trait BoolLike: CellValue {
    /// Storage word matching the width of the representation.
    type Word: Word;

    /// Canonical true pattern.
    const TRUE: Self;

    /// Canonical false pattern.
    const FALSE: Self;

    /// Converts a `bool` into the canonical pattern.
    #[inline]
    fn from_bool(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }
}

/// An enumeration whose raw ordinals are ordered like its variants.
///
/// Use [`ordinal!`](crate::ordinal) to implement this for a fieldless
/// `#[repr(u8)]`/`#[repr(u16)]`/`#[repr(u32)]` enum deriving `AsBytes`.
pub trait Ordinal: CellValue {
    /// Variant with the lowest ordinal.
    const MIN: Self;

    /// Variant with the highest ordinal.
    const MAX: Self;
}

/// A set of flag indices packed into a word, bit `i` holding index `i`.
///
/// The domain size lives in [`Shape::domain`]; indices run from 0.
pub trait SetLike: CellValue + FromBytes {}

/// A primitive integer usable in arithmetic cells.
pub trait Integer:
    CellValue
    + FromBytes
    + PrimInt
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingShl
    + WrappingShr
    + AsPrimitive<f64>
    + fmt::Debug
    + fmt::Display
{
}

impl CellValue for bool {
    const SHAPE: Shape = Shape::new(Category::Boolean, 1);
}

impl BoolLike for bool {
    type Word = u8;

    const TRUE: Self = true;
    const FALSE: Self = false;

    #[inline]
    fn from_bool(value: bool) -> Self {
        value
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl CellValue for $ty {
            const SHAPE: Shape = Shape::new(Category::Integer, core::mem::size_of::<$ty>());
        }

        impl Integer for $ty {}
    )*};
}

impl_integer!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
