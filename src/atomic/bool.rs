use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not};

use zerocopy::FromZeroes;

use super::core::RawCell;
use crate::shape::{require_shape, Category, Shape};
use crate::value::BoolLike;
use num_traits::Zero;

/// An atomic boolean-like cell.
///
/// The storage word is picked by the representation: `bool` lives in a `u8`,
/// [`WordBool`](crate::WordBool) in a `u16`, [`LongBool`](crate::LongBool) in a
/// `u32`. Logical operators look only at whether the raw pattern is zero, so a
/// cell holding `WordBool(1)` and one holding `WordBool::TRUE` are both true.
///
/// Binary operators read each operand on its own; see the crate docs on
/// snapshot combination.
#[repr(transparent)]
pub struct AtomicBoolCell<T: BoolLike> {
    raw: RawCell<T, T::Word>,
}

impl<T: BoolLike> AtomicBoolCell<T> {
    /// Validated shape of `T`: boolean, at most four bytes.
    pub const SHAPE: Shape = require_shape(T::SHAPE, Category::Boolean, 4);

    /// Creates a cell holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        let _shape = Self::SHAPE;
        Self {
            raw: RawCell::new(value),
        }
    }

    /// Creates a cell holding the canonical pattern for `value`.
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        Self::new(T::from_bool(value))
    }

    /// Atomically loads the value.
    #[inline]
    pub fn get(&self) -> T {
        self.raw.get()
    }

    /// Atomically stores `value`.
    #[inline]
    pub fn assign(&self, value: T) {
        self.raw.assign(value);
    }

    /// Plain, non-atomic load.
    ///
    /// # Safety
    /// No other thread may access the cell during the call.
    #[inline]
    pub unsafe fn unsafe_get(&self) -> T {
        // SAFETY: forwarded caller contract.
        unsafe { self.raw.unsafe_get() }
    }

    /// Plain, non-atomic store.
    ///
    /// # Safety
    /// No other thread may access the cell during the call.
    #[inline]
    pub unsafe fn unsafe_assign(&self, value: T) {
        // SAFETY: forwarded caller contract.
        unsafe { self.raw.unsafe_assign(value) }
    }

    /// Atomically stores `value`, returning the previous value.
    #[inline]
    pub fn exchange(&self, value: T) -> T {
        self.raw.exchange(value)
    }

    /// Stores `new` if the raw pattern equals `expected`'s; returns the
    /// previous value either way.
    #[inline]
    pub fn compare_exchange(&self, new: T, expected: T) -> T {
        self.raw.compare_exchange(new, expected)
    }

    /// Applies `f` atomically, returning the value it replaced.
    #[inline]
    pub fn fetch_update<F: FnMut(T) -> T>(&self, f: F) -> T {
        self.raw.fetch_update(f)
    }

    /// Whether the current pattern is non-zero.
    #[inline]
    pub fn is_true(&self) -> bool {
        self.raw.load_raw() != T::Word::zero()
    }

    /// Stores the canonical true pattern.
    #[inline]
    pub fn set_true(&self) {
        self.raw.assign(T::TRUE);
    }

    /// Stores the canonical false pattern.
    #[inline]
    pub fn set_false(&self) {
        self.raw.assign(T::FALSE);
    }

    /// Stores true, returning whether this call turned the cell from false
    /// to true.
    #[inline]
    pub fn test_and_set(&self) -> bool {
        let prev = self.raw.exchange(T::TRUE);
        RawCell::<T, T::Word>::to_raw(prev) == T::Word::zero()
    }

    /// Logical negation of the current value.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> bool {
        !self.is_true()
    }

    /// Logical AND with a bare value.
    #[inline]
    pub fn and(&self, value: T) -> bool {
        self.is_true() && truthy(value)
    }

    /// Logical OR with a bare value.
    #[inline]
    pub fn or(&self, value: T) -> bool {
        self.is_true() || truthy(value)
    }

    /// Logical XOR with a bare value.
    #[inline]
    pub fn xor(&self, value: T) -> bool {
        self.is_true() != truthy(value)
    }

    /// Raw-pattern equality with a bare value.
    #[inline]
    pub fn eq_value(&self, value: T) -> bool {
        self.raw.load_raw() == RawCell::<T, T::Word>::to_raw(value)
    }

    /// Consumes the cell, returning the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.raw.into_inner()
    }

    /// Mutable access through an exclusive borrow.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.raw.get_mut()
    }

    /// The underlying cell core.
    #[inline]
    pub fn as_raw(&self) -> &RawCell<T, T::Word> {
        &self.raw
    }
}

#[inline(always)]
fn truthy<T: BoolLike>(value: T) -> bool {
    RawCell::<T, T::Word>::to_raw(value) != T::Word::zero()
}

impl<T: BoolLike + FromZeroes> Default for AtomicBoolCell<T> {
    fn default() -> Self {
        let _shape = Self::SHAPE;
        Self {
            raw: RawCell::zeroed(),
        }
    }
}

impl<T: BoolLike> From<T> for AtomicBoolCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: BoolLike + fmt::Debug> fmt::Debug for AtomicBoolCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicBoolCell").field(&self.get()).finish()
    }
}

/// Raw-pattern equality of two snapshots.
impl<T: BoolLike> PartialEq for AtomicBoolCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.load_raw() == other.raw.load_raw()
    }
}

impl<T: BoolLike> Not for &AtomicBoolCell<T> {
    type Output = bool;

    #[inline]
    fn not(self) -> bool {
        AtomicBoolCell::not(self)
    }
}

macro_rules! logical_ops {
    ($($trait:ident :: $method:ident => $named:ident),* $(,)?) => {$(
        impl<T: BoolLike> $trait<T> for &AtomicBoolCell<T> {
            type Output = bool;

            #[inline]
            fn $method(self, rhs: T) -> bool {
                self.$named(rhs)
            }
        }

        impl<T: BoolLike> $trait<&AtomicBoolCell<T>> for &AtomicBoolCell<T> {
            type Output = bool;

            #[inline]
            fn $method(self, rhs: &AtomicBoolCell<T>) -> bool {
                self.$named(rhs.get())
            }
        }
    )*};
}

logical_ops! {
    BitAnd::bitand => and,
    BitOr::bitor => or,
    BitXor::bitxor => xor,
}
