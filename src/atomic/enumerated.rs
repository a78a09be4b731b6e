use core::cmp::Ordering as CmpOrdering;
use core::fmt;

use zerocopy::FromZeroes;

use super::core::RawCell;
use crate::shape::{require_shape, Category, Shape};
use crate::value::Ordinal;

type Raw<T> = RawCell<T, u32>;

/// An atomic enumeration cell stored in a `u32`.
///
/// Ordering compares raw ordinals, the same way for cell-to-cell and
/// cell-to-value comparisons. Cell-to-cell comparisons read both cells
/// independently and are not atomic as a pair.
///
/// Enumerations wider than four bytes fail to build:
///
/// ```compile_fail
/// use wordcell::{ordinal, AtomicEnumCell};
/// use zerocopy::AsBytes;
///
/// #[derive(Clone, Copy, AsBytes)]
/// #[repr(u64)]
/// enum Wide {
///     Low,
///     High,
/// }
///
/// ordinal!(Wide: Low..=High);
///
/// let cell = AtomicEnumCell::new(Wide::Low);
/// ```
#[repr(transparent)]
pub struct AtomicEnumCell<T: Ordinal> {
    raw: Raw<T>,
}

impl<T: Ordinal> AtomicEnumCell<T> {
    /// Validated shape of `T`: enumeration, at most four bytes.
    pub const SHAPE: Shape = require_shape(T::SHAPE, Category::Enumeration, 4);

    /// Creates a cell holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        let _shape = Self::SHAPE;
        Self {
            raw: Raw::new(value),
        }
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

    /// Stores `new` if the current value is `expected`; returns the previous
    /// value either way.
    #[inline]
    pub fn compare_exchange(&self, new: T, expected: T) -> T {
        self.raw.compare_exchange(new, expected)
    }

    /// Applies `f` atomically, returning the value it replaced.
    #[inline]
    pub fn fetch_update<F: FnMut(T) -> T>(&self, f: F) -> T {
        self.raw.fetch_update(f)
    }

    /// Raw ordinal of the current value.
    #[inline]
    pub fn ordinal(&self) -> u32 {
        self.raw.load_raw()
    }

    /// Lowest variant of `T`.
    #[inline]
    pub fn min_value(&self) -> T {
        T::MIN
    }

    /// Highest variant of `T`.
    #[inline]
    pub fn max_value(&self) -> T {
        T::MAX
    }

    /// Raw ordinal of `T::MIN`.
    #[inline]
    pub fn min_ordinal() -> u32 {
        Raw::<T>::to_raw(T::MIN)
    }

    /// Raw ordinal of `T::MAX`.
    #[inline]
    pub fn max_ordinal() -> u32 {
        Raw::<T>::to_raw(T::MAX)
    }

    /// Compares the current ordinal with `value`'s.
    #[inline]
    pub fn cmp_value(&self, value: T) -> CmpOrdering {
        self.ordinal().cmp(&Raw::<T>::to_raw(value))
    }

    /// Whether the current value equals `value`.
    #[inline]
    pub fn eq_value(&self, value: T) -> bool {
        self.cmp_value(value).is_eq()
    }

    /// Whether the current value orders before `value`.
    #[inline]
    pub fn lt_value(&self, value: T) -> bool {
        self.cmp_value(value).is_lt()
    }

    /// Whether the current value orders before or equal to `value`.
    #[inline]
    pub fn le_value(&self, value: T) -> bool {
        self.cmp_value(value).is_le()
    }

    /// Whether the current value orders after `value`.
    #[inline]
    pub fn gt_value(&self, value: T) -> bool {
        self.cmp_value(value).is_gt()
    }

    /// Whether the current value orders after or equal to `value`.
    #[inline]
    pub fn ge_value(&self, value: T) -> bool {
        self.cmp_value(value).is_ge()
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
    pub fn as_raw(&self) -> &Raw<T> {
        &self.raw
    }
}

impl<T: Ordinal + FromZeroes> Default for AtomicEnumCell<T> {
    fn default() -> Self {
        let _shape = Self::SHAPE;
        Self { raw: Raw::zeroed() }
    }
}

impl<T: Ordinal> From<T> for AtomicEnumCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Ordinal + fmt::Debug> fmt::Debug for AtomicEnumCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicEnumCell").field(&self.get()).finish()
    }
}

impl<T: Ordinal> PartialEq for AtomicEnumCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal() == other.ordinal()
    }
}

impl<T: Ordinal> PartialOrd for AtomicEnumCell<T> {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.ordinal().cmp(&other.ordinal()))
    }
}
