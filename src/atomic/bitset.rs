//! Atomic bit-set cells.
//!
//! A set of up to 31 flag indices packed into one `u32`. Single-index
//! membership changes are one atomic bit-test-and-modify each; set algebra
//! across two cells reads each cell on its own.

use core::fmt;
use core::ops::{Add, Sub};

use super::core::RawCell;
use crate::shape::{require_shape, Category, Shape};
use crate::value::SetLike;

type Raw<T> = RawCell<T, u32>;

/// An atomic set cell.
///
/// A domain of 32 or more indices does not fit and fails to build:
///
/// ```compile_fail
/// use wordcell::{AtomicSetCell, FlagSet};
///
/// let set = AtomicSetCell::<FlagSet<32>>::empty();
/// ```
#[repr(transparent)]
pub struct AtomicSetCell<T: SetLike> {
    raw: Raw<T>,
}

impl<T: SetLike> AtomicSetCell<T> {
    /// Validated shape of `T`: a set of at most four bytes whose domain fits
    /// in 31 bits.
    pub const SHAPE: Shape = require_shape(T::SHAPE, Category::Set, 4);

    /// Number of indices in the domain.
    pub const DOMAIN: u32 = Self::SHAPE.domain;

    /// Creates a cell holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        let _shape = Self::SHAPE;
        Self {
            raw: Raw::new(value),
        }
    }

    /// Creates a cell holding the empty set.
    #[inline]
    pub fn empty() -> Self {
        let _shape = Self::SHAPE;
        Self { raw: Raw::zeroed() }
    }

    /// Atomically loads the set.
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

    /// Atomically stores `value`, returning the previous set.
    #[inline]
    pub fn exchange(&self, value: T) -> T {
        self.raw.exchange(value)
    }

    /// Stores `new` if the current set is `expected`; returns the previous set
    /// either way.
    #[inline]
    pub fn compare_exchange(&self, new: T, expected: T) -> T {
        self.raw.compare_exchange(new, expected)
    }

    /// Applies `f` atomically, returning the set it replaced.
    #[inline]
    pub fn fetch_update<F: FnMut(T) -> T>(&self, f: F) -> T {
        self.raw.fetch_update(f)
    }

    /// Atomically adds `index`, returning whether it was already a member.
    ///
    /// # Panics
    /// Panics if `index` is outside the domain.
    #[inline]
    pub fn include(&self, index: u32) -> bool {
        Self::check_index(index);
        self.raw.bit_set(index)
    }

    /// Atomically removes `index`, returning whether it was a member.
    ///
    /// # Panics
    /// Panics if `index` is outside the domain.
    #[inline]
    pub fn exclude(&self, index: u32) -> bool {
        Self::check_index(index);
        self.raw.bit_clear(index)
    }

    /// Whether `index` is currently a member. Indices outside the domain never
    /// are.
    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        index < Self::DOMAIN && self.raw.load_raw() & (1 << index) != 0
    }

    /// Alias of [`contains`](Self::contains).
    #[inline]
    pub fn membership_test(&self, index: u32) -> bool {
        self.contains(index)
    }

    /// Members of either cell, each read on its own.
    #[inline]
    pub fn union(&self, other: &Self) -> T {
        Raw::<T>::from_bits(self.raw.load_raw() | other.raw.load_raw())
    }

    /// Members of `self` not in `other`, each read on its own.
    #[inline]
    pub fn difference(&self, other: &Self) -> T {
        Raw::<T>::from_bits(self.raw.load_raw() & !other.raw.load_raw())
    }

    /// Atomically removes every member, returning the previous set.
    #[inline]
    pub fn clear(&self) -> T {
        self.raw.exchange(Raw::<T>::from_bits(0))
    }

    /// Whether the set is currently empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.load_raw() == 0
    }

    /// Current number of members.
    #[inline]
    pub fn len(&self) -> u32 {
        self.raw.load_raw().count_ones()
    }

    /// Raw bits of the current set.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.raw.load_raw()
    }

    /// Raw-pattern equality with a bare set.
    #[inline]
    pub fn eq_value(&self, value: T) -> bool {
        self.raw.load_raw() == Raw::<T>::to_raw(value)
    }

    /// Consumes the cell, returning the set.
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

    #[inline(always)]
    fn check_index(index: u32) {
        assert!(index < Self::DOMAIN, "flag index outside the set domain");
    }
}

impl<T: SetLike> Default for AtomicSetCell<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: SetLike> From<T> for AtomicSetCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: SetLike + fmt::Debug> fmt::Debug for AtomicSetCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicSetCell").field(&self.get()).finish()
    }
}

impl<T: SetLike> PartialEq for AtomicSetCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.load_raw() == other.raw.load_raw()
    }
}

impl<T: SetLike> Add for &AtomicSetCell<T> {
    type Output = T;

    #[inline]
    fn add(self, rhs: Self) -> T {
        self.union(rhs)
    }
}

impl<T: SetLike> Sub for &AtomicSetCell<T> {
    type Output = T;

    #[inline]
    fn sub(self, rhs: Self) -> T {
        self.difference(rhs)
    }
}
