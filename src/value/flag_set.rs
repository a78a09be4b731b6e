//! `FlagSet<N>`: a set over the index domain `0..N`, packed into one `u32`.

use core::fmt;
use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

use super::{CellValue, SetLike};
use crate::shape::Shape;

/// A set of indices drawn from `0..N`, one bit per index.
///
/// `N` may be at most 31; a [`AtomicSetCell`](crate::AtomicSetCell) over a
/// larger domain is rejected when it is instantiated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, AsBytes, FromBytes, FromZeroes, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct FlagSet<const N: u32> {
    bits: u32,
}

impl<const N: u32> FlagSet<N> {
    /// Bits that correspond to indices inside the domain.
    pub const DOMAIN_MASK: u32 = if N >= u32::BITS { u32::MAX } else { (1 << N) - 1 };

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Every index of the domain.
    pub const FULL: Self = Self {
        bits: Self::DOMAIN_MASK,
    };

    /// Returns the empty set.
    #[inline]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Number of indices in the domain.
    #[inline]
    pub const fn domain() -> u32 {
        N
    }

    /// Builds a set from raw bits, rejecting bits outside the domain.
    #[inline]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::DOMAIN_MASK == 0 {
            Some(Self { bits })
        } else {
            None
        }
    }

    /// Builds a set from raw bits, dropping bits outside the domain.
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self {
            bits: bits & Self::DOMAIN_MASK,
        }
    }

    /// Raw bit pattern.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns a copy with `index` added.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    #[inline]
    #[must_use]
    pub const fn with(self, index: u32) -> Self {
        assert!(index < N, "flag index outside the set domain");
        Self {
            bits: self.bits | (1 << index),
        }
    }

    /// Returns a copy with `index` removed.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    #[inline]
    #[must_use]
    pub const fn without(self, index: u32) -> Self {
        assert!(index < N, "flag index outside the set domain");
        Self {
            bits: self.bits & !(1 << index),
        }
    }

    /// Whether `index` is a member. Indices outside the domain never are.
    #[inline]
    pub const fn contains(self, index: u32) -> bool {
        index < N && self.bits & (1 << index) != 0
    }

    /// Members of either set.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Members of `self` that are not in `other`.
    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Members of both sets.
    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Number of members.
    #[inline]
    pub const fn len(self) -> u32 {
        self.bits.count_ones()
    }

    /// Whether the set has no members.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Iterates over members in ascending order.
    #[inline]
    pub fn iter(self) -> FlagIter {
        FlagIter { bits: self.bits }
    }
}

impl<const N: u32> CellValue for FlagSet<N> {
    const SHAPE: Shape = Shape::set(core::mem::size_of::<u32>(), N);
}

impl<const N: u32> SetLike for FlagSet<N> {}

impl<const N: u32> Add for FlagSet<N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl<const N: u32> Sub for FlagSet<N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl<const N: u32> FromIterator<u32> for FlagSet<N> {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl<const N: u32> IntoIterator for FlagSet<N> {
    type Item = u32;
    type IntoIter = FlagIter;

    fn into_iter(self) -> FlagIter {
        self.iter()
    }
}

impl<const N: u32> From<FlagSet<N>> for u32 {
    #[inline]
    fn from(set: FlagSet<N>) -> u32 {
        set.bits
    }
}

impl<const N: u32> TryFrom<u32> for FlagSet<N> {
    type Error = OutOfDomain;

    fn try_from(bits: u32) -> Result<Self, OutOfDomain> {
        Self::from_bits(bits).ok_or(OutOfDomain { bits, domain: N })
    }
}

impl<const N: u32> fmt::Debug for FlagSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Ascending iterator over the members of a [`FlagSet`].
#[derive(Debug, Clone)]
pub struct FlagIter {
    bits: u32,
}

impl Iterator for FlagIter {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros();
        // Clear lowest set bit.
        self.bits &= self.bits - 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for FlagIter {}

/// Raw bits name indices outside a set's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfDomain {
    /// The rejected bit pattern.
    pub bits: u32,
    /// Domain size of the target set.
    pub domain: u32,
}

impl fmt::Display for OutOfDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bits {:#x} name indices outside the domain 0..{}",
            self.bits, self.domain
        )
    }
}

impl std::error::Error for OutOfDomain {}
