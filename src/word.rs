//! Storage words: the hardware atomic primitive set behind every cell.
//!
//! A [`Word`] is one of `u8`, `u16`, `u32` or `u64`. Each maps onto the matching
//! `core::sync::atomic` type and exposes exactly the primitives the cell kinds
//! are built from: load, store, swap, compare-exchange, fetch-add/sub,
//! fetch-and/or/xor and single-bit test-and-modify.
//!
//! The trait is sealed; cells never hold anything other than these four words.

use core::fmt;
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::AtomicU64;
use core::sync::atomic::{AtomicU16, AtomicU32, AtomicU8, Ordering};

use num_traits::{PrimInt, Unsigned};

mod sealed {
    pub trait Sealed {}
}

/// An unsigned machine word with a native atomic counterpart.
pub trait Word: sealed::Sealed + PrimInt + Unsigned + fmt::Debug + Send + Sync + 'static {
    /// The native atomic type storing this word.
    type Atomic: Send + Sync;

    /// Width of the word in bytes.
    const BYTES: usize;

    /// Creates a new atomic holding `value`.
    fn new_atomic(value: Self) -> Self::Atomic;

    /// Atomic load.
    fn load(atomic: &Self::Atomic, order: Ordering) -> Self;

    /// Atomic store.
    fn store(atomic: &Self::Atomic, value: Self, order: Ordering);

    /// Atomic exchange, returning the previous word.
    fn swap(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Strong compare-exchange.
    fn compare_exchange(
        atomic: &Self::Atomic,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;

    /// Wrapping add, returning the previous word.
    fn fetch_add(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Wrapping subtract, returning the previous word.
    fn fetch_sub(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Bitwise AND, returning the previous word.
    fn fetch_and(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Bitwise OR, returning the previous word.
    fn fetch_or(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Bitwise XOR, returning the previous word.
    fn fetch_xor(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Raw pointer to the underlying storage, for non-atomic access.
    fn as_ptr(atomic: &Self::Atomic) -> *mut Self;

    /// Exclusive access to the underlying storage.
    fn get_mut(atomic: &mut Self::Atomic) -> &mut Self;

    /// Consumes the atomic, returning the stored word.
    fn into_inner(atomic: Self::Atomic) -> Self;

    /// Truncating conversion from a 64-bit pattern.
    fn from_u64(bits: u64) -> Self;

    /// Zero-extending conversion to a 64-bit pattern.
    fn into_u64(self) -> u64;

    /// Atomically sets bit `bit`, returning whether it was already set.
    ///
    /// This is a single `fetch_or` with a one-bit operand, which LLVM lowers to
    /// the target's bit-test-and-set instruction (`lock bts` on x86) when only
    /// the tested bit of the result is used.
    #[inline(always)]
    fn bit_test_and_set(atomic: &Self::Atomic, bit: u32, order: Ordering) -> bool {
        let mask = Self::one() << bit as usize;
        (Self::fetch_or(atomic, mask, order) & mask) != Self::zero()
    }

    /// Atomically clears bit `bit`, returning whether it was set.
    #[inline(always)]
    fn bit_test_and_reset(atomic: &Self::Atomic, bit: u32, order: Ordering) -> bool {
        let mask = Self::one() << bit as usize;
        (Self::fetch_and(atomic, !mask, order) & mask) != Self::zero()
    }

    /// Reads the word with a compare-exchange of zero against zero.
    ///
    /// If the word is zero it is rewritten with zero; otherwise the exchange
    /// fails and reports the current contents. Either way the result is the
    /// word as observed by a read-modify-write, which is atomic even where a
    /// plain load of this width is not.
    #[inline]
    fn load_via_cas(atomic: &Self::Atomic, order: Ordering) -> Self {
        let failure = match order {
            Ordering::Release | Ordering::Relaxed => Ordering::Relaxed,
            Ordering::AcqRel | Ordering::Acquire => Ordering::Acquire,
            _ => Ordering::SeqCst,
        };
        match Self::compare_exchange(atomic, Self::zero(), Self::zero(), order, failure) {
            Ok(prev) | Err(prev) => prev,
        }
    }
}

macro_rules! impl_word {
    ($($word:ty => $atomic:ty),* $(,)?) => {$(
        impl sealed::Sealed for $word {}

        impl Word for $word {
            type Atomic = $atomic;

            const BYTES: usize = core::mem::size_of::<$word>();

            #[inline(always)]
            fn new_atomic(value: Self) -> Self::Atomic {
                <$atomic>::new(value)
            }

            #[inline(always)]
            fn load(atomic: &Self::Atomic, order: Ordering) -> Self {
                atomic.load(order)
            }

            #[inline(always)]
            fn store(atomic: &Self::Atomic, value: Self, order: Ordering) {
                atomic.store(value, order);
            }

            #[inline(always)]
            fn swap(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self {
                atomic.swap(value, order)
            }

            #[inline(always)]
            fn compare_exchange(
                atomic: &Self::Atomic,
                current: Self,
                new: Self,
                success: Ordering,
                failure: Ordering,
            ) -> Result<Self, Self> {
                atomic.compare_exchange(current, new, success, failure)
            }

            #[inline(always)]
            fn fetch_add(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_add(value, order)
            }

            #[inline(always)]
            fn fetch_sub(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_sub(value, order)
            }

            #[inline(always)]
            fn fetch_and(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_and(value, order)
            }

            #[inline(always)]
            fn fetch_or(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_or(value, order)
            }

            #[inline(always)]
            fn fetch_xor(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self {
                atomic.fetch_xor(value, order)
            }

            #[inline(always)]
            fn as_ptr(atomic: &Self::Atomic) -> *mut Self {
                atomic.as_ptr()
            }

            #[inline(always)]
            fn get_mut(atomic: &mut Self::Atomic) -> &mut Self {
                atomic.get_mut()
            }

            #[inline(always)]
            fn into_inner(atomic: Self::Atomic) -> Self {
                atomic.into_inner()
            }

            #[inline(always)]
            #[allow(clippy::cast_possible_truncation)]
            fn from_u64(bits: u64) -> Self {
                bits as $word
            }

            #[inline(always)]
            fn into_u64(self) -> u64 {
                u64::from(self)
            }
        }
    )*};
}

impl_word!(u8 => AtomicU8, u16 => AtomicU16, u32 => AtomicU32);

#[cfg(target_has_atomic = "64")]
impl_word!(u64 => AtomicU64);
