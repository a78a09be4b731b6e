//! The cell core shared by every kind.
//!
//! [`RawCell<T, W>`] stores a logical value `T` as the low `size_of::<T>()`
//! bytes of a storage word `W`. It owns the three pieces every kind needs:
//!
//! - **bit-cast**: [`to_raw`](RawCell::to_raw) and [`from_raw`](RawCell::from_raw)
//!   move bytes between `T` and `W` without numeric conversion;
//! - **mask**: bits above the logical width are cleared after every write path
//!   that could set them, and ignored by every read;
//! - **validation**: [`RawCell::SHAPE`] is a constant that fails to evaluate
//!   when `T` does not fit `W`, so an invalid `RawCell<T, W>` never compiles.
//!
//! All atomic operations use `SeqCst`.

use core::marker::PhantomData;
use core::sync::atomic::Ordering;
use core::{fmt, mem, ptr};

use crossbeam_utils::Backoff;
use zerocopy::{FromBytes, FromZeroes};

use crate::shape::{require_shape, Shape};
use crate::value::CellValue;
use crate::word::Word;

const ORDER: Ordering = Ordering::SeqCst;

/// An atomic word holding the raw bits of a `T`.
#[repr(transparent)]
pub struct RawCell<T, W: Word> {
    word: W::Atomic,
    _value: PhantomData<T>,
}

impl<T: CellValue, W: Word> RawCell<T, W> {
    /// Validated shape of `T` within `W`.
    pub const SHAPE: Shape = {
        assert!(
            T::SHAPE.width == mem::size_of::<T>(),
            "cell value type misreports its width"
        );
        require_shape(T::SHAPE, T::SHAPE.category, W::BYTES)
    };

    /// Logical width in bytes.
    pub const WIDTH: usize = Self::SHAPE.width;

    /// The mask as a 64-bit pattern: all ones of `W`, shifted right by the
    /// unused bytes.
    pub const MASK_BITS: u64 = (u64::MAX >> (8 * (8 - W::BYTES))) >> (8 * (W::BYTES - Self::WIDTH));

    /// Whether `T` is narrower than `W`, i.e. the mask clears anything.
    const NARROW: bool = Self::WIDTH < W::BYTES;

    /// Creates a cell holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            word: W::new_atomic(Self::to_raw(value)),
            _value: PhantomData,
        }
    }

    /// Creates a cell whose storage is all zeroes.
    #[inline]
    pub fn zeroed() -> Self
    where
        T: FromZeroes,
    {
        let _shape = Self::SHAPE;
        Self {
            word: W::new_atomic(W::zero()),
            _value: PhantomData,
        }
    }

    /// The mask selecting the logical width within `W`.
    #[inline(always)]
    pub fn mask() -> W {
        W::from_u64(Self::MASK_BITS)
    }

    /// Reinterprets `value`'s bytes as the low bytes of a storage word.
    ///
    /// Bytes above the logical width are zero.
    #[inline]
    pub fn to_raw(value: T) -> W {
        let width = Self::WIDTH;
        let mut buf = [0u8; 8];
        if cfg!(target_endian = "little") {
            buf[..width].copy_from_slice(value.as_bytes());
        } else {
            buf[8 - width..].copy_from_slice(value.as_bytes());
        }
        W::from_u64(u64::from_ne_bytes(buf))
    }

    /// Reinterprets the low bytes of `bits` as a `T`.
    ///
    /// # Safety
    /// `bits & mask()` must be the pattern of a valid `T`, for instance one
    /// produced by [`to_raw`](Self::to_raw). Any pattern is valid when
    /// `T: FromBytes`; see [`from_bits`](Self::from_bits).
    #[inline]
    pub unsafe fn from_raw(bits: W) -> T {
        let width = Self::WIDTH;
        let buf = (bits & Self::mask()).into_u64().to_ne_bytes();
        let bytes = if cfg!(target_endian = "little") {
            &buf[..width]
        } else {
            &buf[8 - width..]
        };
        // SAFETY: `bytes` holds exactly `size_of::<T>()` bytes (checked by
        // `SHAPE`) and the caller guarantees they form a valid `T`.
        unsafe { ptr::read_unaligned(bytes.as_ptr().cast::<T>()) }
    }

    /// Reinterprets the low bytes of `bits` as a `T` that accepts any pattern.
    #[inline]
    pub fn from_bits(bits: W) -> T
    where
        T: FromBytes,
    {
        // SAFETY: every bit pattern is a valid `T`.
        unsafe { Self::from_raw(bits) }
    }

    /// Atomically loads the masked raw pattern.
    #[inline]
    pub fn load_raw(&self) -> W {
        W::load(&self.word, ORDER) & Self::mask()
    }

    /// Atomically loads the whole storage word, including any bits above the
    /// mask.
    #[inline]
    pub fn as_word(&self) -> W {
        W::load(&self.word, ORDER)
    }

    /// Loads the masked raw pattern with a compare-exchange instead of a
    /// plain atomic load.
    #[inline]
    pub fn load_raw_via_cas(&self) -> W {
        W::load_via_cas(&self.word, ORDER) & Self::mask()
    }

    /// Atomically loads the value.
    #[inline]
    pub fn get(&self) -> T {
        // SAFETY: storage only ever holds patterns written from a `T`, or
        // arbitrary bits for `FromBytes` values through the RMW paths.
        unsafe { Self::from_raw(self.load_raw()) }
    }

    /// Atomically stores `value`.
    #[inline]
    pub fn assign(&self, value: T) {
        W::store(&self.word, Self::to_raw(value) & Self::mask(), ORDER);
    }

    /// Reads the value with a plain, non-atomic load.
    ///
    /// # Safety
    /// No other thread may access the cell for the duration of the call.
    #[inline]
    pub unsafe fn unsafe_get(&self) -> T {
        // SAFETY: the caller excludes concurrent access; the pointer comes
        // from a live atomic.
        unsafe { Self::from_raw(ptr::read(W::as_ptr(&self.word))) }
    }

    /// Writes the value with a plain, non-atomic store.
    ///
    /// # Safety
    /// No other thread may access the cell for the duration of the call.
    #[inline]
    pub unsafe fn unsafe_assign(&self, value: T) {
        // SAFETY: the caller excludes concurrent access.
        unsafe { ptr::write(W::as_ptr(&self.word), Self::to_raw(value)) }
    }

    /// Atomically replaces the value, returning the previous one.
    #[inline]
    pub fn exchange(&self, value: T) -> T {
        let prev = W::swap(&self.word, Self::to_raw(value), ORDER);
        // SAFETY: `prev` was a stored pattern.
        unsafe { Self::from_raw(prev) }
    }

    /// Replaces the value with `new` if it currently equals `expected`.
    ///
    /// Returns the value observed before the attempt whether or not the
    /// replacement happened.
    #[inline]
    pub fn compare_exchange(&self, new: T, expected: T) -> T {
        let observed = match self.compare_exchange_raw(Self::to_raw(new), Self::to_raw(expected)) {
            Ok(prev) | Err(prev) => prev,
        };
        // SAFETY: `observed` was a stored pattern.
        unsafe { Self::from_raw(observed) }
    }

    /// Masked compare-exchange on raw patterns.
    ///
    /// Succeeds iff `storage & mask == expected`. Bits above the mask left by
    /// an arithmetic carry that has not been cleared yet do not make the
    /// exchange fail; it retries against the full word instead. Both results
    /// are masked.
    fn compare_exchange_raw(&self, new: W, expected: W) -> Result<W, W> {
        let mask = Self::mask();
        let backoff = Backoff::new();
        let mut current = expected;
        loop {
            match W::compare_exchange(&self.word, current, new, ORDER, ORDER) {
                Ok(prev) => return Ok(prev & mask),
                Err(actual) if actual & mask == expected => {
                    trace_retry!(
                        value = core::any::type_name::<T>(),
                        "compare-exchange saw bits above the mask, retrying"
                    );
                    current = actual;
                    backoff.spin();
                }
                Err(actual) => return Err(actual & mask),
            }
        }
    }

    /// Applies `f` to the value in a compare-exchange loop, returning the
    /// value it replaced.
    pub fn fetch_update<F>(&self, mut f: F) -> T
    where
        F: FnMut(T) -> T,
    {
        let backoff = Backoff::new();
        let mut current = self.load_raw();
        loop {
            // SAFETY: `current` was a stored pattern.
            let next = f(unsafe { Self::from_raw(current) });
            match self.compare_exchange_raw(Self::to_raw(next), current) {
                // SAFETY: `prev` was a stored pattern.
                Ok(prev) => return unsafe { Self::from_raw(prev) },
                Err(actual) => {
                    trace_retry!(
                        value = core::any::type_name::<T>(),
                        "fetch_update lost a race, retrying"
                    );
                    current = actual;
                    backoff.spin();
                }
            }
        }
    }

    /// Clears bits above the mask after an arithmetic RMW.
    #[inline(always)]
    fn clear_excess(&self) {
        if Self::NARROW {
            W::fetch_and(&self.word, Self::mask(), ORDER);
        }
    }

    /// Atomic wrapping add of a raw delta, returning the previous pattern.
    #[inline]
    pub fn fetch_add_raw(&self, delta: W) -> W
    where
        T: FromBytes,
    {
        let prev = W::fetch_add(&self.word, delta & Self::mask(), ORDER);
        self.clear_excess();
        prev & Self::mask()
    }

    /// Atomic wrapping subtract of a raw delta, returning the previous pattern.
    #[inline]
    pub fn fetch_sub_raw(&self, delta: W) -> W
    where
        T: FromBytes,
    {
        let prev = W::fetch_sub(&self.word, delta & Self::mask(), ORDER);
        self.clear_excess();
        prev & Self::mask()
    }

    /// Atomic AND with a raw pattern, returning the previous pattern.
    #[inline]
    pub fn fetch_and_raw(&self, bits: W) -> W
    where
        T: FromBytes,
    {
        W::fetch_and(&self.word, bits & Self::mask(), ORDER) & Self::mask()
    }

    /// Atomic OR with a raw pattern, returning the previous pattern.
    #[inline]
    pub fn fetch_or_raw(&self, bits: W) -> W
    where
        T: FromBytes,
    {
        W::fetch_or(&self.word, bits & Self::mask(), ORDER) & Self::mask()
    }

    /// Atomic XOR with a raw pattern, returning the previous pattern.
    #[inline]
    pub fn fetch_xor_raw(&self, bits: W) -> W
    where
        T: FromBytes,
    {
        W::fetch_xor(&self.word, bits & Self::mask(), ORDER) & Self::mask()
    }

    /// Atomically sets storage bit `bit`, returning whether it was set.
    ///
    /// # Panics
    /// Panics if `bit` lies outside the logical width.
    #[inline]
    pub fn bit_set(&self, bit: u32) -> bool
    where
        T: FromBytes,
    {
        assert!((bit as usize) < Self::WIDTH * 8, "bit outside the logical width");
        W::bit_test_and_set(&self.word, bit, ORDER)
    }

    /// Atomically clears storage bit `bit`, returning whether it was set.
    ///
    /// # Panics
    /// Panics if `bit` lies outside the logical width.
    #[inline]
    pub fn bit_clear(&self, bit: u32) -> bool
    where
        T: FromBytes,
    {
        assert!((bit as usize) < Self::WIDTH * 8, "bit outside the logical width");
        W::bit_test_and_reset(&self.word, bit, ORDER)
    }

    /// Consumes the cell, returning the value.
    #[inline]
    pub fn into_inner(self) -> T {
        // SAFETY: the word was a stored pattern.
        unsafe { Self::from_raw(W::into_inner(self.word)) }
    }

    /// Mutable access to the value through an exclusive borrow.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        let offset = if cfg!(target_endian = "little") {
            0
        } else {
            W::BYTES - Self::WIDTH
        };
        let word = W::get_mut(&mut self.word);
        *word = *word & Self::mask();
        let word: *mut W = word;
        // SAFETY: the low `WIDTH` bytes of the word hold a valid `T`. `offset`
        // is a multiple of `align_of::<T>()` (both `W::BYTES` and `WIDTH` are),
        // the word is aligned to `W::BYTES`, and the borrow is exclusive.
        unsafe { &mut *word.cast::<u8>().add(offset).cast::<T>() }
    }
}

impl<T: CellValue + FromZeroes, W: Word> Default for RawCell<T, W> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<T: CellValue, W: Word> From<T> for RawCell<T, W> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: CellValue + fmt::Debug, W: Word> fmt::Debug for RawCell<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawCell").field(&self.get()).finish()
    }
}
