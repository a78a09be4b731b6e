//! Atomic integer cells.
//!
//! [`integer_cell!`] generates the operation surface shared by the 32-bit and
//! 64-bit cells; each width supplies its own `get`, since that is where the
//! two differ.
//!
//! Arithmetic (`add`, `sub`, `increment`, `decrement`) is a single atomic
//! fetch-and-add on the storage word using the delta's raw pattern. Values
//! narrower than the word are masked again right after, so carries never
//! survive above the logical width.
//!
//! The operator impls (`&cell + 3`, `&a * &b`, ...) read each cell once and
//! combine the snapshots; a pair of cells is never read as one atomic unit.

use crate::value::Integer;

macro_rules! integer_cell {
    (@binary $name:ident, $trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl<T: $crate::Integer> ::core::ops::$trait<T> for &$name<T> {
            type Output = T;

            #[inline]
            fn $method(self, rhs: T) -> T {
                let ($a, $b) = (self.get(), rhs);
                $body
            }
        }

        impl<T: $crate::Integer> ::core::ops::$trait<&$name<T>> for &$name<T> {
            type Output = T;

            #[inline]
            fn $method(self, rhs: &$name<T>) -> T {
                let ($a, $b) = (self.get(), rhs.get());
                $body
            }
        }
    };

    ($(#[$meta:meta])* $name:ident, $word:ty, $max_width:expr) => {
        $(#[$meta])*
        #[repr(transparent)]
        pub struct $name<T: $crate::Integer> {
            raw: $crate::RawCell<T, $word>,
        }

        impl<T: $crate::Integer> $name<T> {
            /// Validated shape of `T`.
            pub const SHAPE: $crate::Shape =
                $crate::shape::require_shape(T::SHAPE, $crate::Category::Integer, $max_width);

            /// Creates a cell holding `value`.
            #[inline]
            pub fn new(value: T) -> Self {
                let _shape = Self::SHAPE;
                Self {
                    raw: $crate::RawCell::new(value),
                }
            }

            #[inline(always)]
            fn to_raw(value: T) -> $word {
                $crate::RawCell::<T, $word>::to_raw(value)
            }

            #[inline(always)]
            fn from_bits(bits: $word) -> T {
                $crate::RawCell::<T, $word>::from_bits(bits)
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

            /// Stores `new` if the current value is `expected`; returns the
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

            /// Atomically adds `delta` (wrapping), returning the previous value.
            #[inline]
            #[allow(clippy::should_implement_trait)]
            pub fn add(&self, delta: T) -> T {
                Self::from_bits(self.raw.fetch_add_raw(Self::to_raw(delta)))
            }

            /// Atomically subtracts `delta` (wrapping), returning the previous
            /// value.
            #[inline]
            #[allow(clippy::should_implement_trait)]
            pub fn sub(&self, delta: T) -> T {
                Self::from_bits(self.raw.fetch_sub_raw(Self::to_raw(delta)))
            }

            /// Atomically adds one, returning the new value.
            #[inline]
            pub fn increment(&self) -> T {
                self.add(T::one()).wrapping_add(&T::one())
            }

            /// Atomically subtracts one, returning the new value.
            #[inline]
            pub fn decrement(&self) -> T {
                self.sub(T::one()).wrapping_sub(&T::one())
            }

            /// Atomic bitwise AND, returning the previous value.
            #[inline]
            pub fn fetch_and(&self, value: T) -> T {
                Self::from_bits(self.raw.fetch_and_raw(Self::to_raw(value)))
            }

            /// Atomic bitwise OR, returning the previous value.
            #[inline]
            pub fn fetch_or(&self, value: T) -> T {
                Self::from_bits(self.raw.fetch_or_raw(Self::to_raw(value)))
            }

            /// Atomic bitwise XOR, returning the previous value.
            #[inline]
            pub fn fetch_xor(&self, value: T) -> T {
                Self::from_bits(self.raw.fetch_xor_raw(Self::to_raw(value)))
            }

            /// Compares the current value with `value` numerically.
            #[inline]
            pub fn cmp_value(&self, value: T) -> ::core::cmp::Ordering {
                self.get().cmp(&value)
            }

            /// Whether the current value equals `value`.
            #[inline]
            pub fn eq_value(&self, value: T) -> bool {
                self.get() == value
            }

            /// Whether the current value is less than `value`.
            #[inline]
            pub fn lt_value(&self, value: T) -> bool {
                self.get() < value
            }

            /// Whether the current value is at most `value`.
            #[inline]
            pub fn le_value(&self, value: T) -> bool {
                self.get() <= value
            }

            /// Whether the current value is greater than `value`.
            #[inline]
            pub fn gt_value(&self, value: T) -> bool {
                self.get() > value
            }

            /// Whether the current value is at least `value`.
            #[inline]
            pub fn ge_value(&self, value: T) -> bool {
                self.get() >= value
            }

            /// The current value as `f64`, honouring the sign of `T`.
            ///
            /// Meant for display and telemetry; values beyond 2^53 round.
            #[inline]
            pub fn to_f64(&self) -> f64 {
                ::num_traits::AsPrimitive::<f64>::as_(self.get())
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
            pub fn as_raw(&self) -> &$crate::RawCell<T, $word> {
                &self.raw
            }
        }

        impl<T: $crate::Integer> Default for $name<T> {
            fn default() -> Self {
                let _shape = Self::SHAPE;
                Self {
                    raw: $crate::RawCell::zeroed(),
                }
            }
        }

        impl<T: $crate::Integer> From<T> for $name<T> {
            fn from(value: T) -> Self {
                Self::new(value)
            }
        }

        impl<T: $crate::Integer> From<&$name<T>> for f64 {
            fn from(cell: &$name<T>) -> f64 {
                cell.to_f64()
            }
        }

        impl<T: $crate::Integer> ::core::fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        impl<T: $crate::Integer> ::core::fmt::Display for $name<T> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.get(), f)
            }
        }

        impl<T: $crate::Integer> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.get() == other.get()
            }
        }

        impl<T: $crate::Integer> PartialOrd for $name<T> {
            fn partial_cmp(&self, other: &Self) -> Option<::core::cmp::Ordering> {
                Some(self.get().cmp(&other.get()))
            }
        }

        integer_cell!(@binary $name, Add, add, |a, b| a.wrapping_add(&b));
        integer_cell!(@binary $name, Sub, sub, |a, b| a.wrapping_sub(&b));
        integer_cell!(@binary $name, Mul, mul, |a, b| a.wrapping_mul(&b));
        integer_cell!(@binary $name, Div, div, |a, b| a / b);
        integer_cell!(@binary $name, Rem, rem, |a, b| a % b);
        integer_cell!(@binary $name, BitAnd, bitand, |a, b| a & b);
        integer_cell!(@binary $name, BitOr, bitor, |a, b| a | b);
        integer_cell!(@binary $name, BitXor, bitxor, |a, b| a ^ b);

        impl<T: $crate::Integer> ::core::ops::Shl<u32> for &$name<T> {
            type Output = T;

            #[inline]
            fn shl(self, rhs: u32) -> T {
                self.get().wrapping_shl(rhs)
            }
        }

        impl<T: $crate::Integer> ::core::ops::Shr<u32> for &$name<T> {
            type Output = T;

            #[inline]
            fn shr(self, rhs: u32) -> T {
                self.get().wrapping_shr(rhs)
            }
        }
    };

}

integer_cell! {
    /// An atomic integer cell for values of at most four bytes, stored in a
    /// `u32`.
    ///
    /// Narrower integers (`i8`, `u16`, ...) keep their exact bit pattern in the
    /// low bytes of the word; arithmetic wraps at their own width.
    ///
    /// # Panics
    /// `/` and `%` panic on a zero divisor and on `MIN / -1`, as they do for
    /// `T` itself. Every other operation is total.
    ///
    /// Eight-byte integers do not fit and fail to build:
    ///
    /// ```compile_fail
    /// let cell = wordcell::AtomicIntCell::<u64>::new(1);
    /// ```
    AtomicIntCell, u32, 4
}

impl<T: Integer> AtomicIntCell<T> {
    /// Atomically loads the value.
    #[inline]
    pub fn get(&self) -> T {
        self.raw.get()
    }
}
