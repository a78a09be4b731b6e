use crate::value::Integer;

integer_cell! {
    /// An atomic integer cell for values of up to eight bytes, stored in a
    /// `u64`.
    ///
    /// [`get`](Self::get) uses the native 64-bit atomic load. Building with the
    /// `cas-load` feature switches it to [`get_via_cas`](Self::get_via_cas) for
    /// targets whose 64-bit loads must go through a read-modify-write.
    ///
    /// # Panics
    /// `/` and `%` panic on a zero divisor and on `MIN / -1`, as they do for
    /// `T` itself. Every other operation is total.
    AtomicInt64Cell, u64, 8
}

impl<T: Integer> AtomicInt64Cell<T> {
    /// Atomically loads the value.
    #[inline]
    pub fn get(&self) -> T {
        #[cfg(feature = "cas-load")]
        {
            self.get_via_cas()
        }
        #[cfg(not(feature = "cas-load"))]
        {
            self.raw.get()
        }
    }

    /// Loads the value with a compare-exchange of the word against itself.
    ///
    /// Never changes the stored value, but does take the cache line
    /// exclusively.
    #[inline]
    pub fn get_via_cas(&self) -> T {
        crate::RawCell::<T, u64>::from_bits(self.raw.load_raw_via_cas())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_width_round_trip() {
        let cell = AtomicInt64Cell::new(i64::MIN);
        assert_eq!(cell.get(), i64::MIN);
        assert_eq!(cell.get_via_cas(), i64::MIN);
        assert_eq!(cell.as_raw().as_word(), 0x8000_0000_0000_0000);
        assert_eq!(cell.decrement(), i64::MAX);
    }

    #[test]
    fn narrow_values_in_wide_storage() {
        let cell = AtomicInt64Cell::<u32>::new(u32::MAX);
        assert_eq!(cell.increment(), 0);
        assert_eq!(cell.as_raw().as_word(), 0);
        assert_eq!(AtomicInt64Cell::<u32>::SHAPE.width, 4);
    }

    #[test]
    fn compare_exchange_returns_observed() {
        let cell = AtomicInt64Cell::new(40u64);
        assert_eq!(cell.compare_exchange(50, 41), 40);
        assert_eq!(cell.get(), 40);
        assert_eq!(cell.compare_exchange(50, 40), 40);
        assert_eq!(cell.get_via_cas(), 50);
    }

    #[test]
    fn float_view_of_large_unsigned() {
        let cell = AtomicInt64Cell::new(1u64 << 40);
        assert_eq!(cell.to_f64(), 1_099_511_627_776.0);
        assert_eq!(AtomicInt64Cell::new(-1i64).to_f64(), -1.0);
    }
}
