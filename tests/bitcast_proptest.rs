use proptest::prelude::*;
use wordcell::{AtomicIntCell, AtomicSetCell, FlagSet, RawCell};

#[cfg(target_has_atomic = "64")]
use wordcell::AtomicInt64Cell;

#[derive(Debug, Clone)]
enum Operation {
    Add(i8),
    Sub(i8),
    Exchange(i8),
    CompareExchange(i8, i8),
}

proptest! {
    #[test]
    fn narrow_values_keep_their_pattern(v in any::<i8>(), w in any::<u16>(), x in any::<i32>()) {
        let a = AtomicIntCell::new(v);
        prop_assert_eq!(a.get(), v);
        prop_assert_eq!(a.as_raw().as_word(), u32::from(v as u8));

        let b = AtomicIntCell::new(w);
        prop_assert_eq!(b.get(), w);
        prop_assert_eq!(b.as_raw().as_word(), u32::from(w));

        let c = AtomicIntCell::new(x);
        prop_assert_eq!(c.get(), x);
        prop_assert_eq!(c.as_raw().as_word(), x as u32);
    }

    #[test]
    fn raw_conversion_is_masked(v in any::<i16>()) {
        let raw = RawCell::<i16, u32>::to_raw(v);
        prop_assert_eq!(raw & !RawCell::<i16, u32>::mask(), 0);
        prop_assert_eq!(RawCell::<i16, u32>::from_bits(raw), v);
    }

    #[test]
    fn byte_cell_matches_wrapping_model(start in any::<i8>(), ops in proptest::collection::vec(
        prop_oneof![
            any::<i8>().prop_map(Operation::Add),
            any::<i8>().prop_map(Operation::Sub),
            any::<i8>().prop_map(Operation::Exchange),
            (any::<i8>(), any::<i8>()).prop_map(|(n, e)| Operation::CompareExchange(n, e)),
        ],
        1..64
    )) {
        let cell = AtomicIntCell::new(start);
        let mut model = start;

        for op in ops {
            match op {
                Operation::Add(d) => {
                    prop_assert_eq!(cell.add(d), model);
                    model = model.wrapping_add(d);
                }
                Operation::Sub(d) => {
                    prop_assert_eq!(cell.sub(d), model);
                    model = model.wrapping_sub(d);
                }
                Operation::Exchange(v) => {
                    prop_assert_eq!(cell.exchange(v), model);
                    model = v;
                }
                Operation::CompareExchange(new, expected) => {
                    prop_assert_eq!(cell.compare_exchange(new, expected), model);
                    if model == expected {
                        model = new;
                    }
                }
            }
            prop_assert_eq!(cell.get(), model);
            prop_assert_eq!(cell.as_raw().as_word() & !0xFF, 0, "carry leaked above the byte");
        }
    }

    #[test]
    fn comparisons_follow_values(a in any::<i16>(), b in any::<i16>()) {
        let x = AtomicIntCell::new(a);
        let y = AtomicIntCell::new(b);
        prop_assert_eq!(x.cmp_value(b), a.cmp(&b));
        prop_assert_eq!(x < y, a < b);
        prop_assert_eq!(&x + &y, a.wrapping_add(b));
    }

    #[test]
    fn set_cell_matches_bit_model(ops in proptest::collection::vec((any::<bool>(), 0u32..12), 1..64)) {
        let cell = AtomicSetCell::<FlagSet<12>>::empty();
        let mut model = 0u32;

        for (insert, index) in ops {
            let was = model & (1 << index) != 0;
            if insert {
                prop_assert_eq!(cell.include(index), was);
                model |= 1 << index;
            } else {
                prop_assert_eq!(cell.exclude(index), was);
                model &= !(1 << index);
            }
            prop_assert_eq!(cell.bits(), model);
        }
        prop_assert_eq!(cell.len(), model.count_ones());
    }
}

#[cfg(target_has_atomic = "64")]
proptest! {
    #[test]
    fn wide_cell_round_trips(v in any::<i64>(), w in any::<u32>()) {
        let a = AtomicInt64Cell::new(v);
        prop_assert_eq!(a.get(), v);
        prop_assert_eq!(a.get_via_cas(), v);
        prop_assert_eq!(a.as_raw().as_word(), v as u64);

        let b = AtomicInt64Cell::new(w);
        prop_assert_eq!(b.increment(), w.wrapping_add(1));
        prop_assert_eq!(b.as_raw().as_word(), u64::from(w.wrapping_add(1)));
    }
}
