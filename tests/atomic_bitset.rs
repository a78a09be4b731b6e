use wordcell::{AtomicSetCell, FlagSet};

type Small = FlagSet<5>;
type Full = FlagSet<31>;

#[test]
fn atomic_bitset_basic() {
    let b = AtomicSetCell::<Full>::empty();
    assert_eq!(AtomicSetCell::<Full>::DOMAIN, 31);

    assert!(!b.contains(0));
    assert!(!b.include(0));
    assert!(b.contains(0));
    assert!(b.include(0));

    assert!(!b.include(30));
    assert!(b.contains(30));
    assert_eq!(b.len(), 2);

    let prev = b.clear();
    assert_eq!(prev.bits(), 1 | (1 << 30));
    assert!(!b.contains(0));
    assert!(!b.contains(30));
    assert!(b.is_empty());
}

#[test]
fn exclude_reports_previous_membership() {
    let b = AtomicSetCell::new(Small::empty().with(2).with(4));
    assert!(b.exclude(2));
    assert!(!b.exclude(2));
    assert!(b.membership_test(4));
    assert_eq!(b.bits(), 0b1_0000);
}

#[test]
fn out_of_domain_queries_are_false() {
    let b = AtomicSetCell::new(Small::FULL);
    assert!(b.contains(4));
    assert!(!b.contains(5));
    assert!(!b.contains(31));
    assert!(!b.contains(u32::MAX));
}

#[test]
#[should_panic(expected = "outside")]
fn include_out_of_domain_panics() {
    let b = AtomicSetCell::<Small>::empty();
    b.include(5);
}

#[test]
fn union_and_difference_of_snapshots() {
    let a = AtomicSetCell::new(Small::empty().with(0).with(1));
    let b = AtomicSetCell::new(Small::empty().with(1).with(3));

    assert_eq!(a.union(&b), Small::empty().with(0).with(1).with(3));
    assert_eq!(a.difference(&b), Small::empty().with(0));
    assert_eq!(&a + &b, a.union(&b));
    assert_eq!(&b - &a, Small::empty().with(3));
}

#[test]
fn compare_exchange_on_sets() {
    let cell = AtomicSetCell::<Small>::empty();
    let seen = cell.compare_exchange(Small::FULL, Small::empty().with(1));
    assert!(seen.is_empty());
    assert!(cell.is_empty());
    assert!(cell.compare_exchange(Small::FULL, Small::EMPTY).is_empty());
    assert!(cell.eq_value(Small::FULL));
}

#[test]
fn flag_set_iterates_members_in_order() {
    let set: Small = [4u32, 0, 2].into_iter().collect();
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
    assert_eq!(set.len(), 3);
    assert!(Small::from_bits(1 << 5).is_none());
    assert_eq!(Small::from_bits_truncate(0xFF), Small::FULL);
}
