use crossbeam_utils::CachePadded;
use std::thread;
use wordcell::{AtomicBoolCell, AtomicIntCell, AtomicSetCell, FlagSet};

const THREADS: usize = 8;
const ITERS: usize = 2_000;

#[test]
fn concurrent_increments_are_not_lost() {
    let counter = AtomicIntCell::<u32>::default();
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ITERS {
                    counter.increment();
                }
            });
        }
    });
    assert_eq!(counter.get() as usize, THREADS * ITERS);
}

#[test]
fn narrow_counter_wraps_under_contention() {
    // 8 * 2000 = 16000 = 62 * 256 + 128
    let counter = AtomicIntCell::<u8>::default();
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ITERS {
                    counter.add(1);
                }
            });
        }
    });
    assert_eq!(counter.get(), ((THREADS * ITERS) % 256) as u8);
    assert_eq!(counter.as_raw().as_word(), u32::from(counter.get()));
}

#[test]
fn narrow_add_racing_fetch_update_loses_nothing() {
    // fetch_update's compare-exchange may see a carry that add has not
    // cleared yet; it must retry rather than fail or drop the update.
    const OPS: usize = 20_000;
    let counter = AtomicIntCell::<u8>::default();
    thread::scope(|s| {
        for t in 0..THREADS {
            let counter = &counter;
            s.spawn(move || {
                for _ in 0..OPS {
                    if t % 2 == 0 {
                        counter.add(1);
                    } else {
                        counter.fetch_update(|v| v.wrapping_add(1));
                    }
                }
            });
        }
    });
    assert_eq!(counter.get(), ((THREADS * OPS) % 256) as u8);
    assert_eq!(counter.as_raw().as_word(), u32::from(counter.get()));
}

#[test]
fn narrow_add_racing_compare_exchange_keeps_word_masked() {
    let counter = AtomicIntCell::<u8>::new(0);
    let swaps = AtomicIntCell::<u32>::default();
    thread::scope(|s| {
        for t in 0..THREADS {
            let (counter, swaps) = (&counter, &swaps);
            s.spawn(move || {
                for _ in 0..ITERS {
                    if t % 2 == 0 {
                        counter.add(1);
                    } else {
                        let seen = counter.get();
                        if counter.compare_exchange(seen.wrapping_add(1), seen) == seen {
                            swaps.increment();
                        }
                    }
                }
            });
        }
    });
    let adds = (THREADS / 2) * ITERS;
    let expected = (adds + swaps.get() as usize) % 256;
    assert_eq!(counter.get(), expected as u8);
    assert_eq!(counter.as_raw().as_word(), u32::from(counter.get()));
}

#[test]
fn concurrent_add_and_sub_cancel() {
    let counter = AtomicIntCell::new(0i16);
    thread::scope(|s| {
        for t in 0..THREADS {
            let counter = &counter;
            s.spawn(move || {
                for _ in 0..ITERS {
                    if t % 2 == 0 {
                        counter.add(3);
                    } else {
                        counter.sub(3);
                    }
                }
            });
        }
    });
    assert_eq!(counter.get(), 0);
}

#[test]
fn only_one_thread_wins_test_and_set() {
    let flag = AtomicBoolCell::new(false);
    let winners = AtomicIntCell::<u32>::default();
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                if flag.test_and_set() {
                    winners.increment();
                }
            });
        }
    });
    assert_eq!(winners.get(), 1);
}

#[test]
fn disjoint_flag_updates_all_land() {
    let set = AtomicSetCell::<FlagSet<31>>::empty();
    thread::scope(|s| {
        for t in 0..THREADS as u32 {
            let set = &set;
            s.spawn(move || {
                for _ in 0..ITERS {
                    for index in (t..31).step_by(THREADS) {
                        set.include(index);
                    }
                }
            });
        }
    });
    assert_eq!(set.get(), FlagSet::<31>::FULL);
}

#[test]
fn include_exclude_claims_are_exclusive() {
    // Each index is a token: a thread owns it between a successful include
    // and its exclude.
    let held = AtomicSetCell::<FlagSet<4>>::empty();
    let claims = AtomicIntCell::<u32>::default();
    thread::scope(|s| {
        for t in 0..THREADS as u32 {
            let (held, claims) = (&held, &claims);
            s.spawn(move || {
                let index = t % 4;
                for _ in 0..ITERS {
                    if !held.include(index) {
                        claims.increment();
                        assert!(held.exclude(index));
                    }
                }
            });
        }
    });
    assert!(held.is_empty());
    assert!(claims.get() >= 4);
}

#[test]
fn padded_cells_sum_matches() {
    let counters: Vec<CachePadded<AtomicIntCell<u32>>> = (0..THREADS)
        .map(|_| CachePadded::new(AtomicIntCell::default()))
        .collect();
    thread::scope(|s| {
        for counter in &counters {
            s.spawn(move || {
                for _ in 0..ITERS {
                    counter.increment();
                }
            });
        }
    });
    let total: usize = counters.iter().map(|c| c.get() as usize).sum();
    assert_eq!(total, THREADS * ITERS);
}

#[test]
fn fetch_update_is_atomic_under_contention() {
    let cell = AtomicIntCell::new(0u32);
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ITERS {
                    cell.fetch_update(|v| v + 2);
                }
            });
        }
    });
    assert_eq!(cell.get() as usize, 2 * THREADS * ITERS);
}
