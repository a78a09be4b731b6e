use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::thread;
use wordcell::{AtomicBoolCell, AtomicInt64Cell, AtomicIntCell, AtomicSetCell, FlagSet};

const OPS: u64 = 10_000;
const THREADS: usize = 4;

fn bench_counters(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("std_atomic_u32", |b| {
        let counter = AtomicU32::new(0);
        b.iter(|| {
            for _ in 0..OPS {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            black_box(counter.load(Ordering::SeqCst));
        })
    });

    group.bench_function("int_cell_u32", |b| {
        let counter = AtomicIntCell::<u32>::default();
        b.iter(|| {
            for _ in 0..OPS {
                black_box(counter.increment());
            }
        })
    });

    // Narrow values pay for the carry-clearing AND after each add.
    group.bench_function("int_cell_i8", |b| {
        let counter = AtomicIntCell::<i8>::default();
        b.iter(|| {
            for _ in 0..OPS {
                black_box(counter.add(1));
            }
        })
    });

    group.bench_function("int64_cell_u64", |b| {
        let counter = AtomicInt64Cell::<u64>::default();
        b.iter(|| {
            for _ in 0..OPS {
                black_box(counter.increment());
            }
        })
    });

    group.finish();
}

fn bench_loads(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("std_atomic_u64", |b| {
        let word = AtomicU64::new(7);
        b.iter(|| {
            for _ in 0..OPS {
                black_box(word.load(Ordering::SeqCst));
            }
        })
    });

    // Follows the `cas-load` feature; xtask runs both configurations.
    group.bench_function("int64_cell_get", |b| {
        let cell = AtomicInt64Cell::new(7i64);
        b.iter(|| {
            for _ in 0..OPS {
                black_box(cell.get());
            }
        })
    });

    group.bench_function("int64_cell_get_via_cas", |b| {
        let cell = AtomicInt64Cell::new(7i64);
        b.iter(|| {
            for _ in 0..OPS {
                black_box(cell.get_via_cas());
            }
        })
    });

    group.finish();
}

fn bench_flags(c: &mut Criterion) {
    let mut group = c.benchmark_group("flags");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("set_include_exclude", |b| {
        let set = AtomicSetCell::<FlagSet<31>>::empty();
        b.iter(|| {
            for i in 0..OPS {
                let index = (i % 31) as u32;
                black_box(set.include(index));
                black_box(set.exclude(index));
            }
        })
    });

    group.bench_function("bool_test_and_set", |b| {
        let flag = AtomicBoolCell::<bool>::default();
        b.iter(|| {
            for _ in 0..OPS {
                black_box(flag.test_and_set());
                flag.set_false();
            }
        })
    });

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    group.throughput(Throughput::Elements(OPS * THREADS as u64));

    group.bench_function("shared_int_cell", |b| {
        let counter = AtomicIntCell::<u32>::default();
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..THREADS {
                    s.spawn(|| {
                        for _ in 0..OPS {
                            counter.increment();
                        }
                    });
                }
            });
            black_box(counter.get());
        })
    });

    group.bench_function("padded_per_thread_cells", |b| {
        let counters: Vec<CachePadded<AtomicIntCell<u32>>> =
            (0..THREADS).map(|_| CachePadded::new(AtomicIntCell::default())).collect();
        b.iter(|| {
            thread::scope(|s| {
                for counter in &counters {
                    s.spawn(move || {
                        for _ in 0..OPS {
                            counter.increment();
                        }
                    });
                }
            });
            black_box(counters.iter().map(|c| c.get()).fold(0u32, u32::wrapping_add));
        })
    });

    group.bench_function("shared_set_cell", |b| {
        let set = AtomicSetCell::<FlagSet<31>>::empty();
        b.iter(|| {
            thread::scope(|s| {
                for t in 0..THREADS as u32 {
                    let set = &set;
                    s.spawn(move || {
                        for i in 0..OPS {
                            let index = (t * 7 + i as u32) % 31;
                            set.include(index);
                            set.exclude(index);
                        }
                    });
                }
            });
            black_box(set.bits());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_counters, bench_loads, bench_flags, bench_contention);
criterion_main!(benches);
