//! # `wordcell` - Typed Lock-Free Atomic Cells
//!
//! Typed wrappers around single machine words (8/16/32/64-bit) that give an
//! ordinary boolean-like, enumerated, bit-set or integer value atomic read,
//! write, exchange and compare-exchange, plus atomic arithmetic and bit
//! operations where the value kind supports them. No locks, no allocation.
//!
//! ## Guarantees
//!
//! ### Representation
//! - **Bit-cast, never numeric cast**: a value is stored as its own bytes in the
//!   low end of the word and rebuilt from those bytes. Signed, unsigned and
//!   enumerated patterns survive exactly.
//! - **Masked storage**: bits above the value's width never leak into results
//!   or comparisons. Arithmetic on narrow values clears carries right after
//!   the atomic add.
//! - **Validated types**: each cell type checks its value type's category and
//!   width in an associated constant. A cell over an unsupported type is a
//!   compile-time error, not a runtime surprise.
//!
//! ### Concurrency
//! - **Lock-free**: every operation is one hardware atomic, or a
//!   compare-exchange loop hidden inside the compound operations that need it.
//! - **Sequentially consistent**: all atomic accesses use `SeqCst` on the
//!   cell's single word.
//! - **Snapshot combination**: operators over two cells (`&a + &b`, set union,
//!   boolean combinators, comparisons) read each cell independently. The pair
//!   is never read as one atomic unit, so a concurrent writer may slip between
//!   the two reads.
//! - **Unsafe fast paths**: `unsafe_get`/`unsafe_assign` are plain memory
//!   accesses for single-threaded phases; the caller guarantees no other
//!   thread touches the cell meanwhile.
//!
//! ## Architecture
//!
//! 1. **Words** ([`word::Word`]): `u8`..`u64` and their `core::sync::atomic`
//!    primitives.
//! 2. **Shapes** ([`shape`]): value categories, widths, and the `const fn`
//!    validation every cell type runs.
//! 3. **Values** ([`value`]): traits describing what each kind accepts, plus
//!    [`WordBool`], [`LongBool`] and [`FlagSet`].
//! 4. **Cells** ([`atomic`]): the shared [`RawCell`] core and the five kinds.
//!
//! ## Example
//!
//! ```rust
//! use std::thread;
//! use wordcell::{AtomicIntCell, AtomicSetCell, FlagSet};
//!
//! let hits = AtomicIntCell::<u16>::default();
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..1000 {
//!                 hits.increment();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(hits.get(), 4000);
//!
//! let ready = AtomicSetCell::<FlagSet<3>>::empty();
//! assert!(!ready.include(1));
//! assert!(ready.contains(1) && !ready.contains(0));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `trace`-level events from contended retry loops.
//! - `cas-load`: read 64-bit cells with a compare-exchange instead of a plain
//!   atomic load.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

/// Emits a `trace` event from a retry loop when the `tracing` feature is on.
macro_rules! trace_retry {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: "wordcell", $($arg)+);
    };
}

pub mod atomic;
pub mod shape;
pub mod value;
pub mod word;

#[cfg(target_has_atomic = "64")]
pub use atomic::AtomicInt64Cell;
pub use atomic::{AtomicBoolCell, AtomicEnumCell, AtomicIntCell, AtomicSetCell, RawCell};
pub use shape::{validate_shape, Category, Shape, ShapeError};
pub use value::{BoolLike, CellValue, FlagSet, Integer, LongBool, Ordinal, SetLike, WordBool};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // A cell is exactly its storage word.
    assert!(mem::size_of::<AtomicBoolCell<bool>>() == 1);
    assert!(mem::size_of::<AtomicBoolCell<WordBool>>() == 2);
    assert!(mem::size_of::<AtomicBoolCell<LongBool>>() == 4);
    assert!(mem::size_of::<AtomicIntCell<i8>>() == 4);
    assert!(mem::size_of::<AtomicSetCell<FlagSet<31>>>() == 4);
    assert!(mem::align_of::<AtomicIntCell<u8>>() == mem::align_of::<u32>());

    // `FlagSet` is a transparent `u32`.
    assert!(mem::size_of::<FlagSet<3>>() == mem::size_of::<u32>());
};

#[cfg(target_has_atomic = "64")]
const _: () = {
    assert!(core::mem::size_of::<AtomicInt64Cell<i64>>() == 8);
    assert!(core::mem::size_of::<AtomicInt64Cell<u16>>() == 8);
};
