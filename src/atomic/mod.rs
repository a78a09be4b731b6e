//! Lock-free atomic cells.
//!
//! Every cell is a single storage word. The kinds differ in the value
//! category they accept and in the operations they expose:
//!
//! | Kind                | Values                    | Storage      |
//! |---------------------|---------------------------|--------------|
//! | [`AtomicBoolCell`]  | `bool`, `WordBool`, `LongBool` | `u8`/`u16`/`u32` |
//! | [`AtomicEnumCell`]  | [`Ordinal`](crate::Ordinal) enums, ≤ 4 bytes | `u32` |
//! | [`AtomicSetCell`]   | [`FlagSet`](crate::FlagSet), ≤ 31 indices | `u32` |
//! | [`AtomicIntCell`]   | integers, ≤ 4 bytes       | `u32`        |
//! | [`AtomicInt64Cell`] | integers, ≤ 8 bytes       | `u64`        |
//!
//! Single-cell operations are atomic and sequentially consistent. Operations
//! that involve two cells are not: each cell is read on its own.

/// The cell core shared by every kind.
pub mod core;
/// Boolean-like cells.
pub mod bool;
/// Enumerated cells.
pub mod enumerated;
/// Bit-set cells.
pub mod bitset;
/// Integer cells of at most 32 bits.
#[macro_use]
pub mod int;
/// 64-bit integer cells.
#[cfg(target_has_atomic = "64")]
pub mod int64;
mod serialize;

pub use self::core::RawCell;
pub use bitset::AtomicSetCell;
pub use bool::AtomicBoolCell;
pub use enumerated::AtomicEnumCell;
pub use int::AtomicIntCell;
#[cfg(target_has_atomic = "64")]
pub use int64::AtomicInt64Cell;
