//! Snapshot serialization.
//!
//! A cell serializes as the value it holds at the moment of the call and
//! deserializes into a fresh cell holding the decoded value.

use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(target_has_atomic = "64")]
use super::AtomicInt64Cell;
use super::{AtomicBoolCell, AtomicEnumCell, AtomicIntCell, AtomicSetCell};
use crate::value::{BoolLike, Integer, Ordinal, SetLike};

macro_rules! snapshot_serde {
    ($($cell:ident<$bound:ident>),* $(,)?) => {$(
        impl<T: $bound + Serialize> Serialize for $cell<T> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.get().serialize(serializer)
            }
        }

        impl<'de, T: $bound + Deserialize<'de>> Deserialize<'de> for $cell<T> {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                T::deserialize(deserializer).map(Self::new)
            }
        }
    )*};
}

snapshot_serde! {
    AtomicBoolCell<BoolLike>,
    AtomicEnumCell<Ordinal>,
    AtomicSetCell<SetLike>,
    AtomicIntCell<Integer>,
}

#[cfg(target_has_atomic = "64")]
snapshot_serde! {
    AtomicInt64Cell<Integer>,
}
