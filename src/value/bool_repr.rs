//! Wide boolean representations.
//!
//! Foreign ABIs commonly pass booleans as 16- or 32-bit words where any
//! non-zero value is true. These wrappers keep the raw pattern intact so a cell
//! can store exactly what it was given.

use serde::{Deserialize, Serialize};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

use super::{BoolLike, CellValue};
use crate::shape::{Category, Shape};

macro_rules! wide_bool {
    ($(#[$meta:meta])* $name:ident($raw:ty)) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            AsBytes, FromBytes, FromZeroes, Serialize, Deserialize,
        )]
        #[serde(from = "bool", into = "bool")]
        #[repr(transparent)]
        pub struct $name(pub $raw);

        impl $name {
            /// The canonical true pattern (all bits set).
            pub const TRUE: Self = Self(<$raw>::MAX);
            /// The false pattern.
            pub const FALSE: Self = Self(0);

            /// Returns `true` for any non-zero pattern.
            #[inline(always)]
            pub const fn is_true(self) -> bool {
                self.0 != 0
            }
        }

        impl From<bool> for $name {
            #[inline]
            fn from(value: bool) -> Self {
                if value { Self::TRUE } else { Self::FALSE }
            }
        }

        impl From<$name> for bool {
            #[inline]
            fn from(value: $name) -> bool {
                value.is_true()
            }
        }

        impl CellValue for $name {
            const SHAPE: Shape = Shape::new(Category::Boolean, core::mem::size_of::<$raw>());
        }

        impl BoolLike for $name {
            type Word = $raw;

            const TRUE: Self = $name::TRUE;
            const FALSE: Self = $name::FALSE;
        }
    };
}

wide_bool! {
    /// A 16-bit boolean.
    WordBool(u16)
}

wide_bool! {
    /// A 32-bit boolean.
    LongBool(u32)
}
