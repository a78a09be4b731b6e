/// Implements [`Ordinal`](crate::Ordinal) for a fieldless enum.
///
/// The enum must have a primitive representation of at most four bytes and
/// derive `zerocopy::AsBytes`. Its discriminants must increase in declaration
/// order and be non-negative, since cells compare raw ordinals. A negative
/// lowest discriminant, or a range whose bounds are reversed, makes the
/// generated shape fail to evaluate, so no cell over the type builds.
///
/// # Example
///
/// ```rust
/// use wordcell::{ordinal, AtomicEnumCell};
/// use zerocopy::{AsBytes, FromZeroes};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromZeroes)]
/// #[repr(u8)]
/// enum Phase {
///     Idle,
///     Running,
///     Done,
/// }
///
/// ordinal!(Phase: Idle..=Done);
///
/// let phase = AtomicEnumCell::new(Phase::Idle);
/// phase.assign(Phase::Running);
/// assert!(phase.lt_value(Phase::Done));
/// assert_eq!(phase.max_value(), Phase::Done);
/// ```
///
/// Negative ordinals are rejected:
///
/// ```compile_fail
/// use wordcell::{ordinal, AtomicEnumCell};
/// use zerocopy::AsBytes;
///
/// #[derive(Clone, Copy, AsBytes)]
/// #[repr(i8)]
/// enum Offset {
///     Below = -1,
///     Zero = 0,
///     Above = 1,
/// }
///
/// ordinal!(Offset: Below..=Above);
///
/// let cell = AtomicEnumCell::new(Offset::Zero);
/// ```
///
/// So are reversed bounds:
///
/// ```compile_fail
/// use wordcell::{ordinal, AtomicEnumCell};
/// use zerocopy::AsBytes;
///
/// #[derive(Clone, Copy, AsBytes)]
/// #[repr(u8)]
/// enum Light {
///     Red,
///     Amber,
///     Green,
/// }
///
/// ordinal!(Light: Green..=Red);
///
/// let cell = AtomicEnumCell::new(Light::Red);
/// ```
#[macro_export]
macro_rules! ordinal {
    ($ty:ident : $min:ident ..= $max:ident) => {
        impl $crate::CellValue for $ty {
            const SHAPE: $crate::Shape = {
                assert!(
                    ($ty::$min as i64) >= 0,
                    "ordinal enum has a negative lowest discriminant"
                );
                assert!(
                    ($ty::$min as i64) <= ($ty::$max as i64),
                    "ordinal enum bounds are reversed"
                );
                $crate::Shape::new($crate::Category::Enumeration, ::core::mem::size_of::<$ty>())
            };
        }

        impl $crate::Ordinal for $ty {
            const MIN: Self = $ty::$min;
            const MAX: Self = $ty::$max;
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{CellValue, Category, Ordinal};
    use zerocopy::AsBytes;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes)]
    #[repr(u16)]
    enum Level {
        Low = 0,
        Mid = 5,
        High = 9,
    }

    ordinal!(Level: Low..=High);

    #[test]
    fn ordinal_macro_reports_shape_and_bounds() {
        assert_eq!(Level::SHAPE.category, Category::Enumeration);
        assert_eq!(Level::SHAPE.width, 2);
        assert_eq!(Level::MIN, Level::Low);
        assert_eq!(Level::MAX, Level::High);
        assert_eq!(Level::Mid.as_bytes().len(), 2);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes)]
    #[repr(i8)]
    enum Step {
        First = 0,
        Second = 1,
        Last = 127,
    }

    ordinal!(Step: First..=Last);

    #[test]
    fn signed_repr_with_non_negative_ordinals_orders_by_raw_value() {
        let cell = crate::AtomicEnumCell::new(Step::Second);
        assert!(cell.gt_value(Step::First));
        assert!(cell.lt_value(Step::Last));
        assert_eq!(crate::AtomicEnumCell::<Step>::min_ordinal(), 0);
        assert_eq!(crate::AtomicEnumCell::<Step>::max_ordinal(), 127);
        assert_eq!(Step::SHAPE.width, 1);
    }
}
