//! Type-shape validation.
//!
//! Every cell type checks, once per instantiation, that its logical value type
//! belongs to the expected [`Category`] and fits the storage it is given. The
//! check is a `const fn`, so the cell kinds evaluate it inside an associated
//! constant and an invalid instantiation is rejected while the program is being
//! compiled, before any instance of the type can exist.

use core::fmt;

/// Largest index domain a bit-set value may declare (indices `0..=30`).
pub const MAX_SET_DOMAIN: u32 = 31;

/// The runtime shape category of a logical value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Boolean-like: zero is false, any other pattern is true.
    Boolean,
    /// Ordered enumeration with monotonic ordinals.
    Enumeration,
    /// Set of flag indices starting at zero, one bit per index.
    Set,
    /// Two's-complement or unsigned integer.
    Integer,
}

impl Category {
    /// Human-readable category name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Enumeration => "enumeration",
            Self::Set => "set",
            Self::Integer => "integer",
        }
    }

    const fn same(self, other: Self) -> bool {
        self as u8 == other as u8
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category and byte width of a logical value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Declared category.
    pub category: Category,
    /// Byte width of the value.
    pub width: usize,
    /// Number of indices in a set's domain. Zero for other categories.
    pub domain: u32,
}

impl Shape {
    /// Shape of a non-set value.
    pub const fn new(category: Category, width: usize) -> Self {
        Self {
            category,
            width,
            domain: 0,
        }
    }

    /// Shape of a set value over indices `0..domain`.
    pub const fn set(width: usize, domain: u32) -> Self {
        Self {
            category: Category::Set,
            width,
            domain,
        }
    }
}

/// A logical value type cannot back the requested cell.
///
/// These are configuration errors: they describe how a cell type was
/// instantiated, never anything that happens at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// The value's category is not the one the cell kind accepts.
    CategoryMismatch {
        /// Category the cell kind requires.
        expected: Category,
        /// Category the value type declares.
        found: Category,
    },
    /// The value is wider than the storage available to it.
    TooWide {
        /// Declared width of the value.
        width: usize,
        /// Widest value the cell accepts.
        max_width: usize,
    },
    /// The value has no bytes to store.
    EmptyWidth,
    /// The set declares more indices than a single word can hold.
    SetDomainTooLarge {
        /// Declared domain size.
        domain: u32,
    },
}

impl ShapeError {
    /// Aborts constant evaluation with a message describing `self`.
    ///
    /// Const panics cannot format, so each variant carries a fixed message.
    pub const fn fail(self) -> ! {
        match self {
            Self::CategoryMismatch { .. } => {
                panic!("cell value type has the wrong category for this cell kind")
            }
            Self::TooWide { .. } => panic!("cell value type is wider than its storage word"),
            Self::EmptyWidth => panic!("cell value type is zero-sized"),
            Self::SetDomainTooLarge { .. } => {
                panic!("set cell domain exceeds 31 indices")
            }
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CategoryMismatch { expected, found } => {
                write!(f, "value type is {found}, cell requires {expected}")
            }
            Self::TooWide { width, max_width } => {
                write!(f, "value type is {width} bytes wide, at most {max_width} fit")
            }
            Self::EmptyWidth => f.write_str("value type is zero-sized"),
            Self::SetDomainTooLarge { domain } => write!(
                f,
                "set domain has {domain} indices, at most {MAX_SET_DOMAIN} are supported"
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Checks `shape` against the category and width a cell kind accepts.
///
/// # Errors
/// Returns the first [`ShapeError`] found: zero width, category mismatch,
/// excess width, then (for sets) an oversized domain.
pub const fn validate_shape(
    shape: Shape,
    category: Category,
    max_width: usize,
) -> Result<Shape, ShapeError> {
    if shape.width == 0 {
        return Err(ShapeError::EmptyWidth);
    }
    if !shape.category.same(category) {
        return Err(ShapeError::CategoryMismatch {
            expected: category,
            found: shape.category,
        });
    }
    if shape.width > max_width {
        return Err(ShapeError::TooWide {
            width: shape.width,
            max_width,
        });
    }
    if category.same(Category::Set) && shape.domain > MAX_SET_DOMAIN {
        return Err(ShapeError::SetDomainTooLarge {
            domain: shape.domain,
        });
    }
    Ok(shape)
}

/// [`validate_shape`] for constant contexts: panics during evaluation on error.
pub const fn require_shape(shape: Shape, category: Category, max_width: usize) -> Shape {
    match validate_shape(shape, category, max_width) {
        Ok(shape) => shape,
        Err(err) => err.fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_shape() {
        let shape = Shape::new(Category::Integer, 4);
        assert_eq!(validate_shape(shape, Category::Integer, 4), Ok(shape));
        assert_eq!(validate_shape(shape, Category::Integer, 8), Ok(shape));
    }

    #[test]
    fn rejects_oversized_width() {
        let shape = Shape::new(Category::Integer, 8);
        assert_eq!(
            validate_shape(shape, Category::Integer, 4),
            Err(ShapeError::TooWide {
                width: 8,
                max_width: 4
            })
        );
    }

    #[test]
    fn rejects_wrong_category() {
        let shape = Shape::new(Category::Boolean, 1);
        let err = validate_shape(shape, Category::Enumeration, 4).unwrap_err();
        assert_eq!(
            err,
            ShapeError::CategoryMismatch {
                expected: Category::Enumeration,
                found: Category::Boolean,
            }
        );
        assert_eq!(
            err.to_string(),
            "value type is boolean, cell requires enumeration"
        );
    }

    #[test]
    fn set_domain_ceiling() {
        assert!(validate_shape(Shape::set(4, 31), Category::Set, 4).is_ok());
        assert_eq!(
            validate_shape(Shape::set(4, 32), Category::Set, 4),
            Err(ShapeError::SetDomainTooLarge { domain: 32 })
        );
    }

    #[test]
    fn zero_width_is_rejected_first() {
        assert_eq!(
            validate_shape(Shape::new(Category::Set, 0), Category::Integer, 4),
            Err(ShapeError::EmptyWidth)
        );
    }

    #[test]
    fn require_shape_is_usable_in_const() {
        const SHAPE: Shape = require_shape(Shape::new(Category::Boolean, 2), Category::Boolean, 4);
        assert_eq!(SHAPE.width, 2);
    }

    #[test]
    #[should_panic(expected = "wider than its storage word")]
    fn require_shape_panics_at_runtime_too() {
        let _ = require_shape(Shape::new(Category::Integer, 8), Category::Integer, 4);
    }
}
