use alloc::string::String;

use thiserror::Error;

use crate::access::ParseError;
use crate::registry::ConversionError;

/// Coarse classification of a [`PropertyError`].
///
/// Callers that only need to decide how to react (skip, report, abort)
/// match on this instead of on the detailed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The path text could not be parsed.
    MalformedExpression,
    /// A step names something the target does not expose in the
    /// requested direction.
    UnknownProperty,
    /// A non-final step produced no value.
    NestedNull,
    /// An index step addressed a position outside of the sequence.
    IndexOutOfRange,
    /// A value could not be converted to, or stored as, the declared type.
    ConversionFailure,
    /// The target does not support the operation at all.
    UnsupportedOperation,
}

/// The error of every property access operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PropertyError {
    #[error(transparent)]
    MalformedPath(#[from] ParseError),
    #[error("unknown property `{name}` on `{type_path}`")]
    UnknownProperty {
        name: String,
        type_path: &'static str,
    },
    #[error("property `{name}` of `{type_path}` is not readable")]
    NotReadable {
        name: String,
        type_path: &'static str,
    },
    #[error("property `{name}` of `{type_path}` is not writeable")]
    NotWriteable {
        name: String,
        type_path: &'static str,
    },
    #[error("property `{name}` of `{type_path}` is not {expected}")]
    IncompatibleAccess {
        name: String,
        type_path: &'static str,
        expected: &'static str,
    },
    #[error("null value in nested property path `{path}`")]
    NestedNull { path: String },
    #[error("index {index} out of range for `{name}` with length {len}")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("cannot store a `{found}` in `{name}` of type `{expected}`")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{operation}` is not supported by `{type_path}`")]
    Unsupported {
        operation: &'static str,
        type_path: &'static str,
    },
}

impl PropertyError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedPath(_) => ErrorKind::MalformedExpression,
            Self::UnknownProperty { .. }
            | Self::NotReadable { .. }
            | Self::NotWriteable { .. }
            | Self::IncompatibleAccess { .. } => ErrorKind::UnknownProperty,
            Self::NestedNull { .. } => ErrorKind::NestedNull,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::Conversion(_) | Self::TypeMismatch { .. } => ErrorKind::ConversionFailure,
            Self::Unsupported { .. } => ErrorKind::UnsupportedOperation,
        }
    }

    #[inline]
    pub(crate) fn unknown(name: &str, type_path: &'static str) -> Self {
        Self::UnknownProperty {
            name: name.into(),
            type_path,
        }
    }

    #[inline]
    pub(crate) fn not_readable(name: &str, type_path: &'static str) -> Self {
        Self::NotReadable {
            name: name.into(),
            type_path,
        }
    }

    #[inline]
    pub(crate) fn not_writeable(name: &str, type_path: &'static str) -> Self {
        Self::NotWriteable {
            name: name.into(),
            type_path,
        }
    }

    #[inline]
    pub(crate) fn incompatible(name: &str, type_path: &'static str, expected: &'static str) -> Self {
        Self::IncompatibleAccess {
            name: name.into(),
            type_path,
            expected,
        }
    }

    /// Creates an [`IndexOutOfRange`](Self::IndexOutOfRange) error.
    ///
    /// Public so that hand written dedicated indexed accessors can report it.
    #[inline]
    pub fn index_out_of_range(name: &str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            name: name.into(),
            index,
            len,
        }
    }

    #[inline]
    pub(crate) fn mismatch(name: &str, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
            found,
        }
    }

    #[inline]
    pub(crate) fn unsupported(operation: &'static str, type_path: &'static str) -> Self {
        Self::Unsupported {
            operation,
            type_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, PropertyError};
    use alloc::string::ToString;

    #[test]
    fn kinds() {
        let e = PropertyError::not_writeable("id", "demo::Person");
        assert_eq!(e.kind(), ErrorKind::UnknownProperty);
        assert_eq!(e.to_string(), "property `id` of `demo::Person` is not writeable");

        let e = PropertyError::mismatch("age", "u32", "bool");
        assert_eq!(e.kind(), ErrorKind::ConversionFailure);

        let e = PropertyError::index_out_of_range("phones", 3, 2);
        assert_eq!(e.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(e.to_string(), "index 3 out of range for `phones` with length 2");
    }
}
