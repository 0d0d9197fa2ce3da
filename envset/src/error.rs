//! Error types for binding environment variables to records

use std::num::ParseIntError;

use crate::coerce::ParseBoolError;

/// Errors that can occur while unmarshalling or marshalling a record.
///
/// Traversal is fail-fast: the first failing field aborts the whole call,
/// including any nested record being walked at the time. Fields assigned and
/// keys consumed before the failure are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// The target is not a present record.
    ///
    /// Returned when the top-level target is an `Option<R>` holding `None`.
    #[error("value must be a non-null reference to a record")]
    InvalidValue,

    /// A field bound to a key is not `pub` and cannot be assigned.
    #[error("field '{field}' bound to '{key}' must be public")]
    UnexportedField {
        /// Name of the offending field
        field: &'static str,
        /// Key the field is bound to
        key: &'static str,
    },

    /// A value has no coercion rule for the field's type, or a list element
    /// failed its per-element parse.
    #[error("field is an unsupported type: cannot read '{value}' as {type_name}")]
    UnsupportedType {
        /// Fully qualified type name the value was coerced to
        type_name: &'static str,
        /// The value (or list element) that was rejected
        value: String,
    },

    /// An integer literal was malformed.
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    /// A boolean literal was malformed.
    #[error(transparent)]
    ParseBool(#[from] ParseBoolError),

    /// An environment entry has no `=` between key and value.
    #[error("environment entry '{entry}' is missing a '=' separator")]
    MissingSeparator {
        /// The raw entry as read
        entry: String,
    },
}

impl EnvError {
    /// Create an unexported field error (used by macro-generated code)
    #[doc(hidden)]
    pub fn unexported(field: &'static str, key: &'static str) -> Self {
        Self::UnexportedField { field, key }
    }

    /// Create an unsupported type error for `T`
    pub(crate) fn unsupported<T: ?Sized>(value: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: std::any::type_name::<T>(),
            value: value.into(),
        }
    }
}
