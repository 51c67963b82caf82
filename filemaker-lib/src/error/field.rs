//! Typed getter errors

/// Why a typed [`Record`](crate::model::Record) getter could not return a
/// value.
///
/// A field that exists but is empty is not an error; getters return
/// `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The layout returned no field with this name.
    #[error("No field '{field}' on this record")]
    Missing { field: String },

    /// The field's coerced value is of another value type, for example a
    /// number field whose data did not parse and stayed text, or a
    /// repeating field read as a single value.
    #[error("Field '{field}' holds a {actual} value, not {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub(crate) fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Returns the field name as the caller spelled it.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}
