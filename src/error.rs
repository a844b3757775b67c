//! Error types for the forecast renderer

use thiserror::Error;

/// Failure modes of a render call.
///
/// A render either aborts because a required field is absent somewhere in
/// the payload, or because traversal hit a value of the wrong shape. There
/// is no further classification and no partial result: the caller gets the
/// full text or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A required field was absent at some nesting level
    #[error("Missing required field in JSON: {field}")]
    FieldMissing { field: String },

    /// Any other structural or type error during traversal
    #[error("Error processing weather data: {message}")]
    Failure { message: String },
}

impl RenderError {
    /// Create a field-missing error carrying the dotted path of the field
    pub fn field_missing<S: Into<String>>(field: S) -> Self {
        Self::FieldMissing {
            field: field.into(),
        }
    }

    /// Create a general render failure
    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the client's payload rather than
    /// an unexpected shape
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, RenderError::FieldMissing { .. })
    }
}
