use std::fmt;

use thiserror::Error;

/// Errors raised while assembling a form.
///
/// These indicate a programming mistake in the code that builds the form
/// (a name registered twice), not a problem with user input. Callers
/// usually propagate them straight to a startup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A child with the same name already exists in the collection.
    #[error("component '{name}' already exists in '{collection}'")]
    DuplicateName {
        /// Name of the collection (or form) being extended
        collection: String,
        /// The colliding child name
        name: String,
    },
    /// A form with the same name was already registered.
    #[error("form '{name}' is already registered")]
    DuplicateForm {
        /// The colliding form name
        name: String,
    },
}

/// Error returned by name-keyed lookups on a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no field named '{name}'")]
pub struct NotFoundError {
    /// The requested name
    pub name: String,
}

impl NotFoundError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Error returned when a raw input value cannot be sanitized.
///
/// The message never contains the rejected input itself.
///
/// # Examples
///
/// ```
/// use form_core::{SanitizationError, SanitizationErrorKind};
///
/// let error = SanitizationError::new(SanitizationErrorKind::OutOfRange, "exceeds 64-bit range");
/// assert_eq!(error.kind(), SanitizationErrorKind::OutOfRange);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sanitization failed ({kind}): {message}")]
pub struct SanitizationError {
    kind: SanitizationErrorKind,
    message: String,
}

impl SanitizationError {
    /// Creates a new sanitization error.
    pub fn new(kind: SanitizationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SanitizationErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a value could not be sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizationErrorKind {
    /// The value has the wrong shape for the target type.
    NotSuitable,
    /// The value is numeric but outside the representable range.
    OutOfRange,
    /// A decimal value was given where a whole number is required.
    NotAWholeNumber,
    /// A normalization pattern could not be applied.
    Malformed,
    /// Text contains control or non-printable characters.
    ContainsControlChars,
    /// Text exceeds the configured maximum length.
    TooLong,
    /// The upload did not complete.
    UploadFailed,
}

impl fmt::Display for SanitizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSuitable => write!(f, "not suitable"),
            Self::OutOfRange => write!(f, "out of range"),
            Self::NotAWholeNumber => write!(f, "not a whole number"),
            Self::Malformed => write!(f, "malformed input"),
            Self::ContainsControlChars => write!(f, "contains control characters"),
            Self::TooLong => write!(f, "input too long"),
            Self::UploadFailed => write!(f, "upload failed"),
        }
    }
}
