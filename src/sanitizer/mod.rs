//! Sanitizers: normalize raw request input into typed values.
//!
//! Every sanitizer consumes a [`Tainted`] value and returns a [`Verified`]
//! one, so sanitized output can be told apart from raw input by type.
//! Sanitizers only normalize; whether a value is *acceptable* is decided by
//! validators and rules afterwards.

use std::sync::LazyLock;

use regex::Regex;

use crate::{RawValue, SanitizationError, SanitizationErrorKind, Tainted, UploadStatus, UploadedFile, Verified};

mod domain;
mod float;
mod integer;

pub use domain::DomainSanitizer;
pub use float::FloatSanitizer;
pub use integer::IntegerSanitizer;

pub(crate) type Pattern = LazyLock<Result<Regex, regex::Error>>;

/// Returns a compiled pattern, or a `Malformed` error if it failed to compile.
pub(crate) fn compiled(pattern: &'static Pattern) -> Result<&'static Regex, SanitizationError> {
    LazyLock::force(pattern).as_ref().map_err(|err| {
        SanitizationError::new(
            SanitizationErrorKind::Malformed,
            format!("normalization pattern unavailable: {err}"),
        )
    })
}

pub(crate) fn not_suitable(message: impl Into<String>) -> SanitizationError {
    SanitizationError::new(SanitizationErrorKind::NotSuitable, message)
}

/// Converts a tainted value into a verified one.
///
/// Implementations must normalize the input according to their rules and
/// return `Err` instead of a partially-normalized value when that fails.
/// Errors must not echo the rejected input.
///
/// # Examples
///
/// ```
/// use form_core::{FloatSanitizer, RawValue, Sanitizer, Tainted};
///
/// let verified = FloatSanitizer.sanitize(Tainted::new(RawValue::from("1,5"))).unwrap();
/// assert_eq!(*verified.as_ref(), 1.5);
/// ```
pub trait Sanitizer<I = RawValue> {
    /// The normalized type produced on success.
    type Output;

    /// Sanitizes a tainted value.
    ///
    /// # Errors
    ///
    /// Returns `SanitizationError` if the input cannot be normalized.
    fn sanitize(&self, input: Tainted<I>) -> Result<Verified<Self::Output>, SanitizationError>;
}

/// Sanitizer for free text.
///
/// - Trims leading and trailing whitespace
/// - Rejects control characters (newlines and tabs are allowed when multiline)
/// - Enforces a maximum length in characters
///
/// Empty input is accepted and yields an empty string; requiring a value is
/// the job of the [`Required`](crate::rules::Required) rule.
///
/// # Examples
///
/// ```
/// use form_core::{RawValue, Sanitizer, Tainted, TextSanitizer};
///
/// let sanitizer = TextSanitizer::new(256);
/// let verified = sanitizer.sanitize(Tainted::new(RawValue::from("  hello  "))).unwrap();
/// assert_eq!(verified.as_ref(), "hello");
///
/// assert!(sanitizer.sanitize(Tainted::new(RawValue::from("a\nb"))).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSanitizer {
    max_len: usize,
    multiline: bool,
}

impl TextSanitizer {
    /// Creates a single-line text sanitizer with the given maximum length.
    ///
    /// # Panics
    ///
    /// Panics if `max_len` is 0.
    pub fn new(max_len: usize) -> Self {
        assert!(max_len > 0, "max_len must be greater than 0");
        Self {
            max_len,
            multiline: false,
        }
    }

    /// Single-line sanitizer with a 256 character limit.
    pub fn default_limits() -> Self {
        Self::new(256)
    }

    /// Allows `\n`, `\r` and `\t` inside the text.
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    fn is_forbidden(&self, c: char) -> bool {
        if self.multiline && matches!(c, '\n' | '\r' | '\t') {
            return false;
        }
        c.is_control()
    }
}

impl Sanitizer for TextSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<RawValue>) -> Result<Verified<String>, SanitizationError> {
        let raw = match input.into_inner() {
            RawValue::Null => String::new(),
            RawValue::Bool(value) => (if value { "1" } else { "" }).to_string(),
            RawValue::Int(value) => value.to_string(),
            RawValue::Float(value) => value.to_string(),
            RawValue::Str(value) => value,
        };
        let trimmed = raw.trim();

        if trimmed.chars().any(|c| self.is_forbidden(c)) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ContainsControlChars,
                "input contains control or non-printable characters",
            ));
        }

        if trimmed.chars().count() > self.max_len {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("input exceeds maximum length of {}", self.max_len),
            ));
        }

        Ok(Verified::new_unchecked(trimmed.to_string()))
    }
}

/// Sanitizer for checkbox-style booleans.
///
/// Accepts `1`, `on`, `true`, `yes` and `0`, `off`, `false`, `no`, empty
/// (case-insensitive). Native integers must be 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanSanitizer;

impl Sanitizer for BooleanSanitizer {
    type Output = bool;

    fn sanitize(&self, input: Tainted<RawValue>) -> Result<Verified<bool>, SanitizationError> {
        let value = match input.into_inner() {
            RawValue::Null => false,
            RawValue::Bool(value) => value,
            RawValue::Int(0) => false,
            RawValue::Int(1) => true,
            RawValue::Int(_) | RawValue::Float(_) => {
                return Err(not_suitable("expected a boolean"));
            }
            RawValue::Str(text) => match text.trim().to_ascii_lowercase().as_str() {
                "1" | "on" | "true" | "yes" => true,
                "" | "0" | "off" | "false" | "no" => false,
                _ => return Err(not_suitable("expected a boolean")),
            },
        };
        Ok(Verified::new_unchecked(value))
    }
}

/// Sanitizer for uploaded files: accepts only completed uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSanitizer;

impl Sanitizer<UploadedFile> for UploadSanitizer {
    type Output = UploadedFile;

    fn sanitize(
        &self,
        input: Tainted<UploadedFile>,
    ) -> Result<Verified<UploadedFile>, SanitizationError> {
        let file = input.into_inner();
        match file.status {
            UploadStatus::Ok => Ok(Verified::new_unchecked(file)),
            status => Err(SanitizationError::new(
                SanitizationErrorKind::UploadFailed,
                status.to_string(),
            )),
        }
    }
}
