//! Rules: named predicates attached to a field.
//!
//! A rule looks at a field's sanitized value and either passes or fails
//! with its error message. Apart from [`Required`] and [`ValidToken`], every
//! built-in rule passes on empty values, so optional fields stay optional.

use std::fmt;

use regex::Regex;

use crate::csrf::tokens_match;
use crate::{DomainValidator, FieldValue, IpMode, IpValidator, Secret, Validator};

/// A predicate over a field's sanitized value.
pub trait Rule {
    /// Short identifier, recorded with each error.
    fn name(&self) -> &str;

    /// Returns true if the value passes.
    fn check(&self, value: &FieldValue) -> bool;

    /// Message shown to the user when the rule fails.
    ///
    /// `None` records an unlabeled error; the form then falls back to its
    /// global error message.
    fn message(&self) -> Option<&str>;

    /// When true, a failure of this rule skips the field's remaining rules.
    fn stops_chain(&self) -> bool {
        false
    }
}

impl fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name()).finish()
    }
}

macro_rules! message_builder {
    ($ty:ty) => {
        impl $ty {
            /// Replaces the error message.
            pub fn with_message(mut self, message: impl Into<String>) -> Self {
                self.message = Some(message.into());
                self
            }

            /// Fails without a message.
            pub fn without_message(mut self) -> Self {
                self.message = None;
                self
            }
        }
    };
}

/// The field must have a non-empty value. An unchecked checkbox fails.
#[derive(Debug, Clone)]
pub struct Required {
    message: Option<String>,
}

impl Required {
    /// Creates the rule with the default message.
    pub fn new() -> Self {
        Self {
            message: Some("This field is required.".to_string()),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

message_builder!(Required);

impl Rule for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn check(&self, value: &FieldValue) -> bool {
        !value.is_empty() && *value != FieldValue::Bool(false)
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Text must have at least `min` characters.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: Option<String>,
}

impl MinLength {
    /// Creates the rule.
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: Some(format!("Please enter at least {min} characters.")),
        }
    }
}

message_builder!(MinLength);

impl Rule for MinLength {
    fn name(&self) -> &str {
        "min_length"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty() || text.chars().count() >= self.min,
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Text must have at most `max` characters.
#[derive(Debug, Clone)]
pub struct MaxLength {
    max: usize,
    message: Option<String>,
}

impl MaxLength {
    /// Creates the rule.
    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: Some(format!("Please enter at most {max} characters.")),
        }
    }
}

message_builder!(MaxLength);

impl Rule for MaxLength {
    fn name(&self) -> &str {
        "max_length"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.chars().count() <= self.max,
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Text must match a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: Option<String>,
}

impl Pattern {
    /// Compiles the pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: Some("The value has an invalid format.".to_string()),
        })
    }
}

message_builder!(Pattern);

impl Rule for Pattern {
    fn name(&self) -> &str {
        "pattern"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty() || self.regex.is_match(text),
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// A number must lie within inclusive bounds.
#[derive(Debug, Clone)]
pub struct Range {
    min: Option<f64>,
    max: Option<f64>,
    message: Option<String>,
}

impl Range {
    /// Both bounds inclusive.
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            message: Some(format!("Please enter a number between {min} and {max}.")),
        }
    }

    /// Lower bound only.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            message: Some(format!("Please enter a number of at least {min}.")),
        }
    }

    /// Upper bound only.
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
            message: Some(format!("Please enter a number of at most {max}.")),
        }
    }
}

message_builder!(Range);

impl Rule for Range {
    fn name(&self) -> &str {
        "range"
    }

    fn check(&self, value: &FieldValue) -> bool {
        if value.is_empty() {
            return true;
        }
        let Some(number) = value.as_f64() else {
            return false;
        };
        self.min.map_or(true, |min| number >= min) && self.max.map_or(true, |max| number <= max)
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Text must be a valid domain name (see [`DomainValidator`]).
#[derive(Debug, Clone)]
pub struct ValidDomain {
    validator: DomainValidator,
    message: Option<String>,
}

impl ValidDomain {
    /// Uses the built-in TLD list.
    pub fn new() -> Self {
        Self::with_validator(DomainValidator::new())
    }

    /// Uses a specific validator, e.g. one with a custom TLD list.
    pub fn with_validator(validator: DomainValidator) -> Self {
        Self {
            validator,
            message: Some("Please enter a valid domain name.".to_string()),
        }
    }
}

impl Default for ValidDomain {
    fn default() -> Self {
        Self::new()
    }
}

message_builder!(ValidDomain);

impl Rule for ValidDomain {
    fn name(&self) -> &str {
        "domain"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty() || self.validator.is_valid(text),
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Text must be an IP address literal of the configured family.
#[derive(Debug, Clone)]
pub struct ValidIp {
    validator: IpValidator,
    message: Option<String>,
}

impl ValidIp {
    /// Creates the rule for the given address family.
    pub fn new(mode: IpMode) -> Self {
        let message = match mode {
            IpMode::Any => "Please enter a valid IP address.",
            IpMode::V4 => "Please enter a valid IPv4 address.",
            IpMode::V6 => "Please enter a valid IPv6 address.",
        };
        Self {
            validator: IpValidator::new(mode),
            message: Some(message.to_string()),
        }
    }
}

message_builder!(ValidIp);

impl Rule for ValidIp {
    fn name(&self) -> &str {
        "ip"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty() || self.validator.is_valid(text),
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// An uploaded file must not exceed `max_bytes`.
#[derive(Debug, Clone)]
pub struct MaxFileSize {
    max_bytes: u64,
    message: Option<String>,
}

impl MaxFileSize {
    /// Creates the rule.
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            message: Some(format!("The file must not be larger than {max_bytes} bytes.")),
        }
    }
}

message_builder!(MaxFileSize);

impl Rule for MaxFileSize {
    fn name(&self) -> &str {
        "max_file_size"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::File(file) => file.size <= self.max_bytes,
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// An uploaded file must have one of the listed MIME types.
///
/// Matching is case-insensitive; an entry ending in `/*` matches any
/// subtype (`image/*`).
#[derive(Debug, Clone)]
pub struct AllowedMimeTypes {
    types: Vec<String>,
    message: Option<String>,
}

impl AllowedMimeTypes {
    /// Creates the rule.
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types
                .into_iter()
                .map(|t| t.into().to_ascii_lowercase())
                .collect(),
            message: Some("This file type is not allowed.".to_string()),
        }
    }

    fn allows(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.to_ascii_lowercase();
        self.types.iter().any(|allowed| match allowed.strip_suffix("/*") {
            Some(family) => mime_type
                .split_once('/')
                .is_some_and(|(candidate, _)| candidate == family),
            None => *allowed == mime_type,
        })
    }
}

message_builder!(AllowedMimeTypes);

impl Rule for AllowedMimeTypes {
    fn name(&self) -> &str {
        "mime_type"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Null => true,
            FieldValue::File(file) => self.allows(&file.mime_type),
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// The submitted value must equal the session's CSRF token.
///
/// Fails on empty input and when the session holds no token. A failure stops
/// the rule chain.
#[derive(Debug)]
pub struct ValidToken {
    expected: Option<Secret<String>>,
    message: Option<String>,
}

impl ValidToken {
    /// Creates the rule against the token stored in the session, if any.
    pub fn new(expected: Option<Secret<String>>) -> Self {
        Self {
            expected,
            message: Some("The form has expired. Please submit it again.".to_string()),
        }
    }
}

message_builder!(ValidToken);

impl Rule for ValidToken {
    fn name(&self) -> &str {
        "csrf_token"
    }

    fn check(&self, value: &FieldValue) -> bool {
        match (&self.expected, value) {
            (Some(expected), FieldValue::Text(submitted)) => {
                !submitted.is_empty() && tokens_match(expected.expose_secret(), submitted)
            }
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn stops_chain(&self) -> bool {
        true
    }
}

/// A rule backed by a closure.
///
/// # Examples
///
/// ```
/// use form_core::rules::{FnRule, Rule};
/// use form_core::FieldValue;
///
/// let even = FnRule::new("even", |value| matches!(value, FieldValue::Int(n) if n % 2 == 0))
///     .with_message("Please enter an even number.");
///
/// assert!(even.check(&FieldValue::Int(4)));
/// assert!(!even.check(&FieldValue::Int(3)));
/// ```
pub struct FnRule<F> {
    name: String,
    predicate: F,
    message: Option<String>,
}

impl<F> FnRule<F>
where
    F: Fn(&FieldValue) -> bool,
{
    /// Creates an unlabeled rule from a predicate.
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
            message: None,
        }
    }

    /// Sets the error message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&FieldValue) -> bool,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: &FieldValue) -> bool {
        (self.predicate)(value)
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
