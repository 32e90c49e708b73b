use std::sync::LazyLock;

use regex::Regex;

use super::{compiled, not_suitable, Pattern, Sanitizer};
use crate::{RawValue, SanitizationError, SanitizationErrorKind, Tainted, Verified};

pub(crate) static SIGNED_DIGITS: Pattern = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$"));
static MANTISSA: Pattern = LazyLock::new(|| Regex::new(r"^-?[0-9]*[.,]?[0-9]*$"));

/// Sanitizer for floating point input.
///
/// Native floats pass through and native integers are converted. Strings are
/// trimmed and accepted in plain (`12`), decimal (`1.5`, `1,5`) and
/// exponent (`1.5E2`) notation. A comma is read as the decimal separator.
///
/// A mantissa made only of zeros yields `0.0`. Any other input that parses
/// to zero is rejected, since that result means the parser gave up rather
/// than the user typing zero.
///
/// # Examples
///
/// ```
/// use form_core::{FloatSanitizer, RawValue, Sanitizer, Tainted};
///
/// let sanitize = |s: &str| FloatSanitizer.sanitize(Tainted::new(RawValue::from(s)));
///
/// assert_eq!(sanitize("1.5E2").unwrap().into_inner(), 150.0);
/// assert_eq!(sanitize("000").unwrap().into_inner(), 0.0);
/// assert!(sanitize("1E2E3").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatSanitizer;

impl Sanitizer for FloatSanitizer {
    type Output = f64;

    fn sanitize(&self, input: Tainted<RawValue>) -> Result<Verified<f64>, SanitizationError> {
        let value = match input.into_inner() {
            RawValue::Float(value) => value,
            RawValue::Int(value) => value as f64,
            RawValue::Str(text) => parse_float(&text)?,
            RawValue::Null | RawValue::Bool(_) => return Err(not_suitable("expected a number")),
        };
        Ok(Verified::new_unchecked(value))
    }
}

/// Parses a numeric string the way [`FloatSanitizer`] does.
pub(crate) fn parse_float(text: &str) -> Result<f64, SanitizationError> {
    let value = text.trim();
    let has_dot = value.contains('.');
    let has_comma = value.contains(',');
    let has_exponent = value.contains(['e', 'E']);

    let looks_like_int = compiled(&SIGNED_DIGITS)?.is_match(value);
    if !looks_like_int && !has_dot && !has_comma && !has_exponent {
        return Err(not_suitable("value is not a number"));
    }

    let parts: Vec<&str> = value.split(['e', 'E']).collect();
    if parts.len() > 2 {
        return Err(not_suitable("value has more than one exponent"));
    }
    let mantissa = parts[0];
    if let Some(exponent) = parts.get(1) {
        if !compiled(&SIGNED_DIGITS)?.is_match(exponent) {
            return Err(not_suitable("exponent is not a whole number"));
        }
    }
    if !compiled(&MANTISSA)?.is_match(mantissa) {
        return Err(not_suitable("value is not a number"));
    }

    let mut digits = mantissa.chars().filter(char::is_ascii_digit).peekable();
    if digits.peek().is_some() && digits.all(|c| c == '0') {
        return Ok(0.0);
    }

    let parsed: f64 = value
        .replace(',', ".")
        .parse()
        .map_err(|_| not_suitable("value could not be parsed as a number"))?;

    if parsed == 0.0 {
        return Err(not_suitable("value could not be parsed as a number"));
    }
    if !parsed.is_finite() {
        return Err(SanitizationError::new(
            SanitizationErrorKind::OutOfRange,
            "value exceeds the floating point range",
        ));
    }
    Ok(parsed)
}
