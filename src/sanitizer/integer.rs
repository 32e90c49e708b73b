use super::float::{parse_float, SIGNED_DIGITS};
use super::{compiled, not_suitable, Sanitizer};
use crate::{RawValue, SanitizationError, SanitizationErrorKind, Tainted, Verified};

const MAX_MAGNITUDE: &str = "9223372036854775807";
const MIN_MAGNITUDE: &str = "9223372036854775808";

/// Sanitizer for whole-number input.
///
/// Signed digit strings are range-checked against the 64-bit bounds by
/// comparing digits, so oversized input never goes through a lossy parse.
/// Decimal-looking strings (`3.0`, `3,0`, `3e2`) go through
/// [`FloatSanitizer`](crate::FloatSanitizer) rules first and are accepted
/// only without a fractional part.
///
/// # Examples
///
/// ```
/// use form_core::{IntegerSanitizer, RawValue, Sanitizer, SanitizationErrorKind, Tainted};
///
/// let sanitize = |s: &str| IntegerSanitizer.sanitize(Tainted::new(RawValue::from(s)));
///
/// assert_eq!(sanitize("  -7 ").unwrap().into_inner(), -7);
/// assert_eq!(sanitize("3.0").unwrap().into_inner(), 3);
/// assert_eq!(sanitize("3.5").unwrap_err().kind(), SanitizationErrorKind::NotAWholeNumber);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerSanitizer;

impl Sanitizer for IntegerSanitizer {
    type Output = i64;

    fn sanitize(&self, input: Tainted<RawValue>) -> Result<Verified<i64>, SanitizationError> {
        let value = match input.into_inner() {
            RawValue::Int(value) => value,
            RawValue::Float(value) => whole_number(value)?,
            RawValue::Str(text) => parse_integer(&text)?,
            RawValue::Null | RawValue::Bool(_) => {
                return Err(not_suitable("expected a whole number"));
            }
        };
        Ok(Verified::new_unchecked(value))
    }
}

fn parse_integer(text: &str) -> Result<i64, SanitizationError> {
    let value = text.trim();

    if compiled(&SIGNED_DIGITS)?.is_match(value) {
        check_digit_range(value)?;
        return value
            .parse()
            .map_err(|_| not_suitable("value could not be parsed as a whole number"));
    }

    if value.contains(['.', ',', 'e', 'E']) {
        return whole_number(parse_float(value)?);
    }

    Err(not_suitable("value is not a whole number"))
}

/// Compares the magnitude of a signed digit string with the i64 bounds.
fn check_digit_range(digits: &str) -> Result<(), SanitizationError> {
    let (bound, magnitude) = match digits.strip_prefix('-') {
        Some(rest) => (MIN_MAGNITUDE, rest),
        None => (MAX_MAGNITUDE, digits.strip_prefix('+').unwrap_or(digits)),
    };
    let magnitude = magnitude.trim_start_matches('0');

    let exceeds = magnitude.len() > bound.len()
        || (magnitude.len() == bound.len() && magnitude > bound);
    if exceeds {
        return Err(out_of_range());
    }
    Ok(())
}

fn whole_number(value: f64) -> Result<i64, SanitizationError> {
    // 2^63 is exactly representable; i64::MAX is not and rounds up to it.
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    if value % 1.0 != 0.0 {
        return Err(SanitizationError::new(
            SanitizationErrorKind::NotAWholeNumber,
            "value has a fractional part",
        ));
    }
    Ok(value as i64)
}

fn out_of_range() -> SanitizationError {
    SanitizationError::new(
        SanitizationErrorKind::OutOfRange,
        "value exceeds the 64-bit integer range",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(value: &str) -> Result<i64, SanitizationError> {
        IntegerSanitizer
            .sanitize(Tainted::new(RawValue::from(value)))
            .map(Verified::into_inner)
    }

    #[test]
    fn plain_digits() {
        assert_eq!(sanitize("42").unwrap(), 42);
        assert_eq!(sanitize("+42").unwrap(), 42);
        assert_eq!(sanitize("007").unwrap(), 7);
    }

    #[test]
    fn whitespace_and_sign() {
        assert_eq!(sanitize("  -7 ").unwrap(), -7);
    }

    #[test]
    fn decimal_with_zero_fraction() {
        assert_eq!(sanitize("3.0").unwrap(), 3);
        assert_eq!(sanitize("3,00").unwrap(), 3);
        assert_eq!(sanitize("1.5e2").unwrap(), 150);
    }

    #[test]
    fn decimal_with_fraction_is_rejected() {
        let error = sanitize("3.5").unwrap_err();
        assert_eq!(error.kind(), SanitizationErrorKind::NotAWholeNumber);
    }

    #[test]
    fn range_boundaries() {
        assert_eq!(sanitize("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(sanitize("-9223372036854775808").unwrap(), i64::MIN);
        assert_eq!(sanitize("-00009223372036854775808").unwrap(), i64::MIN);
    }

    #[test]
    fn beyond_range_is_out_of_range() {
        for input in [
            "9223372036854775808",
            "-9223372036854775809",
            "123456789012345678901234567890",
            "1e19",
        ] {
            let error = sanitize(input).unwrap_err();
            assert_eq!(error.kind(), SanitizationErrorKind::OutOfRange, "{input}");
        }
    }

    #[test]
    fn non_numeric_is_not_suitable() {
        for input in ["abc", "", "12abc", "1 2"] {
            let error = sanitize(input).unwrap_err();
            assert_eq!(error.kind(), SanitizationErrorKind::NotSuitable, "{input}");
        }
    }

    #[test]
    fn native_values() {
        let sanitize_raw = |raw: RawValue| IntegerSanitizer.sanitize(Tainted::new(raw)).map(Verified::into_inner);

        assert_eq!(sanitize_raw(RawValue::Int(-3)).unwrap(), -3);
        assert_eq!(sanitize_raw(RawValue::Float(8.0)).unwrap(), 8);
        assert_eq!(
            sanitize_raw(RawValue::Float(8.25)).unwrap_err().kind(),
            SanitizationErrorKind::NotAWholeNumber
        );
        assert!(sanitize_raw(RawValue::Null).is_err());
    }
}
