use std::sync::LazyLock;

use regex::Regex;

use super::{compiled, not_suitable, Pattern, Sanitizer};
use crate::{RawValue, SanitizationError, Tainted, Verified};

static ZERO_WIDTH_SPACE: Pattern =
    LazyLock::new(|| Regex::new(r"\x{200B}|&#8203;|&#x200b;|&zerowidthspace;"));
static LEADING_SCHEME: Pattern = LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.\-]*://"));
static STRAY_CHARACTERS: Pattern = LazyLock::new(|| Regex::new(r"[? ]"));
static TRAILING_SLASH: Pattern = LazyLock::new(|| Regex::new(r"/$"));

/// Sanitizer that reduces user-typed addresses to a bare domain name.
///
/// Steps, in order:
/// 1. lowercase and trim
/// 2. remove zero-width spaces, literal or entity-encoded
/// 3. remove a leading `scheme://`
/// 4. remove a leading `www.` unless the rest has no dot
/// 5. remove `?`, spaces and a trailing `/`
///
/// The result is not guaranteed to be a valid domain; check it with
/// [`DomainValidator`](crate::DomainValidator).
///
/// # Examples
///
/// ```
/// use form_core::{DomainSanitizer, RawValue, Sanitizer, Tainted};
///
/// let sanitize = |s: &str| DomainSanitizer.sanitize(Tainted::new(RawValue::from(s))).unwrap().into_inner();
///
/// assert_eq!(sanitize("https://WWW.Example.com/"), "example.com");
/// assert_eq!(sanitize("www.intranet"), "www.intranet");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainSanitizer;

impl Sanitizer for DomainSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<RawValue>) -> Result<Verified<String>, SanitizationError> {
        match input.into_inner() {
            RawValue::Str(text) => normalize_domain(&text).map(Verified::new_unchecked),
            _ => Err(not_suitable("expected a domain name")),
        }
    }
}

fn normalize_domain(text: &str) -> Result<String, SanitizationError> {
    let lowered = text.to_lowercase();
    let value = lowered.trim();
    let value = compiled(&ZERO_WIDTH_SPACE)?.replace_all(value, "");
    let value = compiled(&LEADING_SCHEME)?.replace(&value, "");

    let value = match value.strip_prefix("www.") {
        Some(rest) if rest.contains('.') => rest,
        _ => &value[..],
    };

    let value = compiled(&STRAY_CHARACTERS)?.replace_all(value, "");
    let value = compiled(&TRAILING_SLASH)?.replace(&value, "");
    Ok(value.into_owned())
}
