//! Property tests for sanitizers and the form pipeline.
//!
//! These check invariants that must hold for any submitted input, not
//! just the handful of values covered by the unit tests.

use form_core::rules::Required;
use form_core::{
    DomainSanitizer, FieldValue, FloatSanitizer, Form, FormConfig, FormField, FormRegistry,
    IntegerSanitizer, MemorySession, RawValue, RequestContext, Sanitizer, Tainted,
};
use proptest::prelude::*;

fn sanitize_int(input: &str) -> Option<i64> {
    IntegerSanitizer
        .sanitize(Tainted::new(RawValue::from(input)))
        .ok()
        .map(|verified| verified.into_inner())
}

fn sanitize_float(input: &str) -> Option<f64> {
    FloatSanitizer
        .sanitize(Tainted::new(RawValue::from(input)))
        .ok()
        .map(|verified| verified.into_inner())
}

// Strategy: hostnames with one to three labels below a known TLD, none
// starting with "w" so a leading "www." only comes from the prefix
fn arb_domain() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-v][a-z0-9]{1,8}", 1..=3),
        prop_oneof![Just("com"), Just("org"), Just("de"), Just("io")],
    )
        .prop_map(|(labels, tld)| format!("{}.{tld}", labels.join(".")))
}

proptest! {
    /// Property: every i64 survives a round trip through its decimal text.
    #[test]
    fn proptest_integer_accepts_every_i64(n in any::<i64>()) {
        prop_assert_eq!(sanitize_int(&n.to_string()), Some(n));
    }

    /// Property: whole floats written with a trailing ".0" are integers.
    #[test]
    fn proptest_integer_accepts_whole_decimals(n in -1_000_000i64..1_000_000) {
        prop_assert_eq!(sanitize_int(&format!("{n}.0")), Some(n));
    }

    /// Property: a non-zero fractional part is never accepted as an integer.
    #[test]
    fn proptest_integer_rejects_fractions(n in -1_000_000i64..1_000_000, frac in 1u32..1000) {
        let input = format!("{n}.{frac:03}");
        prop_assert_eq!(sanitize_int(&input), None);
    }

    /// Property: comma and dot decimal separators mean the same value.
    #[test]
    fn proptest_float_comma_equals_dot(whole in 1u32..100_000, frac in 0u32..1000) {
        let dot = sanitize_float(&format!("{whole}.{frac}"));
        let comma = sanitize_float(&format!("{whole},{frac}"));

        prop_assert!(dot.is_some());
        prop_assert_eq!(dot, comma);
    }

    /// Property: letters outside an exponent are always rejected.
    #[test]
    fn proptest_float_rejects_words(word in "[a-df-z]{1,10}") {
        prop_assert_eq!(sanitize_float(&word), None);
    }

    /// Property: domain normalization is idempotent.
    #[test]
    fn proptest_domain_sanitizer_idempotent(
        domain in arb_domain(),
        prefix in prop_oneof![Just(""), Just("http://"), Just("https://www."), Just("WWW.")],
        suffix in prop_oneof![Just(""), Just("/"), Just("?")],
    ) {
        let once = DomainSanitizer
            .sanitize(Tainted::new(RawValue::from(format!("{prefix}{domain}{suffix}"))))
            .unwrap()
            .into_inner();
        let twice = DomainSanitizer
            .sanitize(Tainted::new(RawValue::from(once.clone())))
            .unwrap()
            .into_inner();

        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.starts_with("www."));
    }

    /// Property: validation never panics and its outcome matches the
    /// error accessors, whatever text is submitted.
    #[test]
    fn proptest_validate_outcome_matches_errors(
        name in ".{0,40}",
        age in ".{0,12}",
    ) {
        let mut registry = FormRegistry::new();
        let mut form = Form::with_config(
            &mut registry,
            "profile",
            FormConfig::default().csrf_protection(false),
        )
        .unwrap();
        form.add_field(FormField::text("name").rule(Required::new())).unwrap();
        form.add_field(FormField::integer("age")).unwrap();

        let mut request = RequestContext::new("req-prop");
        request.add_query_param("profile", "");
        request.add_body_param("name", name);
        request.add_body_param("age", age);

        let valid = form.validate(&request, &MemorySession::new());

        prop_assert_eq!(valid, !form.has_errors());
        prop_assert_eq!(valid, form.error_messages().is_empty());
        if valid {
            prop_assert!(matches!(form.field("name").unwrap().value(), FieldValue::Text(_)));
        }
    }
}
