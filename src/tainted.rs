use std::fmt;

/// A submitted value that has not been sanitized yet.
///
/// Everything read from a request is wrapped in `Tainted<T>` by
/// [`RequestContext`](crate::RequestContext). The inner value is only
/// reachable from inside this crate, so the sole way to use it is to run it
/// through a [`Sanitizer`](crate::Sanitizer) or a form field.
///
/// # Examples
///
/// ```
/// use form_core::{Tainted, RawValue};
///
/// let raw = Tainted::new(RawValue::from("<script>"));
/// println!("{:?}", raw); // Tainted { inner: Str("<script>") }
///
/// // No Deref, no AsRef: the value cannot be used directly.
/// ```
// Clone is required: the same input mapping feeds both the first pass and the CSRF revalidation.
#[derive(Clone, PartialEq)]
pub struct Tainted<T> {
    // Must stay private; a public field would let raw input skip sanitization.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Borrows the raw value for crate-internal inspection.
    ///
    /// Used to decide emptiness before sanitization; never hand the result
    /// to callers.
    pub(crate) fn peek(&self) -> &T {
        &self.inner
    }

    /// Extracts the raw value for sanitization.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }

    /// Maps the raw value without releasing it from taint.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Tainted<U> {
        Tainted::new(f(self.inner))
    }
}

// No Deref, AsRef, Borrow or Into<T>: any of them would let raw input reach callers unsanitized.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawValue;

    #[test]
    fn tainted_debug_marks_value() {
        let input = Tainted::new("' OR 1=1".to_string());
        let debug_output = format!("{:?}", input);

        assert!(debug_output.contains("Tainted"));
        assert!(debug_output.contains("' OR 1=1"));
    }

    #[test]
    fn map_keeps_taint() {
        let tainted = Tainted::new("42".to_string()).map(RawValue::Str);

        assert_eq!(tainted.peek(), &RawValue::Str("42".to_string()));
    }

    mod proptests {
        use super::*;
        use crate::{test_utils::arb_digit_string, IntegerSanitizer, Sanitizer};
        use proptest::prelude::*;

        proptest! {
            /// Cloned tainted input sanitizes to the same value as the original.
            #[test]
            fn proptest_tainted_clone_preserves_value(input in arb_digit_string(18)) {
                let sanitizer = IntegerSanitizer;

                let tainted1 = Tainted::new(RawValue::Str(input.clone()));
                let tainted2 = tainted1.clone();

                let verified1 = sanitizer.sanitize(tainted1).expect("digits fit in i64");
                let verified2 = sanitizer.sanitize(tainted2).expect("digits fit in i64");

                prop_assert_eq!(verified1.as_ref(), verified2.as_ref());
            }
        }
    }
}
