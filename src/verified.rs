/// A value that came out of a sanitizer.
///
/// `Verified<T>` has no public constructor: the only way to obtain one is
/// through a [`Sanitizer`](crate::Sanitizer) implementation in this crate.
/// Holding one proves the value went through normalization.
///
/// # Examples
///
/// External callers cannot create `Verified<T>` directly:
///
/// ```compile_fail
/// use form_core::Verified;
///
/// let verified = Verified::new(42_i64);
/// ```
///
/// ```
/// use form_core::{IntegerSanitizer, RawValue, Sanitizer, Tainted};
///
/// let verified = IntegerSanitizer
///     .sanitize(Tainted::new(RawValue::from(" 42 ")))
///     .unwrap();
/// assert_eq!(*verified.as_ref(), 42);
/// assert_eq!(verified.into_inner(), 42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Wraps a value that crate code has already sanitized.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the wrapper and returns the sanitized value.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Maps the sanitized value, keeping the verified marker.
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Verified<U> {
        Verified::new_unchecked(f(self.inner))
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
