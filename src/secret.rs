use std::fmt;

/// A wrapper that keeps session secrets out of logs.
///
/// CSRF tokens and CSP nonces are handed around as `Secret<String>`. `Debug`
/// and `Display` always print `[REDACTED]`; the value is reachable only
/// through [`expose_secret`](Self::expose_secret).
///
/// # Examples
///
/// ```
/// use form_core::Secret;
///
/// let token = Secret::new("3f9a...".to_string());
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "3f9a...");
/// ```
// No Clone, Copy or Default: each would make it easy to spread the value.
pub struct Secret<T> {
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// Do not log or display the result.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}
