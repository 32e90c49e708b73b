//! Per-session Content-Security-Policy nonces.
//!
//! This module only produces values; sending the header is up to the host.

use crate::csrf::random_hex;
use crate::session::{SessionStore, CSP_NONCE_KEY};
use crate::Secret;

const NONCE_BYTES: usize = 16;

/// Returns the session's CSP nonce, creating it on first use.
pub fn ensure_nonce(session: &mut dyn SessionStore) -> Secret<String> {
    if let Some(nonce) = session.get(CSP_NONCE_KEY) {
        return Secret::new(nonce);
    }
    let nonce = random_hex(NONCE_BYTES);
    session.set(CSP_NONCE_KEY, nonce.clone());
    tracing::debug!("created session CSP nonce");
    Secret::new(nonce)
}

/// Builds the `script-src` directive allowing scripts tagged with `nonce`.
///
/// # Examples
///
/// ```
/// use form_core::{csp, Secret};
///
/// let directive = csp::script_src_directive(&Secret::new("abc123".to_string()));
/// assert_eq!(directive, "script-src 'nonce-abc123' 'strict-dynamic'");
/// ```
pub fn script_src_directive(nonce: &Secret<String>) -> String {
    format!("script-src 'nonce-{}' 'strict-dynamic'", nonce.expose_secret())
}

/// Builds a complete header value: the script directive plus
/// `object-src 'none'` and `base-uri 'self'`.
pub fn header_value(nonce: &Secret<String>) -> String {
    format!(
        "{}; object-src 'none'; base-uri 'self'",
        script_src_directive(nonce)
    )
}
