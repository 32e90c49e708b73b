//! Per-session CSRF tokens.

use rand::RngCore;

use crate::session::{SessionStore, CSRF_TOKEN_KEY};
use crate::Secret;

/// Name of the hidden field that carries the token.
pub const CSRF_FIELD_NAME: &str = "_csrf_token";

const TOKEN_BYTES: usize = 32;

/// Returns the session's CSRF token, creating it on first use.
///
/// The token stays the same for the lifetime of the session.
///
/// # Examples
///
/// ```
/// use form_core::{csrf, MemorySession};
///
/// let mut session = MemorySession::new();
/// let first = csrf::ensure_token(&mut session);
/// let second = csrf::ensure_token(&mut session);
///
/// assert_eq!(first.expose_secret(), second.expose_secret());
/// assert_eq!(first.expose_secret().len(), 64);
/// ```
pub fn ensure_token(session: &mut dyn SessionStore) -> Secret<String> {
    if let Some(token) = session.get(CSRF_TOKEN_KEY) {
        return Secret::new(token);
    }
    let token = random_hex(TOKEN_BYTES);
    session.set(CSRF_TOKEN_KEY, token.clone());
    tracing::debug!("created session CSRF token");
    Secret::new(token)
}

/// Returns the session's CSRF token without creating one.
pub fn session_token(session: &dyn SessionStore) -> Option<Secret<String>> {
    session.get(CSRF_TOKEN_KEY).map(Secret::new)
}

pub(crate) fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compares two tokens in time independent of where they differ.
pub(crate) fn tokens_match(expected: &str, submitted: &str) -> bool {
    let (expected, submitted) = (expected.as_bytes(), submitted.as_bytes());
    if expected.len() != submitted.len() {
        return false;
    }
    expected
        .iter()
        .zip(submitted)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySession;

    #[test]
    fn token_is_created_once_per_session() {
        let mut session = MemorySession::new();

        let first = ensure_token(&mut session);
        let second = ensure_token(&mut session);

        assert_eq!(first.expose_secret(), second.expose_secret());
        assert_eq!(
            session_token(&session).unwrap().expose_secret(),
            first.expose_secret()
        );
    }

    #[test]
    fn sessions_get_different_tokens() {
        let a = ensure_token(&mut MemorySession::new());
        let b = ensure_token(&mut MemorySession::new());

        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn token_is_lowercase_hex() {
        let token = ensure_token(&mut MemorySession::new());

        assert_eq!(token.expose_secret().len(), TOKEN_BYTES * 2);
        assert!(token
            .expose_secret()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn session_token_does_not_create() {
        let session = MemorySession::new();
        assert!(session_token(&session).is_none());
    }

    #[test]
    fn tokens_match_requires_exact_equality() {
        assert!(tokens_match("abcd", "abcd"));
        assert!(!tokens_match("abcd", "abce"));
        assert!(!tokens_match("abcd", "abc"));
        assert!(!tokens_match("abcd", ""));
    }
}
