use std::collections::HashMap;

/// Session key holding the CSRF token.
pub const CSRF_TOKEN_KEY: &str = "form_core.csrf_token";

/// Session key holding the CSP nonce.
pub const CSP_NONCE_KEY: &str = "form_core.csp_nonce";

/// Per-session string storage provided by the host.
///
/// The crate stores exactly two values here: the CSRF token and the CSP
/// nonce. Persistence, expiry and locking are the host's concern.
pub trait SessionStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
}

/// In-memory session store, for tests and single-process tools.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}
