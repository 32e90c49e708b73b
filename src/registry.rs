use std::collections::HashSet;

use crate::ConfigurationError;

/// Tracks form names so no two forms share one.
///
/// The host decides the scope; usually one registry per request.
#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    names: HashSet<String>,
}

impl FormRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name`, failing if it was already claimed.
    pub fn register(&mut self, name: &str) -> Result<(), ConfigurationError> {
        if !self.names.insert(name.to_string()) {
            return Err(ConfigurationError::DuplicateForm {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// True if `name` is claimed.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Releases `name` so it can be claimed again. Returns false if it
    /// was not claimed.
    pub fn release(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Number of claimed names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no name is claimed.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
