//! Observer hooks fired during a field's validation pass.
//!
//! Every hook has an empty default body, so implementations only override
//! the points they care about. Hooks receive the field's [`FieldState`] and
//! may adjust the value or record additional errors.

use crate::{FieldError, FieldValue, SanitizationError, UploadedFile};

/// Mutable view of a field handed to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    name: String,
    value: FieldValue,
    errors: Vec<FieldError>,
}

impl FieldState {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            value: FieldValue::Null,
            errors: Vec::new(),
        }
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value (sanitized once sanitization has run).
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Replaces the current value.
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Records an error raised by a listener.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(FieldError::listener(message.into()));
    }

    pub(crate) fn push_error(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub(crate) fn take_errors(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }

    pub(crate) fn reset(&mut self) {
        self.value = FieldValue::Null;
        self.errors.clear();
    }
}

/// Hooks around a field's validation pass.
///
/// Order within one pass:
/// 1. `on_empty_value_before_validation` or `on_not_empty_value_before_validation`
/// 2. sanitization and rules
/// 3. `on_validation_error` or `on_validation_success`
/// 4. `on_empty_value_after_validation` or `on_not_empty_value_after_validation`
///
/// # Examples
///
/// ```
/// use form_core::{FieldListener, FieldState, FieldValue};
///
/// /// Falls back to a default country when the field was left blank.
/// struct DefaultCountry;
///
/// impl FieldListener for DefaultCountry {
///     fn on_empty_value_after_validation(&self, field: &mut FieldState) {
///         field.set_value(FieldValue::Text("DE".to_string()));
///     }
/// }
/// ```
pub trait FieldListener {
    /// Nothing was submitted; called before sanitization.
    ///
    /// A value set here replaces the empty submission and is checked by the
    /// field's rules.
    fn on_empty_value_before_validation(&self, _field: &mut FieldState) {}

    /// The sanitized value is empty; called last.
    fn on_empty_value_after_validation(&self, _field: &mut FieldState) {}

    /// A value was submitted; called before sanitization.
    ///
    /// The sanitized submission replaces any value set here. Errors added
    /// here are kept.
    fn on_not_empty_value_before_validation(&self, _field: &mut FieldState) {}

    /// The sanitized value is not empty; called last.
    fn on_not_empty_value_after_validation(&self, _field: &mut FieldState) {}

    /// Sanitization or at least one rule failed.
    fn on_validation_error(&self, _field: &mut FieldState) {}

    /// Sanitization and all rules passed.
    fn on_validation_success(&self, _field: &mut FieldState) {}
}

/// Hooks specific to file fields.
///
/// Called after sanitization, before the rules run.
pub trait FileFieldListener {
    /// The upload completed and was accepted by the sanitizer.
    fn on_upload_accepted(&self, _file: &UploadedFile, _field: &mut FieldState) {}

    /// The upload was submitted but could not be accepted.
    fn on_upload_rejected(&self, _error: &SanitizationError, _field: &mut FieldState) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;
    impl FieldListener for Noop {}
    impl FileFieldListener for Noop {}

    #[test]
    fn default_hooks_leave_state_untouched() {
        let mut state = FieldState::new("email".to_string());
        state.set_value(FieldValue::Text("a@b.c".to_string()));
        let before = state.clone();

        Noop.on_empty_value_before_validation(&mut state);
        Noop.on_empty_value_after_validation(&mut state);
        Noop.on_not_empty_value_before_validation(&mut state);
        Noop.on_not_empty_value_after_validation(&mut state);
        Noop.on_validation_error(&mut state);
        Noop.on_validation_success(&mut state);

        assert_eq!(state, before);
    }

    #[test]
    fn listener_errors_have_messages() {
        let mut state = FieldState::new("avatar".to_string());
        state.add_error("Could not store the file.");

        assert_eq!(state.errors().len(), 1);
        assert_eq!(state.errors()[0].message(), Some("Could not store the file."));
    }

    #[test]
    fn reset_clears_value_and_errors() {
        let mut state = FieldState::new("age".to_string());
        state.set_value(FieldValue::Int(3));
        state.add_error("nope");

        state.reset();

        assert_eq!(state.value(), &FieldValue::Null);
        assert!(state.errors().is_empty());
    }
}
