use serde::Deserialize;

/// HTTP method a form is submitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    /// Values are read from the query string.
    Get,
    /// Values are read from the request body.
    #[default]
    Post,
}

/// Per-form settings.
///
/// Deserializable so hosts can keep form defaults in their own config
/// files; missing keys fall back to [`FormConfig::default`].
///
/// # Examples
///
/// ```
/// use form_core::{FormConfig, FormMethod};
///
/// let config = FormConfig::default()
///     .method(FormMethod::Get)
///     .csrf_protection(false)
///     .global_error_message("Please check your input.");
///
/// assert_eq!(config.method, FormMethod::Get);
/// assert!(!config.csrf_protection);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Submission method.
    pub method: FormMethod,
    /// Adds the hidden token field and checks it on validation.
    pub csrf_protection: bool,
    /// Added when validation fails without any message being recorded.
    pub global_error_message: String,
    /// Replaces the token rule's message when set.
    pub csrf_error_message: Option<String>,
    /// Renderers mark required fields when enabled.
    pub render_required_marker: bool,
    /// Query key that marks a submission; the form name when unset.
    pub submit_indicator: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            method: FormMethod::Post,
            csrf_protection: true,
            global_error_message: "The form contains errors.".to_string(),
            csrf_error_message: None,
            render_required_marker: false,
            submit_indicator: None,
        }
    }
}

impl FormConfig {
    /// Sets the submission method.
    pub fn method(mut self, method: FormMethod) -> Self {
        self.method = method;
        self
    }

    /// Enables or disables CSRF protection.
    pub fn csrf_protection(mut self, enabled: bool) -> Self {
        self.csrf_protection = enabled;
        self
    }

    /// Sets the fallback global error message.
    pub fn global_error_message(mut self, message: impl Into<String>) -> Self {
        self.global_error_message = message.into();
        self
    }

    /// Sets the message shown when the CSRF token does not match.
    pub fn csrf_error_message(mut self, message: impl Into<String>) -> Self {
        self.csrf_error_message = Some(message.into());
        self
    }

    /// Enables required markers for every field added to the form.
    pub fn render_required_marker(mut self, enabled: bool) -> Self {
        self.render_required_marker = enabled;
        self
    }

    /// Overrides the query key that marks a submission.
    pub fn submit_indicator(mut self, key: impl Into<String>) -> Self {
        self.submit_indicator = Some(key.into());
        self
    }
}
