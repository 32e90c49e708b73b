use crate::collection::{Component, FieldCollection};
use crate::csrf::{self, CSRF_FIELD_NAME};
use crate::field::{FieldError, FormField};
use crate::logging::ValidationLog;
use crate::request::{InputData, RequestContext};
use crate::rules::{Rule, ValidToken};
use crate::session::SessionStore;
use crate::{ConfigurationError, FormConfig, FormMethod, FormRegistry, NotFoundError, Secret};

/// A named, validatable form.
///
/// A form is built once per request, checked with [`Form::validate`] and
/// then read for values and errors. The validation outcome is cached: later
/// calls return it unchanged and the error accessors stay fixed.
///
/// # Examples
///
/// ```
/// use form_core::rules::Required;
/// use form_core::{Form, FormConfig, FormField, FormRegistry, MemorySession, RequestContext};
///
/// let mut registry = FormRegistry::new();
/// let mut form = Form::with_config(
///     &mut registry,
///     "newsletter",
///     FormConfig::default().csrf_protection(false),
/// )
/// .unwrap();
/// form.add_field(FormField::text("email").rule(Required::new()))
///     .unwrap();
///
/// let mut request = RequestContext::new("req-1");
/// request.add_query_param("newsletter", "");
/// request.add_body_param("email", "reader@example.com");
///
/// assert!(form.validate(&request, &MemorySession::new()));
/// assert_eq!(form.field("email").unwrap().value().as_text(), Some("reader@example.com"));
/// ```
#[derive(Debug)]
pub struct Form {
    root: FieldCollection,
    config: FormConfig,
    csrf_enabled: bool,
    global_errors: Vec<String>,
    outcome: Option<bool>,
}

impl Form {
    /// Creates a form with the default configuration.
    pub fn new(registry: &mut FormRegistry, name: &str) -> Result<Self, ConfigurationError> {
        Self::with_config(registry, name, FormConfig::default())
    }

    /// Creates a form, claiming `name` in `registry`.
    ///
    /// With CSRF protection enabled the hidden token field is added first.
    pub fn with_config(
        registry: &mut FormRegistry,
        name: &str,
        config: FormConfig,
    ) -> Result<Self, ConfigurationError> {
        registry.register(name)?;

        let mut root = FieldCollection::new(name);
        root.set_render_required_marker(config.render_required_marker);
        if config.csrf_protection {
            root.add_field(FormField::hidden(CSRF_FIELD_NAME))?;
        }

        Ok(Self {
            root,
            csrf_enabled: config.csrf_protection,
            config,
            global_errors: Vec::new(),
            outcome: None,
        })
    }

    /// The form name.
    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// The configuration the form was built with.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// The submission method.
    pub fn method(&self) -> FormMethod {
        self.config.method
    }

    /// Query key whose presence marks a submission.
    pub fn submit_indicator(&self) -> &str {
        self.config
            .submit_indicator
            .as_deref()
            .unwrap_or_else(|| self.root.name())
    }

    /// True while the token field is present and checked.
    pub fn has_csrf_protection(&self) -> bool {
        self.csrf_enabled
    }

    /// Appends a field.
    pub fn add_field(&mut self, field: FormField) -> Result<(), ConfigurationError> {
        self.root.add_field(field)
    }

    /// Appends a field or collection.
    pub fn add_component(&mut self, component: impl Into<Component>) -> Result<(), ConfigurationError> {
        self.root.add_component(component)
    }

    /// Appends components in order, stopping at the first failure.
    pub fn add_assemblage<I>(&mut self, components: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        self.root.add_assemblage(components)
    }

    /// True if a direct field child with this name exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.root.has_field(name)
    }

    /// Returns the direct field child named `name`.
    pub fn field(&self, name: &str) -> Result<&FormField, NotFoundError> {
        self.root.field(name)
    }

    /// Returns the direct field child named `name`, mutably.
    pub fn field_mut(&mut self, name: &str) -> Result<&mut FormField, NotFoundError> {
        self.root.field_mut(name)
    }

    /// Returns the direct collection child named `name`.
    pub fn collection(&self, name: &str) -> Option<&FieldCollection> {
        self.root.collection(name)
    }

    /// Removes the direct field child named `name`.
    ///
    /// Removing the token field turns CSRF protection off.
    pub fn remove_field(&mut self, name: &str) -> Result<FormField, NotFoundError> {
        let field = self.root.remove_field(name)?;
        if name == CSRF_FIELD_NAME {
            self.csrf_enabled = false;
        }
        Ok(field)
    }

    /// Removes the token field and stops checking the token.
    pub fn remove_csrf_protection(&mut self) {
        if self.csrf_enabled {
            self.root.remove_field(CSRF_FIELD_NAME).ok();
            self.csrf_enabled = false;
        }
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[Component] {
        self.root.children()
    }

    /// Direct field children in insertion order.
    pub fn all_fields(&self) -> impl Iterator<Item = &FormField> {
        self.root.fields()
    }

    /// Returns the session token a renderer embeds in the token field,
    /// creating it if needed. `None` without CSRF protection.
    pub fn csrf_token(&self, session: &mut dyn SessionStore) -> Option<Secret<String>> {
        self.csrf_enabled.then(|| csrf::ensure_token(session))
    }

    /// True if the submission indicator is in the query string, whatever
    /// the form method.
    pub fn is_sent(&self, request: &RequestContext) -> bool {
        request.has_query_param(self.submit_indicator())
    }

    /// Validates the submitted request. Returns true if no error was
    /// recorded.
    ///
    /// Returns false without touching any field when the form was not
    /// sent. Only direct field children are validated; nested collections
    /// are left alone. The token is checked only after every field passed.
    pub fn validate(&mut self, request: &RequestContext, session: &dyn SessionStore) -> bool {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        let name = self.root.name().to_string();
        let log = ValidationLog::new(request.request_id(), &name);

        if !self.is_sent(request) {
            log.debug(format_args!("form not sent"));
            return false;
        }

        let input = request.input_for(self.config.method);
        log.debug(format_args!("validating {} submitted values", input.len()));

        let csrf_enabled = self.csrf_enabled;
        let is_token = |field: &FormField| csrf_enabled && field.name() == CSRF_FIELD_NAME;

        for field in self.root.fields_mut().filter(|field| !is_token(field)) {
            field.validate(&input);
        }

        let fields_failed = self
            .root
            .fields()
            .any(|field| !is_token(field) && field.has_errors());
        if !fields_failed && self.csrf_enabled {
            self.validate_csrf(&input, session, &log);
        }

        if self.has_errors() && !self.has_error_message() {
            self.global_errors.push(self.config.global_error_message.clone());
        }

        let valid = !self.has_errors();
        log.info(format_args!("validation finished, valid = {valid}"));
        self.outcome = Some(valid);
        valid
    }

    fn validate_csrf(&mut self, input: &InputData, session: &dyn SessionStore, log: &ValidationLog<'_>) {
        let mut rule = ValidToken::new(csrf::session_token(session));
        if let Some(message) = &self.config.csrf_error_message {
            rule = rule.with_message(message.clone());
        }
        let message = rule.message().map(str::to_string);

        let Ok(field) = self.root.field_mut(CSRF_FIELD_NAME) else {
            return;
        };
        field.add_rule(rule);
        field.validate(input);

        // a token the sanitizer rejects is a mismatch like any other
        if field.take_errors().is_empty() {
            return;
        }
        log.warn(format_args!("CSRF token mismatch"));
        self.global_errors.extend(message);
    }

    fn has_error_message(&self) -> bool {
        !self.global_errors.is_empty()
            || self
                .root
                .fields()
                .flat_map(FormField::errors)
                .any(|error| error.message().is_some())
    }

    /// The cached outcome of [`Form::validate`], if the form was validated.
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    /// Errors not tied to a field: CSRF failures and the fallback message.
    pub fn global_errors(&self) -> &[String] {
        &self.global_errors
    }

    /// Errors of the direct field children, paired with the field name.
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.root
            .fields()
            .flat_map(|field| field.errors().iter().map(move |error| (field.name(), error)))
    }

    /// Every error message: global ones first, then field messages in
    /// field order. Errors without a message are skipped.
    pub fn error_messages(&self) -> Vec<String> {
        self.global_errors
            .iter()
            .cloned()
            .chain(
                self.field_errors()
                    .filter_map(|(_, error)| error.message().map(str::to_string)),
            )
            .collect()
    }

    /// True if any global or field error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.global_errors.is_empty() || self.root.fields().any(FormField::has_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MinLength, Required};
    use crate::MemorySession;

    fn form(registry: &mut FormRegistry, config: FormConfig) -> Form {
        let mut form = Form::with_config(registry, "contact", config).unwrap();
        form.add_field(
            FormField::text("name")
                .rule(Required::new())
                .rule(MinLength::new(2)),
        )
        .unwrap();
        form
    }

    fn sent_request() -> RequestContext {
        let mut request = RequestContext::new("req-1");
        request.add_query_param("contact", "");
        request
    }

    #[test]
    fn token_field_comes_first() {
        let mut registry = FormRegistry::new();
        let form = form(&mut registry, FormConfig::default());

        let names: Vec<_> = form.all_fields().map(FormField::name).collect();
        assert_eq!(names, [CSRF_FIELD_NAME, "name"]);
        assert!(form.has_csrf_protection());
    }

    #[test]
    fn not_sent_returns_false_without_touching_fields() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default());
        let mut request = RequestContext::new("req-1");
        request.add_body_param("name", "Alice");

        assert!(!form.validate(&request, &MemorySession::new()));
        assert!(form.all_fields().all(|field| !field.is_validated()));
        assert!(form.outcome().is_none());
        assert!(!form.has_errors());
    }

    #[test]
    fn custom_submit_indicator() {
        let mut registry = FormRegistry::new();
        let form = form(&mut registry, FormConfig::default().submit_indicator("send"));

        let mut request = RequestContext::new("req-1");
        request.add_query_param("contact", "");
        assert!(!form.is_sent(&request));

        request.add_query_param("send", "1");
        assert!(form.is_sent(&request));
    }

    #[test]
    fn valid_submission_with_token() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default());
        let mut session = MemorySession::new();
        let token = form.csrf_token(&mut session).unwrap();

        let mut request = sent_request();
        request.add_body_param("name", "Alice");
        request.add_body_param(CSRF_FIELD_NAME, token.expose_secret().clone());

        assert!(form.validate(&request, &session));
        assert!(form.error_messages().is_empty());
    }

    #[test]
    fn outcome_is_cached() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default().csrf_protection(false));
        let mut request = sent_request();
        request.add_body_param("name", "A");

        assert!(!form.validate(&request, &MemorySession::new()));
        let first = form.error_messages();

        request.add_body_param("name", "Alice");
        assert!(!form.validate(&request, &MemorySession::new()));
        assert_eq!(form.error_messages(), first);
    }

    #[test]
    fn token_not_checked_when_fields_fail() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default());

        assert!(!form.validate(&sent_request(), &MemorySession::new()));
        assert!(form.global_errors().is_empty());
        assert_eq!(form.field_errors().count(), 1);
    }

    #[test]
    fn missing_session_token_is_a_global_error() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default().csrf_error_message("Expired."));
        let mut request = sent_request();
        request.add_body_param("name", "Alice");
        request.add_body_param(CSRF_FIELD_NAME, "forged");

        assert!(!form.validate(&request, &MemorySession::new()));
        assert_eq!(form.global_errors(), ["Expired."]);
        assert_eq!(form.field_errors().count(), 0);
    }

    fn assert_single_csrf_error(submitted_token: &str) {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default());
        let mut session = MemorySession::new();
        let _ = form.csrf_token(&mut session);
        let mut request = sent_request();
        request.add_body_param("name", "Alice");
        request.add_body_param(CSRF_FIELD_NAME, submitted_token);

        assert!(!form.validate(&request, &session));
        assert_eq!(
            form.global_errors(),
            ["The form has expired. Please submit it again."]
        );
        assert_eq!(form.field_errors().count(), 0);
    }

    #[test]
    fn oversized_token_is_a_single_global_error() {
        assert_single_csrf_error(&"x".repeat(300));
    }

    #[test]
    fn token_with_control_chars_is_a_single_global_error() {
        assert_single_csrf_error("abc\u{0}def\u{7}");
    }

    #[test]
    fn token_is_not_checked_with_fields_when_they_fail() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default());
        let mut request = sent_request();
        request.add_body_param(CSRF_FIELD_NAME, "x".repeat(300));

        assert!(!form.validate(&request, &MemorySession::new()));
        assert!(!form.field(CSRF_FIELD_NAME).unwrap().is_validated());
        assert_eq!(form.field_errors().count(), 1);
        assert!(form.global_errors().is_empty());
    }

    #[test]
    fn fallback_message_when_no_error_has_one() {
        let mut registry = FormRegistry::new();
        let mut form = Form::with_config(
            &mut registry,
            "contact",
            FormConfig::default()
                .csrf_protection(false)
                .global_error_message("Check the form."),
        )
        .unwrap();
        form.add_field(FormField::text("name").rule(Required::new().without_message()))
            .unwrap();

        assert!(!form.validate(&sent_request(), &MemorySession::new()));
        assert_eq!(form.global_errors(), ["Check the form."]);
        assert_eq!(form.error_messages(), ["Check the form."]);
    }

    #[test]
    fn removing_token_field_disables_protection() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default());

        form.remove_field(CSRF_FIELD_NAME).unwrap();

        assert!(!form.has_csrf_protection());
        assert!(form.csrf_token(&mut MemorySession::new()).is_none());
        form.remove_csrf_protection();
        assert!(!form.has_field(CSRF_FIELD_NAME));
    }

    #[test]
    fn remove_csrf_protection_drops_token_field() {
        let mut registry = FormRegistry::new();
        let mut form = form(&mut registry, FormConfig::default());

        form.remove_csrf_protection();
        form.remove_csrf_protection();

        assert!(!form.has_csrf_protection());
        assert!(!form.has_field(CSRF_FIELD_NAME));
        let mut request = sent_request();
        request.add_body_param("name", "Alice");
        assert!(form.validate(&request, &MemorySession::new()));
    }

    #[test]
    fn get_form_reads_query_string() {
        let mut registry = FormRegistry::new();
        let mut form = form(
            &mut registry,
            FormConfig::default().method(FormMethod::Get).csrf_protection(false),
        );
        let mut request = sent_request();
        request.add_query_param("name", "Alice");

        assert!(form.validate(&request, &MemorySession::new()));
        assert_eq!(form.field("name").unwrap().value().as_text(), Some("Alice"));
    }
}
