use std::fmt;

use crate::listener::{FieldListener, FieldState, FileFieldListener};
use crate::request::InputData;
use crate::rules::Rule;
use crate::sanitizer::{
    BooleanSanitizer, DomainSanitizer, FloatSanitizer, IntegerSanitizer, Sanitizer, TextSanitizer,
    UploadSanitizer,
};
use crate::{
    FieldValue, InputValue, RawValue, SanitizationError, SanitizationErrorKind, Tainted,
};

const TEXT_LIMIT: usize = 256;
const TEXTAREA_LIMIT: usize = 65_536;

/// The input type of a field; decides how submitted input is sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    TextArea,
    /// Hidden single-line text
    Hidden,
    /// Whole number
    Integer,
    /// Decimal number
    Float,
    /// Domain name, normalized by [`DomainSanitizer`]
    Domain,
    /// Checkbox producing a boolean
    Checkbox,
    /// File upload
    File,
}

/// One validation error on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    rule: String,
    message: Option<String>,
    sanitization: Option<SanitizationErrorKind>,
}

impl FieldError {
    pub(crate) fn rule(rule: &str, message: Option<&str>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.map(str::to_string),
            sanitization: None,
        }
    }

    pub(crate) fn listener(message: String) -> Self {
        Self {
            rule: "listener".to_string(),
            message: Some(message),
            sanitization: None,
        }
    }

    fn sanitization(kind: FieldKind, error: &SanitizationError) -> Self {
        Self {
            rule: "sanitize".to_string(),
            message: Some(sanitization_message(kind, error)),
            sanitization: Some(error.kind()),
        }
    }

    /// Name of the rule that failed (`"sanitize"` for sanitization failures).
    pub fn rule_name(&self) -> &str {
        &self.rule
    }

    /// User-facing message, if the failing rule has one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The sanitization failure behind this error, if any.
    pub fn sanitization_kind(&self) -> Option<SanitizationErrorKind> {
        self.sanitization
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "failed rule '{}'", self.rule),
        }
    }
}

fn sanitization_message(kind: FieldKind, error: &SanitizationError) -> String {
    let message = match error.kind() {
        SanitizationErrorKind::OutOfRange => "The number is out of range.",
        SanitizationErrorKind::NotAWholeNumber => "Please enter a whole number.",
        SanitizationErrorKind::TooLong => "The text is too long.",
        SanitizationErrorKind::ContainsControlChars => "The text contains invalid characters.",
        SanitizationErrorKind::UploadFailed => {
            return format!("The upload failed: {}.", error.message());
        }
        SanitizationErrorKind::NotSuitable | SanitizationErrorKind::Malformed => match kind {
            FieldKind::Integer => "Please enter a whole number.",
            FieldKind::Float => "Please enter a number.",
            FieldKind::Domain => "Please enter a domain name.",
            FieldKind::Checkbox => "Please choose a valid option.",
            FieldKind::File => "Please upload a file.",
            FieldKind::Text | FieldKind::TextArea | FieldKind::Hidden => "The value is invalid.",
        },
    };
    message.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Unvalidated,
    Validated,
}

/// A single form input with its rules, listeners and validation result.
///
/// Fields are assembled with consuming builder methods and then added to a
/// [`Form`](crate::Form).
///
/// # Examples
///
/// ```
/// use form_core::FormField;
/// use form_core::rules::{Range, Required};
///
/// let age = FormField::integer("age")
///     .label("Age")
///     .rule(Required::new())
///     .rule(Range::between(18.0, 130.0));
///
/// assert_eq!(age.name(), "age");
/// assert!(age.is_required());
/// ```
pub struct FormField {
    state: FieldState,
    kind: FieldKind,
    label: Option<String>,
    text_limit: usize,
    raw: Option<Tainted<InputValue>>,
    rules: Vec<Box<dyn Rule>>,
    listeners: Vec<Box<dyn FieldListener>>,
    file_listeners: Vec<Box<dyn FileFieldListener>>,
    render_required_marker: bool,
    lifecycle: Lifecycle,
}

impl FormField {
    /// Creates a field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let text_limit = match kind {
            FieldKind::TextArea => TEXTAREA_LIMIT,
            _ => TEXT_LIMIT,
        };
        Self {
            state: FieldState::new(name.into()),
            kind,
            label: None,
            text_limit,
            raw: None,
            rules: Vec::new(),
            listeners: Vec::new(),
            file_listeners: Vec::new(),
            render_required_marker: false,
            lifecycle: Lifecycle::Unvalidated,
        }
    }

    /// Single-line text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Multi-line text field.
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextArea)
    }

    /// Hidden field.
    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Hidden)
    }

    /// Whole-number field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Decimal-number field.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Domain-name field.
    pub fn domain(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Domain)
    }

    /// Checkbox field.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }

    /// File upload field.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File)
    }

    /// Sets the label shown next to the input.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the maximum text length in characters.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn text_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "text limit must be greater than 0");
        self.text_limit = limit;
        self
    }

    /// Attaches a rule; rules run in the order they were attached.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.add_rule(rule);
        self
    }

    /// Attaches a listener.
    pub fn listener(mut self, listener: impl FieldListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Attaches a file listener; only called for [`FieldKind::File`].
    pub fn file_listener(mut self, listener: impl FileFieldListener + 'static) -> Self {
        self.file_listeners.push(Box::new(listener));
        self
    }

    /// Attaches a rule to an existing field.
    pub fn add_rule(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// The field name.
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// The field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The label, if set.
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// True if a `required` rule is attached.
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|rule| rule.name() == "required")
    }

    /// Whether renderers should mark this field as required.
    pub fn render_required_marker(&self) -> bool {
        self.render_required_marker && self.is_required()
    }

    pub(crate) fn set_render_required_marker(&mut self, enabled: bool) {
        self.render_required_marker = enabled;
    }

    /// The sanitized value; [`FieldValue::Null`] before validation.
    pub fn value(&self) -> &FieldValue {
        self.state.value()
    }

    /// The submitted input, still tainted.
    pub fn raw_value(&self) -> Option<&Tainted<InputValue>> {
        self.raw.as_ref()
    }

    /// Errors from the last validation pass.
    pub fn errors(&self) -> &[FieldError] {
        self.state.errors()
    }

    /// True if the last validation pass recorded an error.
    pub fn has_errors(&self) -> bool {
        !self.state.errors().is_empty()
    }

    /// True once the field has gone through a validation pass.
    pub fn is_validated(&self) -> bool {
        self.lifecycle == Lifecycle::Validated
    }

    pub(crate) fn take_errors(&mut self) -> Vec<FieldError> {
        self.state.take_errors()
    }

    /// Runs one validation pass against the submitted input.
    ///
    /// Sanitization errors and rule failures are recorded on the field;
    /// nothing is propagated.
    pub fn validate(&mut self, input: &InputData) {
        self.state.reset();
        let raw = input.get(self.name()).cloned();
        let submitted_empty = raw.as_ref().map_or(true, |raw| raw.peek().is_empty());

        for listener in &self.listeners {
            if submitted_empty {
                listener.on_empty_value_before_validation(&mut self.state);
            } else {
                listener.on_not_empty_value_before_validation(&mut self.state);
            }
        }

        // an empty submission keeps whatever a before hook set, so a
        // default injected there goes through the rules
        self.raw = raw.clone();
        let sanitized = match raw {
            Some(raw) if !submitted_empty => self.sanitize(raw),
            _ => Ok(self.state.value().clone()),
        };

        match sanitized {
            Ok(value) => {
                self.state.set_value(value);
                self.notify_upload_accepted();
                self.apply_rules();
            }
            Err(error) => {
                tracing::debug!(field = %self.name(), kind = %error.kind(), "sanitization failed");
                self.state.set_value(FieldValue::Null);
                self.state.push_error(FieldError::sanitization(self.kind, &error));
                if self.kind == FieldKind::File {
                    for listener in &self.file_listeners {
                        listener.on_upload_rejected(&error, &mut self.state);
                    }
                }
            }
        }

        let failed = !self.state.errors().is_empty();
        for listener in &self.listeners {
            if failed {
                listener.on_validation_error(&mut self.state);
            } else {
                listener.on_validation_success(&mut self.state);
            }
        }

        let value_empty = self.state.value().is_empty();
        for listener in &self.listeners {
            if value_empty {
                listener.on_empty_value_after_validation(&mut self.state);
            } else {
                listener.on_not_empty_value_after_validation(&mut self.state);
            }
        }

        self.lifecycle = Lifecycle::Validated;
        tracing::trace!(field = %self.name(), errors = self.state.errors().len(), "field validated");
    }

    fn sanitize(&self, raw: Tainted<InputValue>) -> Result<FieldValue, SanitizationError> {
        match (self.kind, raw.into_inner()) {
            (FieldKind::File, InputValue::File(file)) => UploadSanitizer
                .sanitize(Tainted::new(file))
                .map(|verified| FieldValue::File(verified.into_inner())),
            (_, InputValue::File(_)) => Err(SanitizationError::new(
                SanitizationErrorKind::NotSuitable,
                "expected text, got a file upload",
            )),
            (_, InputValue::Text(text)) => self.sanitize_text(Tainted::new(RawValue::Str(text))),
        }
    }

    fn sanitize_text(&self, text: Tainted<RawValue>) -> Result<FieldValue, SanitizationError> {
        let value = match self.kind {
            FieldKind::Text | FieldKind::Hidden => TextSanitizer::new(self.text_limit)
                .sanitize(text)?
                .map(FieldValue::Text),
            FieldKind::TextArea => TextSanitizer::new(self.text_limit)
                .multiline()
                .sanitize(text)?
                .map(FieldValue::Text),
            FieldKind::Integer => IntegerSanitizer.sanitize(text)?.map(FieldValue::Int),
            FieldKind::Float => FloatSanitizer.sanitize(text)?.map(FieldValue::Float),
            FieldKind::Domain => DomainSanitizer.sanitize(text)?.map(FieldValue::Text),
            FieldKind::Checkbox => BooleanSanitizer.sanitize(text)?.map(FieldValue::Bool),
            FieldKind::File => {
                return Err(SanitizationError::new(
                    SanitizationErrorKind::NotSuitable,
                    "expected a file upload",
                ));
            }
        };
        Ok(value.into_inner())
    }

    fn notify_upload_accepted(&mut self) {
        if let FieldValue::File(file) = self.state.value().clone() {
            for listener in &self.file_listeners {
                listener.on_upload_accepted(&file, &mut self.state);
            }
        }
    }

    fn apply_rules(&mut self) {
        for rule in &self.rules {
            if rule.check(self.state.value()) {
                continue;
            }
            self.state
                .push_error(FieldError::rule(rule.name(), rule.message()));
            if rule.stops_chain() {
                break;
            }
        }
    }
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("name", &self.name())
            .field("kind", &self.kind)
            .field("value", self.state.value())
            .field("errors", &self.state.errors())
            .field("rules", &self.rules)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use super::*;
    use crate::rules::{FnRule, MaxFileSize, MinLength, Required, ValidToken};
    use crate::{UploadStatus, UploadedFile};

    fn input(pairs: &[(&str, &str)]) -> InputData {
        pairs
            .iter()
            .map(|(k, v)| (*k, InputValue::Text(v.to_string())))
            .collect()
    }

    fn upload(status: UploadStatus, size: u64) -> InputData {
        [(
            "cv",
            InputValue::File(UploadedFile {
                name: "cv.pdf".to_string(),
                tmp_path: PathBuf::from("/tmp/upload-1"),
                mime_type: "application/pdf".to_string(),
                status,
                size,
            }),
        )]
        .into_iter()
        .collect()
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl Recorder {
        fn events(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }
    }

    impl FieldListener for Recorder {
        fn on_empty_value_before_validation(&self, _field: &mut FieldState) {
            self.0.borrow_mut().push("empty_before");
        }
        fn on_empty_value_after_validation(&self, _field: &mut FieldState) {
            self.0.borrow_mut().push("empty_after");
        }
        fn on_not_empty_value_before_validation(&self, _field: &mut FieldState) {
            self.0.borrow_mut().push("not_empty_before");
        }
        fn on_not_empty_value_after_validation(&self, _field: &mut FieldState) {
            self.0.borrow_mut().push("not_empty_after");
        }
        fn on_validation_error(&self, _field: &mut FieldState) {
            self.0.borrow_mut().push("error");
        }
        fn on_validation_success(&self, _field: &mut FieldState) {
            self.0.borrow_mut().push("success");
        }
    }

    impl FileFieldListener for Recorder {
        fn on_upload_accepted(&self, _file: &UploadedFile, _field: &mut FieldState) {
            self.0.borrow_mut().push("accepted");
        }
        fn on_upload_rejected(&self, _error: &SanitizationError, _field: &mut FieldState) {
            self.0.borrow_mut().push("rejected");
        }
    }

    #[test]
    fn listener_order_for_valid_value() {
        let recorder = Recorder::default();
        let mut field = FormField::text("name").listener(recorder.clone());

        field.validate(&input(&[("name", "Alice")]));

        assert_eq!(recorder.events(), ["not_empty_before", "success", "not_empty_after"]);
        assert!(field.is_validated());
    }

    #[test]
    fn listener_order_for_missing_required_value() {
        let recorder = Recorder::default();
        let mut field = FormField::text("name")
            .rule(Required::new())
            .listener(recorder.clone());

        field.validate(&input(&[("name", "   ")]));

        assert_eq!(recorder.events(), ["empty_before", "error", "empty_after"]);
        assert_eq!(field.errors()[0].rule_name(), "required");
    }

    #[test]
    fn listener_can_fill_empty_value() {
        struct DefaultCountry;

        impl FieldListener for DefaultCountry {
            fn on_empty_value_after_validation(&self, field: &mut FieldState) {
                field.set_value(FieldValue::Text("DE".to_string()));
            }
        }

        let mut field = FormField::text("country").listener(DefaultCountry);
        field.validate(&InputData::default());

        assert_eq!(field.value().as_text(), Some("DE"));
    }

    struct DefaultAnswer;

    impl FieldListener for DefaultAnswer {
        fn on_empty_value_before_validation(&self, field: &mut FieldState) {
            field.set_value(FieldValue::Text("42".to_string()));
        }

        fn on_not_empty_value_before_validation(&self, field: &mut FieldState) {
            field.set_value(FieldValue::Text("ignored".to_string()));
        }
    }

    #[test]
    fn default_from_before_hook_goes_through_rules() {
        let mut field = FormField::text("answer")
            .rule(Required::new())
            .rule(MinLength::new(3))
            .listener(DefaultAnswer);

        field.validate(&InputData::default());

        assert_eq!(field.value().as_text(), Some("42"));
        assert_eq!(field.errors().len(), 1);
        assert_eq!(field.errors()[0].rule_name(), "min_length");
    }

    #[test]
    fn default_from_before_hook_satisfies_required() {
        let mut field = FormField::text("answer")
            .rule(Required::new())
            .listener(DefaultAnswer);

        field.validate(&input(&[("answer", "  ")]));

        assert_eq!(field.value().as_text(), Some("42"));
        assert!(!field.has_errors());
    }

    #[test]
    fn submitted_value_wins_over_before_hook() {
        let mut field = FormField::text("answer").listener(DefaultAnswer);

        field.validate(&input(&[("answer", "seven")]));

        assert_eq!(field.value().as_text(), Some("seven"));
    }

    #[test]
    fn sanitization_failure_skips_rules() {
        let mut field = FormField::integer("age").rule(FnRule::new("never", |_| false));

        field.validate(&input(&[("age", "12.5")]));

        assert_eq!(field.errors().len(), 1);
        let error = &field.errors()[0];
        assert_eq!(error.rule_name(), "sanitize");
        assert_eq!(error.sanitization_kind(), Some(SanitizationErrorKind::NotAWholeNumber));
        assert_eq!(field.value(), &FieldValue::Null);
    }

    #[test]
    fn all_rules_run_unless_one_stops_the_chain() {
        let mut field = FormField::text("code")
            .rule(MinLength::new(5))
            .rule(FnRule::new("digits", |v| v.as_text().is_some_and(|s| s.chars().all(|c| c.is_ascii_digit()))));

        field.validate(&input(&[("code", "ab")]));
        assert_eq!(field.errors().len(), 2);

        let mut token = FormField::hidden("token")
            .rule(ValidToken::new(None))
            .rule(FnRule::new("never", |_| false));
        token.validate(&input(&[("token", "abc")]));
        assert_eq!(token.errors().len(), 1);
        assert_eq!(token.errors()[0].rule_name(), "csrf_token");
    }

    #[test]
    fn revalidation_resets_errors() {
        let mut field = FormField::text("name").rule(Required::new());

        field.validate(&InputData::default());
        assert!(field.has_errors());

        field.validate(&input(&[("name", "Bob")]));
        assert!(!field.has_errors());
    }

    #[test]
    fn typed_values_by_kind() {
        let data = input(&[
            ("n", "42"),
            ("f", "1,25"),
            ("d", "https://www.Example.com/"),
            ("c", "on"),
        ]);

        let mut n = FormField::integer("n");
        let mut f = FormField::float("f");
        let mut d = FormField::domain("d");
        let mut c = FormField::checkbox("c");
        for field in [&mut n, &mut f, &mut d, &mut c] {
            field.validate(&data);
        }

        assert_eq!(n.value(), &FieldValue::Int(42));
        assert_eq!(f.value(), &FieldValue::Float(1.25));
        assert_eq!(d.value().as_text(), Some("example.com"));
        assert_eq!(c.value(), &FieldValue::Bool(true));
    }

    #[test]
    fn text_limit_applies() {
        let mut field = FormField::text("nick").text_limit(3);

        field.validate(&input(&[("nick", "abcd")]));

        assert_eq!(field.errors()[0].sanitization_kind(), Some(SanitizationErrorKind::TooLong));
    }

    #[test]
    fn file_on_text_field_is_rejected() {
        let mut field = FormField::text("cv");

        field.validate(&upload(UploadStatus::Ok, 10));

        assert_eq!(field.errors()[0].sanitization_kind(), Some(SanitizationErrorKind::NotSuitable));
    }

    #[test]
    fn accepted_upload_notifies_file_listeners() {
        let recorder = Recorder::default();
        let mut field = FormField::file("cv")
            .rule(MaxFileSize::new(1024))
            .file_listener(recorder.clone());

        field.validate(&upload(UploadStatus::Ok, 512));

        assert_eq!(recorder.events(), ["accepted"]);
        assert!(matches!(field.value(), FieldValue::File(file) if file.size == 512));
    }

    #[test]
    fn failed_upload_notifies_file_listeners() {
        let recorder = Recorder::default();
        let mut field = FormField::file("cv").file_listener(recorder.clone());

        field.validate(&upload(UploadStatus::Partial, 512));

        assert_eq!(recorder.events(), ["rejected"]);
        assert_eq!(field.errors()[0].sanitization_kind(), Some(SanitizationErrorKind::UploadFailed));
    }

    #[test]
    fn missing_upload_is_empty() {
        let recorder = Recorder::default();
        let mut field = FormField::file("cv")
            .rule(Required::new())
            .listener(recorder.clone());

        field.validate(&upload(UploadStatus::NoFile, 0));

        assert_eq!(recorder.events(), ["empty_before", "error", "empty_after"]);
    }
}
