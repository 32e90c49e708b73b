//! The request boundary: what the host web framework hands to a form.
//!
//! The host parses the HTTP request and fills a [`RequestContext`]. Every
//! value becomes [`Tainted`] when the form reads it, so nothing submitted
//! can reach application code without sanitization.

use std::collections::HashMap;

use crate::{FormMethod, InputValue, Tainted, UploadedFile};

/// Request data needed to detect and validate a form submission.
///
/// # Examples
///
/// ```
/// use form_core::{FormMethod, RequestContext};
///
/// let mut request = RequestContext::new("req-1");
/// request.add_query_param("signup", "");
/// request.add_body_param("email", "user@example.com");
///
/// assert!(request.has_query_param("signup"));
/// let input = request.input_for(FormMethod::Post);
/// assert!(input.contains("email"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    request_id: String,
    query_params: HashMap<String, String>,
    body_params: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl RequestContext {
    /// Creates an empty context with the given request ID.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    /// Adds a query-string parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query_params.insert(key.into(), value.into());
    }

    /// Adds a request-body parameter.
    pub fn add_body_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.body_params.insert(key.into(), value.into());
    }

    /// Adds an uploaded file.
    pub fn add_file(&mut self, key: impl Into<String>, file: UploadedFile) {
        self.files.insert(key.into(), file);
    }

    /// The request ID, used to correlate log events.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// True if the query string contains `key`, with or without a value.
    pub fn has_query_param(&self, key: &str) -> bool {
        self.query_params.contains_key(key)
    }

    /// Builds the input mapping for a form using `method`.
    ///
    /// POST forms read the body, GET forms the query string. Uploaded files
    /// are merged in for both and win over a text parameter of the same name.
    pub fn input_for(&self, method: FormMethod) -> InputData {
        let params = match method {
            FormMethod::Post => &self.body_params,
            FormMethod::Get => &self.query_params,
        };

        let mut values: HashMap<String, Tainted<InputValue>> = params
            .iter()
            .map(|(k, v)| (k.clone(), Tainted::new(InputValue::Text(v.clone()))))
            .collect();
        values.extend(
            self.files
                .iter()
                .map(|(k, file)| (k.clone(), Tainted::new(InputValue::File(file.clone())))),
        );

        InputData { values }
    }
}

/// Submitted values keyed by field name, all tainted.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    values: HashMap<String, Tainted<InputValue>>,
}

impl InputData {
    /// Returns the tainted value submitted for `name`.
    pub fn get(&self, name: &str) -> Option<&Tainted<InputValue>> {
        self.values.get(name)
    }

    /// True if a value was submitted for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of submitted values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, InputValue)> for InputData {
    fn from_iter<I: IntoIterator<Item = (K, InputValue)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Tainted::new(v)))
                .collect(),
        }
    }
}

/// Builds a [`RequestContext`] from a framework-specific request type.
///
/// Framework integrations implement this once for their request type.
/// The implementation only copies data; it does not validate anything.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use form_core::{ExtractRequest, RequestContext};
///
/// struct MyFrameworkRequest {
///     id: String,
///     query: HashMap<String, String>,
///     form: HashMap<String, String>,
/// }
///
/// impl ExtractRequest for MyFrameworkRequest {
///     fn extract_request(&self) -> RequestContext {
///         let mut request = RequestContext::new(self.id.clone());
///         for (k, v) in &self.query {
///             request.add_query_param(k.clone(), v.clone());
///         }
///         for (k, v) in &self.form {
///             request.add_body_param(k.clone(), v.clone());
///         }
///         request
///     }
/// }
/// ```
pub trait ExtractRequest {
    /// Copies query, body and file data into a [`RequestContext`].
    fn extract_request(&self) -> RequestContext;
}
