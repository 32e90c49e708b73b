//! Server-side form assembly, input sanitization and validation.
//!
//! This crate validates HTML form submissions with taint tracking:
//! - **Forms**: named, ordered trees of fields with submission detection
//! - **Taint tracking**: submitted values stay [`Tainted`] until a
//!   [`Sanitizer`] turns them into [`Verified`] typed values
//! - **Rules and listeners**: per-field checks plus hooks around each
//!   validation step
//! - **CSRF protection**: a per-session token checked on every submission
//!
//! # Core Types
//!
//! - [`Form`]: a named form, validated once per request
//! - [`FormField`]: a single input with its rules and listeners
//! - [`RequestContext`]: query, body and upload data handed over by the host
//! - [`SessionStore`]: where the CSRF token and CSP nonce live
//! - [`Secret<T>`]: wrapper that redacts the token in logs and output
//!
//! # Examples
//!
//! ```
//! use form_core::rules::{Range, Required};
//! use form_core::{
//!     Form, FormField, FormRegistry, MemorySession, RequestContext, CSRF_FIELD_NAME,
//! };
//!
//! let mut registry = FormRegistry::new();
//! let mut session = MemorySession::new();
//!
//! let mut form = Form::new(&mut registry, "signup").unwrap();
//! form.add_field(FormField::text("user").rule(Required::new()))
//!     .unwrap();
//! form.add_field(FormField::integer("age").rule(Range::between(18.0, 130.0)))
//!     .unwrap();
//!
//! // The renderer embeds this token in the hidden field.
//! let token = form.csrf_token(&mut session).unwrap();
//!
//! let mut request = RequestContext::new("req-42");
//! request.add_query_param("signup", "");
//! request.add_body_param("user", "  alice ");
//! request.add_body_param("age", "42");
//! request.add_body_param(CSRF_FIELD_NAME, token.expose_secret().clone());
//!
//! assert!(form.validate(&request, &session));
//! assert_eq!(form.field("user").unwrap().value().as_text(), Some("alice"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
pub mod csp;
pub mod csrf;
mod error;
mod field;
mod form;
mod listener;
mod logging;
mod registry;
mod render;
mod request;
pub mod rules;
mod sanitizer;
mod secret;
mod session;
mod tainted;
#[cfg(test)]
mod test_utils;
mod validator;
mod value;
mod verified;

pub use collection::{Component, FieldCollection};
pub use config::{FormConfig, FormMethod};
pub use csrf::CSRF_FIELD_NAME;
pub use error::{ConfigurationError, NotFoundError, SanitizationError, SanitizationErrorKind};
pub use field::{FieldError, FieldKind, FormField};
pub use form::Form;
pub use listener::{FieldListener, FieldState, FileFieldListener};
pub use registry::FormRegistry;
pub use render::FormRenderer;
pub use request::{ExtractRequest, InputData, RequestContext};
pub use sanitizer::{
    BooleanSanitizer, DomainSanitizer, FloatSanitizer, IntegerSanitizer, Sanitizer, TextSanitizer,
    UploadSanitizer,
};
pub use secret::Secret;
pub use session::{MemorySession, SessionStore, CSP_NONCE_KEY, CSRF_TOKEN_KEY};
pub use tainted::Tainted;
pub use validator::{DomainValidator, IpMode, IpValidator, TldList, Validator};
pub use value::{FieldValue, InputValue, RawValue, UploadStatus, UploadedFile};
pub use verified::Verified;
