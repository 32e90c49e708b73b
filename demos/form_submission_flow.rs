//! Form submission flow demonstration.
//!
//! This example walks one contact form through two requests:
//! 1. Build the form and hand the session token to the renderer
//! 2. Validate a correct submission
//! 3. Validate a submission with a forged token and a bad age
//!
//! Run with: `cargo run --example form_submission_flow`

use form_core::rules::{Range, Required, ValidDomain};
use form_core::{
    FieldValue, Form, FormField, FormRegistry, MemorySession, RequestContext, SessionStore,
    CSRF_FIELD_NAME,
};

fn contact_form(registry: &mut FormRegistry) -> Result<Form, Box<dyn std::error::Error>> {
    let mut form = Form::new(registry, "contact")?;
    form.add_assemblage([
        FormField::text("name").label("Name").rule(Required::new()),
        FormField::domain("website").label("Website").rule(ValidDomain::new()),
        FormField::integer("age").label("Age").rule(Range::between(18.0, 130.0)),
    ])?;
    Ok(form)
}

fn submit(
    session: &dyn SessionStore,
    request: &RequestContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = FormRegistry::new();
    let mut form = contact_form(&mut registry)?;

    println!("\n=== Request {} ===", request.request_id());
    println!("Sent: {}", form.is_sent(request));

    if form.validate(request, session) {
        println!("Valid submission:");
        for field in form.all_fields().filter(|f| f.name() != CSRF_FIELD_NAME) {
            let value = match field.value() {
                FieldValue::Text(text) => text.clone(),
                FieldValue::Int(n) => n.to_string(),
                other => format!("{other:?}"),
            };
            println!("   {} = {}", field.name(), value);
        }
    } else {
        println!("Rejected:");
        for message in form.error_messages() {
            println!("   - {message}");
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut session = MemorySession::new();

    // Step 1: render the form with the session token
    let mut registry = FormRegistry::new();
    let form = contact_form(&mut registry)?;
    let token = form
        .csrf_token(&mut session)
        .ok_or("form has no CSRF protection")?;
    println!("Rendering form with token {token}");

    // Step 2: a correct submission
    let mut request = RequestContext::new("req-0001");
    request.add_query_param("contact", "");
    request.add_body_param(CSRF_FIELD_NAME, token.expose_secret().clone());
    request.add_body_param("name", "  Ada Lovelace ");
    request.add_body_param("website", "https://WWW.Example.com/");
    request.add_body_param("age", "36");
    submit(&session, &request)?;

    // Step 3: the same form with a bad age, then with a forged token
    let mut request = RequestContext::new("req-0002");
    request.add_query_param("contact", "");
    request.add_body_param(CSRF_FIELD_NAME, token.expose_secret().clone());
    request.add_body_param("name", "Ada");
    request.add_body_param("age", "12.5");
    submit(&session, &request)?;

    let mut request = RequestContext::new("req-0003");
    request.add_query_param("contact", "");
    request.add_body_param(CSRF_FIELD_NAME, "forged");
    request.add_body_param("name", "Mallory");
    submit(&session, &request)?;

    Ok(())
}
