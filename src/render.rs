use crate::Form;

/// Turns a form into markup.
///
/// No renderer ships with this crate; hosts implement this for their
/// template engine. A renderer reads field values, errors and required
/// markers from the form and embeds the token from [`Form::csrf_token`].
///
/// # Examples
///
/// ```
/// use form_core::{Form, FormField, FormRegistry, FormRenderer};
///
/// struct FieldList;
///
/// impl FormRenderer for FieldList {
///     fn render(&self, form: &Form) -> String {
///         form.all_fields()
///             .map(|field| field.name().to_string())
///             .collect::<Vec<_>>()
///             .join(",")
///     }
/// }
///
/// let mut registry = FormRegistry::new();
/// let mut form = Form::new(&mut registry, "login").unwrap();
/// form.add_field(FormField::text("user")).unwrap();
///
/// assert_eq!(FieldList.render(&form), "_csrf_token,user");
/// ```
pub trait FormRenderer {
    /// Renders `form`.
    fn render(&self, form: &Form) -> String;
}
