use crate::{ConfigurationError, FormField, NotFoundError};

/// A child of a collection: a field or a nested collection.
#[derive(Debug)]
pub enum Component {
    /// A single field
    Field(FormField),
    /// A nested group of components
    Collection(FieldCollection),
}

impl Component {
    /// The child's name, unique within its parent.
    pub fn name(&self) -> &str {
        match self {
            Component::Field(field) => field.name(),
            Component::Collection(collection) => collection.name(),
        }
    }

    fn set_render_required_marker(&mut self, enabled: bool) {
        match self {
            Component::Field(field) => field.set_render_required_marker(enabled),
            Component::Collection(collection) => collection.set_render_required_marker(enabled),
        }
    }
}

impl From<FormField> for Component {
    fn from(field: FormField) -> Self {
        Component::Field(field)
    }
}

impl From<FieldCollection> for Component {
    fn from(collection: FieldCollection) -> Self {
        Component::Collection(collection)
    }
}

/// An ordered, named group of fields and nested collections.
///
/// # Examples
///
/// ```
/// use form_core::{FieldCollection, FormField};
///
/// let mut address = FieldCollection::new("address");
/// address.add_field(FormField::text("street")).unwrap();
/// address.add_field(FormField::text("city")).unwrap();
///
/// assert!(address.has_field("city"));
/// assert!(address.add_field(FormField::text("city")).is_err());
/// ```
#[derive(Debug)]
pub struct FieldCollection {
    name: String,
    children: Vec<Component>,
    render_required_marker: bool,
}

impl FieldCollection {
    /// Creates an empty collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            render_required_marker: false,
        }
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a field.
    pub fn add_field(&mut self, field: FormField) -> Result<(), ConfigurationError> {
        self.add_component(Component::Field(field))
    }

    /// Appends a field or collection, failing if the name is taken.
    pub fn add_component(&mut self, component: impl Into<Component>) -> Result<(), ConfigurationError> {
        let mut component = component.into();
        if self.contains(component.name()) {
            return Err(ConfigurationError::DuplicateName {
                collection: self.name.clone(),
                name: component.name().to_string(),
            });
        }
        if self.render_required_marker {
            component.set_render_required_marker(true);
        }
        self.children.push(component);
        Ok(())
    }

    /// Appends components in order, stopping at the first failure.
    ///
    /// Components added before the failure stay in the collection.
    pub fn add_assemblage<I>(&mut self, components: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        for component in components {
            self.add_component(component)?;
        }
        Ok(())
    }

    /// True if a direct child with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.children.iter().any(|child| child.name() == name)
    }

    /// True if a direct field child with this name exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields().any(|field| field.name() == name)
    }

    /// Returns the direct field child named `name`.
    pub fn field(&self, name: &str) -> Result<&FormField, NotFoundError> {
        self.fields()
            .find(|field| field.name() == name)
            .ok_or_else(|| NotFoundError::new(name))
    }

    /// Returns the direct field child named `name`, mutably.
    pub fn field_mut(&mut self, name: &str) -> Result<&mut FormField, NotFoundError> {
        self.fields_mut()
            .find(|field| field.name() == name)
            .ok_or_else(|| NotFoundError::new(name))
    }

    /// Returns the direct collection child named `name`.
    pub fn collection(&self, name: &str) -> Option<&FieldCollection> {
        self.children.iter().find_map(|child| match child {
            Component::Collection(collection) if collection.name() == name => Some(collection),
            _ => None,
        })
    }

    /// Returns the direct collection child named `name`, mutably.
    pub fn collection_mut(&mut self, name: &str) -> Option<&mut FieldCollection> {
        self.children.iter_mut().find_map(|child| match child {
            Component::Collection(collection) if collection.name() == name => Some(collection),
            _ => None,
        })
    }

    /// Removes and returns the direct field child named `name`.
    pub fn remove_field(&mut self, name: &str) -> Result<FormField, NotFoundError> {
        let index = self
            .children
            .iter()
            .position(|child| matches!(child, Component::Field(field) if field.name() == name))
            .ok_or_else(|| NotFoundError::new(name))?;
        match self.children.remove(index) {
            Component::Field(field) => Ok(field),
            Component::Collection(_) => Err(NotFoundError::new(name)),
        }
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Direct field children in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.children.iter().filter_map(|child| match child {
            Component::Field(field) => Some(field),
            Component::Collection(_) => None,
        })
    }

    /// Direct field children in insertion order, mutably.
    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
        self.children.iter_mut().filter_map(|child| match child {
            Component::Field(field) => Some(field),
            Component::Collection(_) => None,
        })
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True if the collection has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether required markers are enabled for this collection.
    pub fn render_required_marker(&self) -> bool {
        self.render_required_marker
    }

    /// Enables or disables required markers here and in every descendant,
    /// including children added later.
    pub fn set_render_required_marker(&mut self, enabled: bool) {
        self.render_required_marker = enabled;
        for child in &mut self.children {
            child.set_render_required_marker(enabled);
        }
    }
}
