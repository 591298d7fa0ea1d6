//! Attribute declarations.

use crate::transform::{LONG_TEXT, SERIALIZE};
use kindred_codec::Value;

/// A declaration-time attribute specification.
///
/// Built with consuming builder methods and handed to
/// [`crate::EntitySchema::compile`]:
///
/// ```
/// use kindred_core::Attribute;
///
/// let attrs = vec![
///     Attribute::new("pmid").key_component(),
///     Attribute::new("abstract").text().default(""),
///     Attribute::new("authors").complex(),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    key_component: bool,
    default: Option<Value>,
    transform: Option<String>,
}

impl Attribute {
    /// Declares an attribute with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_component: false,
            default: None,
            transform: None,
        }
    }

    /// Marks this attribute as a component of the derived natural key.
    #[must_use]
    pub fn key_component(mut self) -> Self {
        self.key_component = true;
        self
    }

    /// Sets the default value merged into blank instances.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// References a registered transform by name.
    #[must_use]
    pub fn transform(mut self, name: impl Into<String>) -> Self {
        self.transform = Some(name.into());
        self
    }

    /// Shorthand for the built-in long-text transform.
    #[must_use]
    pub fn text(self) -> Self {
        self.transform(LONG_TEXT)
    }

    /// Shorthand for the built-in serialization transform.
    #[must_use]
    pub fn complex(self) -> Self {
        self.transform(SERIALIZE)
    }

    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this attribute contributes to the derived key.
    #[must_use]
    pub fn is_key_component(&self) -> bool {
        self.key_component
    }

    /// The declared default value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The referenced transform name, if any.
    #[must_use]
    pub fn transform_name(&self) -> Option<&str> {
        self.transform.as_deref()
    }
}
