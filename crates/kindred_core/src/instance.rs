//! Entity instances.

use crate::data::EntityData;
use crate::error::CoreResult;
use kindred_codec::Value;
use kindred_store::{Key, Properties};

/// A snapshot of one entity: its kind, optional key, and property map.
///
/// Instances are immutable-by-convention value types; every caller
/// holds an independent copy. The key is assigned at most once - at
/// creation time when derivable from key-component attributes,
/// otherwise by the store at persist time.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    kind: String,
    key: Option<Key>,
    properties: Properties,
}

impl Instance {
    /// Creates a keyless instance over a property map.
    pub(crate) fn new(kind: impl Into<String>, properties: Properties) -> Self {
        Self {
            kind: kind.into(),
            key: None,
            properties,
        }
    }

    /// Attaches a key. Callers must only do this once.
    pub(crate) fn with_key(mut self, key: Key) -> Self {
        debug_assert!(self.key.is_none(), "key is assigned at most once");
        self.key = Some(key);
        self
    }

    /// The entity kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The entity key, if one has been assigned.
    #[must_use]
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Returns the value of a property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// The full property map.
    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Consumes the instance, returning its property map.
    #[must_use]
    pub fn into_properties(self) -> Properties {
        self.properties
    }

    /// Decodes this instance's properties into a typed value.
    ///
    /// # Errors
    ///
    /// Propagates the decoding error of the target type.
    pub fn data<T: EntityData>(&self) -> CoreResult<T> {
        T::from_properties(&self.properties)
    }

    /// Replaces the property map, keeping kind and key.
    pub(crate) fn map_properties(
        self,
        f: impl FnOnce(Properties) -> CoreResult<Properties>,
    ) -> CoreResult<Self> {
        Ok(Self {
            kind: self.kind,
            key: self.key,
            properties: f(self.properties)?,
        })
    }
}
