//! Hierarchical entity keys.

use std::fmt;
use uuid::Uuid;

/// The local identifier part of a [`Key`].
///
/// Derived natural keys carry a name built from the entity's
/// key-component attributes; entities without key components get an
/// opaque store-assigned identifier at persist time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyId {
    /// A caller-derived name, stable across repeated derivations.
    Name(String),
    /// An opaque store-assigned identifier.
    Assigned(Uuid),
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyId::Name(name) => write!(f, "{name}"),
            KeyId::Assigned(id) => write!(f, "{id}"),
        }
    }
}

/// A hierarchical identifier for an entity.
///
/// A key is the entity's kind plus a local identifier, optionally
/// scoped under a parent key (the ancestor relationship). Keys are
/// immutable value types; two keys are equal when their full ancestor
/// paths are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    kind: String,
    id: KeyId,
    parent: Option<Box<Key>>,
}

impl Key {
    /// Creates a key with a derived name.
    #[must_use]
    pub fn named(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: KeyId::Name(name.into()),
            parent: None,
        }
    }

    /// Creates a key with a freshly assigned opaque identifier.
    #[must_use]
    pub fn assigned(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: KeyId::Assigned(Uuid::new_v4()),
            parent: None,
        }
    }

    /// Scopes this key under a parent key.
    #[must_use]
    pub fn under(mut self, parent: Key) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Returns the entity kind this key addresses.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the local identifier.
    #[must_use]
    pub fn id(&self) -> &KeyId {
        &self.id
    }

    /// Returns the derived name, if this key has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.id {
            KeyId::Name(name) => Some(name),
            KeyId::Assigned(_) => None,
        }
    }

    /// Returns the parent key, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Key> {
        self.parent.as_deref()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{parent}/")?;
        }
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_key_accessors() {
        let key = Key::named("citation", "1234");
        assert_eq!(key.kind(), "citation");
        assert_eq!(key.name(), Some("1234"));
        assert!(key.parent().is_none());
    }

    #[test]
    fn assigned_keys_are_unique() {
        let a = Key::assigned("citation");
        let b = Key::assigned("citation");
        assert_ne!(a, b);
        assert!(a.name().is_none());
    }

    #[test]
    fn named_keys_are_deterministic() {
        assert_eq!(Key::named("region", "eu-de"), Key::named("region", "eu-de"));
        assert_ne!(Key::named("region", "eu-de"), Key::named("region", "eu-fr"));
    }

    #[test]
    fn ancestor_scoping() {
        let parent = Key::named("journal", "nature");
        let child = Key::named("citation", "1234").under(parent.clone());

        assert_eq!(child.parent(), Some(&parent));
        assert_ne!(child, Key::named("citation", "1234"));
    }

    #[test]
    fn display_renders_ancestor_path() {
        let key = Key::named("citation", "1234").under(Key::named("journal", "nature"));
        assert_eq!(key.to_string(), "journal:nature/citation:1234");
    }
}
