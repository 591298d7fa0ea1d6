//! Ordered property maps.

use kindred_codec::Value;

/// An ordered mapping from property name to value.
///
/// Insertion order is preserved; setting an existing name replaces its
/// value in place. This is the internal shape of every entity instance
/// regardless of how it is exposed publicly, so a single merge
/// algorithm serves dynamically built maps and typed structs alike.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties {
    entries: Vec<(String, Value)>,
}

impl Properties {
    /// Creates an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a property name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Checks whether a property name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Sets a property, replacing in place if the name exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterates over property names in stored order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Merges an overlay into this map, overlay winning.
    ///
    /// Names present in both keep this map's position but take the
    /// overlay's value; names only in the overlay are appended in
    /// overlay order. Overlay names this map has never seen are kept
    /// as-is rather than rejected.
    #[must_use]
    pub fn merged(&self, overlay: &Properties) -> Properties {
        let mut result = self.clone();
        for (name, value) in overlay.iter() {
            result.set(name, value.clone());
        }
        result
    }

    /// Consumes the map, returning its entries in stored order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl From<Vec<(String, Value)>> for Properties {
    fn from(entries: Vec<(String, Value)>) -> Self {
        let mut map = Properties::new();
        for (name, value) in entries {
            map.set(name, value);
        }
        map
    }
}

impl FromIterator<(String, Value)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Properties::new();
        for (name, value) in iter {
            map.set(name, value);
        }
        map
    }
}

impl IntoIterator for Properties {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
