//! In-memory document store.

use crate::backend::DocumentStore;
use crate::error::{StoreError, StoreResult};
use crate::key::Key;
use crate::properties::Properties;
use crate::query::{compare_values, Direction, Query};
use parking_lot::RwLock;
use std::cmp::Ordering;

/// An in-memory document store.
///
/// This store keeps all entities in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral data that doesn't need persistence
///
/// Entities are held in insertion order, which is also the order
/// unsorted queries return them in.
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use kindred_store::{DocumentStore, InMemoryStore, Key, Properties};
///
/// let store = InMemoryStore::new();
/// let props = Properties::new().with("name", "Alice");
/// let key = store.put("person", Some(Key::named("person", "alice")), props).unwrap();
/// assert_eq!(store.get(&key).unwrap().get("name").unwrap().as_text(), Some("Alice"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entities: RwLock<Vec<(Key, Properties)>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entities across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Checks whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    /// Clears all entities.
    pub fn clear(&self) {
        self.entities.write().clear();
    }
}

impl DocumentStore for InMemoryStore {
    fn put(&self, kind: &str, key: Option<Key>, properties: Properties) -> StoreResult<Key> {
        let key = match key {
            Some(key) => {
                if key.kind() != kind {
                    return Err(StoreError::kind_mismatch(kind, &key));
                }
                key
            }
            None => Key::assigned(kind),
        };

        let mut entities = self.entities.write();
        match entities.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = properties,
            None => entities.push((key.clone(), properties)),
        }
        Ok(key)
    }

    fn get(&self, key: &Key) -> StoreResult<Properties> {
        self.entities
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, props)| props.clone())
            .ok_or_else(|| StoreError::not_found(key))
    }

    fn update(&self, key: &Key, properties: Properties) -> StoreResult<()> {
        let mut entities = self.entities.write();
        match entities.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => {
                entry.1 = properties;
                Ok(())
            }
            None => Err(StoreError::not_found(key)),
        }
    }

    fn delete(&self, key: &Key) -> StoreResult<()> {
        self.entities.write().retain(|(k, _)| k != key);
        Ok(())
    }

    fn run_query(&self, query: &Query) -> StoreResult<Vec<(Key, Properties)>> {
        let entities = self.entities.read();
        let mut results: Vec<(Key, Properties)> = entities
            .iter()
            .filter(|(key, props)| {
                key.kind() == query.kind()
                    && query.filters().iter().all(|filter| {
                        props
                            .get(&filter.property)
                            .is_some_and(|stored| filter.matches(stored))
                    })
            })
            .cloned()
            .collect();

        for sort in query.sorts().iter().rev() {
            results.sort_by(|(_, a), (_, b)| {
                let ordering = match (a.get(&sort.property), b.get(&sort.property)) {
                    (Some(av), Some(bv)) => compare_values(av, bv).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                };
                match sort.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Operator;
    use kindred_codec::Value;

    fn person(name: &str, age: i64) -> Properties {
        Properties::new().with("name", name).with("age", age)
    }

    #[test]
    fn put_and_get() {
        let store = InMemoryStore::new();
        let key = store
            .put("person", Some(Key::named("person", "alice")), person("Alice", 30))
            .unwrap();

        let props = store.get(&key).unwrap();
        assert_eq!(props.get("name"), Some(&Value::Text("Alice".to_string())));
    }

    #[test]
    fn put_without_key_assigns_one() {
        let store = InMemoryStore::new();
        let key = store.put("person", None, person("Bob", 25)).unwrap();

        assert_eq!(key.kind(), "person");
        assert!(key.name().is_none());
        assert!(store.get(&key).is_ok());
    }

    #[test]
    fn put_is_upsert() {
        let store = InMemoryStore::new();
        let key = Key::named("person", "alice");

        store
            .put("person", Some(key.clone()), person("Alice", 30))
            .unwrap();
        store
            .put("person", Some(key.clone()), person("Alice", 31))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&key).unwrap().get("age"),
            Some(&Value::Integer(31))
        );
    }

    #[test]
    fn put_rejects_kind_mismatch() {
        let store = InMemoryStore::new();
        let result = store.put("person", Some(Key::named("animal", "rex")), Properties::new());
        assert!(matches!(result, Err(StoreError::KindMismatch { .. })));
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.get(&Key::named("person", "nobody"));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn update_replaces_existing() {
        let store = InMemoryStore::new();
        let key = store
            .put("person", Some(Key::named("person", "alice")), person("Alice", 30))
            .unwrap();

        store.update(&key, person("Alice", 99)).unwrap();
        assert_eq!(
            store.get(&key).unwrap().get("age"),
            Some(&Value::Integer(99))
        );
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.update(&Key::named("person", "nobody"), Properties::new());
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn delete_is_idempotent() {
        let store = InMemoryStore::new();
        let key = store
            .put("person", Some(Key::named("person", "alice")), person("Alice", 30))
            .unwrap();

        store.delete(&key).unwrap();
        assert!(store.get(&key).is_err());
        // Deleting again succeeds.
        store.delete(&key).unwrap();
    }

    #[test]
    fn query_scopes_by_kind() {
        let store = InMemoryStore::new();
        store.put("person", None, person("Alice", 30)).unwrap();
        store
            .put("animal", None, Properties::new().with("name", "Rex"))
            .unwrap();

        let results = store.run_query(&Query::new("person")).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.kind(), "person");
    }

    #[test]
    fn query_filters_conjunctively() {
        let store = InMemoryStore::new();
        store.put("person", None, person("Alice", 30)).unwrap();
        store.put("person", None, person("Bob", 30)).unwrap();
        store.put("person", None, person("Carol", 40)).unwrap();

        let query = Query::new("person")
            .filter("age", Operator::Equal, 30)
            .filter("name", Operator::NotEqual, "Bob");
        let results = store.run_query(&query).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].1.get("name"),
            Some(&Value::Text("Alice".to_string()))
        );
    }

    #[test]
    fn query_missing_property_never_matches() {
        let store = InMemoryStore::new();
        store
            .put("person", None, Properties::new().with("name", "NoAge"))
            .unwrap();

        let query = Query::new("person").filter("age", Operator::NotEqual, 30);
        assert!(store.run_query(&query).unwrap().is_empty());
    }

    #[test]
    fn query_in_operator() {
        let store = InMemoryStore::new();
        store.put("person", None, person("Alice", 30)).unwrap();
        store.put("person", None, person("Bob", 25)).unwrap();
        store.put("person", None, person("Carol", 40)).unwrap();

        let query = Query::new("person").filter("age", Operator::In, vec![25, 40]);
        assert_eq!(store.run_query(&query).unwrap().len(), 2);
    }

    #[test]
    fn query_sorts() {
        let store = InMemoryStore::new();
        store.put("person", None, person("Alice", 30)).unwrap();
        store.put("person", None, person("Bob", 25)).unwrap();
        store.put("person", None, person("Carol", 40)).unwrap();

        let query = Query::new("person").sort("age", Direction::Descending);
        let results = store.run_query(&query).unwrap();
        let ages: Vec<i64> = results
            .iter()
            .map(|(_, p)| p.get("age").unwrap().as_integer().unwrap())
            .collect();
        assert_eq!(ages, vec![40, 30, 25]);
    }

    #[test]
    fn query_multi_level_sort_is_stable() {
        let store = InMemoryStore::new();
        store.put("person", None, person("Bob", 30)).unwrap();
        store.put("person", None, person("Alice", 30)).unwrap();
        store.put("person", None, person("Carol", 25)).unwrap();

        let query = Query::new("person")
            .sort("age", Direction::Ascending)
            .sort("name", Direction::Ascending);
        let results = store.run_query(&query).unwrap();
        let names: Vec<&str> = results
            .iter()
            .map(|(_, p)| p.get("name").unwrap().as_text().unwrap())
            .collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }

    #[test]
    fn unsorted_query_preserves_insertion_order() {
        let store = InMemoryStore::new();
        store.put("person", None, person("First", 1)).unwrap();
        store.put("person", None, person("Second", 2)).unwrap();

        let results = store.run_query(&Query::new("person")).unwrap();
        assert_eq!(
            results[0].1.get("name"),
            Some(&Value::Text("First".to_string()))
        );
    }

    #[test]
    fn ancestor_scoped_keys_are_distinct() {
        let store = InMemoryStore::new();
        let parent = Key::named("journal", "nature");
        let scoped = Key::named("citation", "1").under(parent);
        let unscoped = Key::named("citation", "1");

        store
            .put("citation", Some(scoped.clone()), Properties::new().with("n", 1))
            .unwrap();
        store
            .put("citation", Some(unscoped.clone()), Properties::new().with("n", 2))
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&scoped).unwrap().get("n"), Some(&Value::Integer(1)));
        assert_eq!(
            store.get(&unscoped).unwrap().get("n"),
            Some(&Value::Integer(2))
        );
    }

    #[test]
    fn clear_removes_everything() {
        let store = InMemoryStore::new();
        store.put("person", None, person("Alice", 30)).unwrap();
        assert!(!store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }
}
