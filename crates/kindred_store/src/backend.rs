//! Document-store trait definition.

use crate::error::StoreResult;
use crate::key::Key;
use crate::properties::Properties;
use crate::query::Query;

/// A kind-tagged document store for Kindred.
///
/// Document stores are **opaque property stores**. They persist
/// property maps under hierarchical keys and answer kind-scoped
/// queries. The entity-mapping layer owns all schema interpretation -
/// stores never see defaults, transforms, or key derivation.
///
/// # Invariants
///
/// - `put` is an upsert; it returns the key the entity is stored under,
///   assigning an opaque one when the caller supplies none
/// - `get` returns exactly the properties previously stored for that key
/// - `update` replaces the properties of an existing entity and fails
///   when the key is absent
/// - `delete` is idempotent: deleting an absent key succeeds
/// - `run_query` performs a single round trip; filters are conjunctive
///   and sorts apply in declaration order
/// - Stores must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - reference implementation for tests and
///   ephemeral use
pub trait DocumentStore: Send + Sync {
    /// Stores `properties` under `key`, or under a newly assigned key
    /// when `key` is `None`. Returns the effective key.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplied key's kind differs from `kind`,
    /// or on a backend failure.
    fn put(&self, kind: &str, key: Option<Key>, properties: Properties) -> StoreResult<Key>;

    /// Fetches the properties stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entity exists for the key.
    fn get(&self, key: &Key) -> StoreResult<Properties>;

    /// Replaces the properties of the entity stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entity exists for the key.
    fn update(&self, key: &Key, properties: Properties) -> StoreResult<()>;

    /// Removes the entity stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error only on a backend failure; absent keys are not
    /// an error.
    fn delete(&self, key: &Key) -> StoreResult<()>;

    /// Runs a kind-scoped query and returns the matching entities with
    /// their keys, filtered and sorted per the query specification.
    ///
    /// # Errors
    ///
    /// Returns an error on a backend failure.
    fn run_query(&self, query: &Query) -> StoreResult<Vec<(Key, Properties)>>;
}
