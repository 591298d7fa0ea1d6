//! Generated accessor suite.

use crate::error::CoreResult;
use crate::instance::Instance;
use crate::key::derive_key;
use crate::schema::EntitySchema;
use kindred_codec::Value;
use kindred_store::{DocumentStore, Key, Operator, Properties, Query};
use std::sync::Arc;
use tracing::debug;

/// Per-entity accessor suite over a document store.
///
/// A dataset binds one compiled schema to one store and exposes the
/// create/find/update/delete surface for that kind. Every operation
/// performs at most one store round trip and returns once it
/// completes; there is no caching, no background work, and no retry -
/// store failures surface synchronously and unmodified.
///
/// # Example
///
/// ```rust,ignore
/// let citations = Dataset::new(catalog.schema("citation")?.clone(), store);
///
/// let created = citations.create(
///     None,
///     Properties::new().with("pmid", "1234").with("year", 2010),
/// )?;
///
/// for citation in citations.find_all_by("year", 2010)? {
///     println!("{:?}", citation.get("journal"));
/// }
/// ```
pub struct Dataset<S: DocumentStore> {
    schema: Arc<EntitySchema>,
    store: Arc<S>,
}

impl<S: DocumentStore> Dataset<S> {
    /// Creates a dataset binding a schema to a store.
    pub fn new(schema: Arc<EntitySchema>, store: Arc<S>) -> Self {
        Self { schema, store }
    }

    /// The schema this dataset operates on.
    #[must_use]
    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Creates and persists an entity.
    ///
    /// Merges `overrides` onto the schema defaults, derives the
    /// natural key (scoped under `parent` when supplied) if the schema
    /// declares key components, preprocesses, and puts. Creating the
    /// same natural key twice is an upsert.
    ///
    /// Returns the postprocessed form of what was actually stored -
    /// the same logical values a subsequent read returns, not the
    /// pre-transform input.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteKey` when a key-component attribute is
    /// absent, a transform failure, or a store failure.
    pub fn create(&self, parent: Option<&Key>, overrides: Properties) -> CoreResult<Instance> {
        let instance = self.schema.construct(overrides);
        let derived = derive_key(&self.schema, parent, instance.properties())?;

        let stored = self.schema.preprocess(instance)?;
        let key = self
            .store
            .put(self.schema.kind(), derived, stored.properties().clone())?;
        debug!(kind = self.schema.kind(), key = %key, "created entity");

        Ok(self.schema.postprocess(stored)?.with_key(key))
    }

    /// Fetches and postprocesses the entity stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (via the store) when no entity exists for
    /// the key.
    pub fn get(&self, key: &Key) -> CoreResult<Instance> {
        let properties = self.store.get(key)?;
        let instance = Instance::new(self.schema.kind(), properties).with_key(key.clone());
        self.schema.postprocess(instance)
    }

    /// Returns all entities of this kind, postprocessed.
    ///
    /// The result is a finite consuming iterator materialized from a
    /// single store round trip.
    ///
    /// # Errors
    ///
    /// Returns a store failure or a postprocess failure.
    pub fn find_all(&self) -> CoreResult<impl Iterator<Item = Instance>> {
        self.run(Query::new(self.schema.kind()))
    }

    /// Returns all entities whose `property` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns a store failure or a postprocess failure.
    pub fn find_all_by(
        &self,
        property: &str,
        value: impl Into<Value>,
    ) -> CoreResult<impl Iterator<Item = Instance>> {
        self.find_all_where(property, Operator::Equal, value)
    }

    /// Returns all entities matching `property <operator> value`.
    ///
    /// # Errors
    ///
    /// Returns a store failure or a postprocess failure.
    pub fn find_all_where(
        &self,
        property: &str,
        operator: Operator,
        value: impl Into<Value>,
    ) -> CoreResult<impl Iterator<Item = Instance>> {
        self.run(Query::new(self.schema.kind()).filter(property, operator, value))
    }

    /// Returns the first entity whose `property` equals `value`, or
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns a store failure or a postprocess failure.
    pub fn find_first_by(
        &self,
        property: &str,
        value: impl Into<Value>,
    ) -> CoreResult<Option<Instance>> {
        self.find_first_where(property, Operator::Equal, value)
    }

    /// Returns the first entity matching `property <operator> value`,
    /// or `None`.
    ///
    /// The query itself is unlimited; "first" is taken on the caller
    /// side.
    ///
    /// # Errors
    ///
    /// Returns a store failure or a postprocess failure.
    pub fn find_first_where(
        &self,
        property: &str,
        operator: Operator,
        value: impl Into<Value>,
    ) -> CoreResult<Option<Instance>> {
        Ok(self.find_all_where(property, operator, value)?.next())
    }

    /// Replaces the properties stored under `key`.
    ///
    /// The properties are handed to the store exactly as given - no
    /// transforms are applied, unlike [`create`](Self::create).
    /// Callers that need the stored form should run
    /// `schema().preprocess` themselves first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (via the store) when no entity exists for
    /// the key.
    pub fn update(&self, key: &Key, properties: Properties) -> CoreResult<()> {
        self.store.update(key, properties)?;
        debug!(kind = self.schema.kind(), key = %key, "updated entity");
        Ok(())
    }

    /// Deletes the entities stored under one or more keys.
    ///
    /// # Errors
    ///
    /// Returns a store failure; absent keys are not an error.
    pub fn delete(&self, keys: &[Key]) -> CoreResult<()> {
        for key in keys {
            self.store.delete(key)?;
        }
        debug!(kind = self.schema.kind(), count = keys.len(), "deleted entities");
        Ok(())
    }

    fn run(&self, query: Query) -> CoreResult<impl Iterator<Item = Instance>> {
        let results = self.store.run_query(&query)?;
        debug!(
            kind = self.schema.kind(),
            filters = query.filters().len(),
            results = results.len(),
            "ran query"
        );

        let mut instances = Vec::with_capacity(results.len());
        for (key, properties) in results {
            let instance = Instance::new(self.schema.kind(), properties).with_key(key);
            instances.push(self.schema.postprocess(instance)?);
        }
        Ok(instances.into_iter())
    }
}
