//! Kind-indexed schema catalog.

use crate::attribute::Attribute;
use crate::error::{CoreError, CoreResult};
use crate::instance::Instance;
use crate::schema::EntitySchema;
use crate::transform::{Transform, TransformRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// A dispatch table from kind to compiled schema.
///
/// Built once at schema-declaration time and immutable thereafter, so
/// it can be shared freely across threads. Where code holds an
/// instance of unknown provenance - say, a mixed batch of query
/// results - the catalog routes it to the right schema by its kind
/// string.
#[derive(Debug, Default)]
pub struct Catalog {
    schemas: HashMap<String, Arc<EntitySchema>>,
}

impl Catalog {
    /// Starts building a catalog with the built-in transforms
    /// registered.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Looks up the schema for a kind.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKind` if no schema is declared for it.
    pub fn schema(&self, kind: &str) -> CoreResult<&Arc<EntitySchema>> {
        self.schemas
            .get(kind)
            .ok_or_else(|| CoreError::unknown_kind(kind))
    }

    /// Checks whether a kind is declared.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.schemas.contains_key(kind)
    }

    /// Iterates over the declared kinds.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Preprocesses an instance via the schema its kind names.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKind` for undeclared kinds, or the transform
    /// failure.
    pub fn preprocess(&self, instance: Instance) -> CoreResult<Instance> {
        self.schema(instance.kind())?.preprocess(instance)
    }

    /// Postprocesses an instance via the schema its kind names.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKind` for undeclared kinds, or the transform
    /// failure.
    pub fn postprocess(&self, instance: Instance) -> CoreResult<Instance> {
        self.schema(instance.kind())?.postprocess(instance)
    }
}

/// Builder for a [`Catalog`].
///
/// Owns the transform registry while declarations are collected;
/// entities compile eagerly so declaration errors surface here, not at
/// first use.
///
/// ```
/// use kindred_core::{Attribute, Catalog};
///
/// let catalog = Catalog::builder()
///     .entity(
///         "citation",
///         None,
///         vec![
///             Attribute::new("pmid").key_component(),
///             Attribute::new("abstract").text().default(""),
///             Attribute::new("authors").complex(),
///         ],
///     )
///     .unwrap()
///     .build();
/// assert!(catalog.contains("citation"));
/// ```
#[derive(Debug)]
pub struct CatalogBuilder {
    registry: TransformRegistry,
    schemas: HashMap<String, Arc<EntitySchema>>,
}

impl CatalogBuilder {
    fn new() -> Self {
        Self {
            registry: TransformRegistry::with_builtins(),
            schemas: HashMap::new(),
        }
    }

    /// Registers a custom transform for subsequent declarations.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTransform` if the name is already taken.
    pub fn transform(mut self, transform: Transform) -> CoreResult<Self> {
        self.registry.register(transform)?;
        Ok(self)
    }

    /// Declares and compiles an entity.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKind` if the kind is already declared, or any
    /// compilation error (see [`EntitySchema::compile`]).
    pub fn entity(
        mut self,
        kind: &str,
        parent_kind: Option<&str>,
        attributes: Vec<Attribute>,
    ) -> CoreResult<Self> {
        if self.schemas.contains_key(kind) {
            return Err(CoreError::DuplicateKind {
                kind: kind.to_string(),
            });
        }
        let schema = EntitySchema::compile(kind, parent_kind, attributes, &self.registry)?;
        self.schemas.insert(kind.to_string(), Arc::new(schema));
        Ok(self)
    }

    /// Finishes the catalog.
    #[must_use]
    pub fn build(self) -> Catalog {
        Catalog {
            schemas: self.schemas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_codec::Value;
    use kindred_store::Properties;

    fn catalog() -> Catalog {
        Catalog::builder()
            .entity(
                "citation",
                None,
                vec![
                    Attribute::new("pmid").key_component(),
                    Attribute::new("abstract").text().default(""),
                    Attribute::new("authors").complex(),
                ],
            )
            .unwrap()
            .entity("journal", None, vec![Attribute::new("name").key_component()])
            .unwrap()
            .build()
    }

    #[test]
    fn lookup_by_kind() {
        let catalog = catalog();
        assert!(catalog.contains("citation"));
        assert!(catalog.contains("journal"));
        assert!(!catalog.contains("reviewer"));
        assert_eq!(catalog.schema("citation").unwrap().kind(), "citation");
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let catalog = catalog();
        assert!(matches!(
            catalog.schema("reviewer"),
            Err(CoreError::UnknownKind { .. })
        ));
    }

    #[test]
    fn dispatches_processing_by_kind() {
        let catalog = catalog();
        let instance = catalog
            .schema("citation")
            .unwrap()
            .construct(Properties::new().with("abstract", "Lorem"));

        let stored = catalog.preprocess(instance.clone()).unwrap();
        assert_eq!(
            stored.get("abstract"),
            Some(&Value::LongText("Lorem".to_string()))
        );

        let restored = catalog.postprocess(stored).unwrap();
        assert_eq!(restored, instance);
    }

    #[test]
    fn duplicate_kind_is_an_error() {
        let result = Catalog::builder()
            .entity("citation", None, vec![Attribute::new("pmid")])
            .unwrap()
            .entity("citation", None, vec![Attribute::new("pmid")]);
        assert!(matches!(result, Err(CoreError::DuplicateKind { .. })));
    }

    #[test]
    fn custom_transform_is_available_to_entities() {
        let catalog = Catalog::builder()
            .transform(Transform::new(
                "reverse",
                |v| match v {
                    Value::Text(s) => Ok(Value::Text(s.chars().rev().collect())),
                    other => Ok(other),
                },
                |v| match v {
                    Value::Text(s) => Ok(Value::Text(s.chars().rev().collect())),
                    other => Ok(other),
                },
            ))
            .unwrap()
            .entity(
                "note",
                None,
                vec![Attribute::new("body").transform("reverse")],
            )
            .unwrap()
            .build();

        let instance = catalog
            .schema("note")
            .unwrap()
            .construct(Properties::new().with("body", "abc"));
        let stored = catalog.preprocess(instance.clone()).unwrap();
        assert_eq!(stored.get("body"), Some(&Value::Text("cba".to_string())));
        assert_eq!(catalog.postprocess(stored).unwrap(), instance);
    }

    #[test]
    fn declaration_errors_surface_at_build_time() {
        let result = Catalog::builder().entity(
            "note",
            None,
            vec![Attribute::new("body").transform("missing")],
        );
        assert!(matches!(result, Err(CoreError::UnknownTransform { .. })));
    }
}
