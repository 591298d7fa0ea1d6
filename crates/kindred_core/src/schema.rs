//! Schema compilation.

use crate::attribute::Attribute;
use crate::error::{CoreError, CoreResult};
use crate::instance::Instance;
use crate::transform::{Transform, TransformRegistry};
use kindred_codec::Value;
use kindred_store::Properties;
use std::collections::HashSet;
use std::sync::Arc;

/// Attribute names every entity owns implicitly.
const RESERVED_NAMES: &[&str] = &["kind", "key"];

/// An attribute with its transform reference resolved.
#[derive(Debug, Clone)]
pub(crate) struct CompiledAttribute {
    pub(crate) name: String,
    pub(crate) key_component: bool,
    pub(crate) default: Option<Value>,
    pub(crate) transform: Option<Arc<Transform>>,
}

/// A compiled entity definition.
///
/// Created once at schema-declaration time and immutable thereafter;
/// shared behind `Arc` by catalogs and datasets. Compilation resolves
/// every transform reference eagerly, so a schema that compiled will
/// never fail a transform lookup at use time.
#[derive(Debug)]
pub struct EntitySchema {
    kind: String,
    parent_kind: Option<String>,
    attributes: Vec<CompiledAttribute>,
}

impl EntitySchema {
    /// Compiles an entity declaration against a transform registry.
    ///
    /// # Errors
    ///
    /// Fails fast on: an empty attribute list, duplicate or reserved
    /// attribute names, or a transform reference that is not
    /// registered.
    pub fn compile(
        kind: impl Into<String>,
        parent_kind: Option<&str>,
        attributes: Vec<Attribute>,
        registry: &TransformRegistry,
    ) -> CoreResult<Self> {
        let kind = kind.into();

        if attributes.is_empty() {
            return Err(CoreError::NoAttributes { kind });
        }

        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(attributes.len());

        for attribute in attributes {
            let name = attribute.name().to_string();

            if RESERVED_NAMES.contains(&name.as_str()) {
                return Err(CoreError::ReservedAttribute { kind: kind.clone(), name });
            }
            if !seen.insert(name.clone()) {
                return Err(CoreError::DuplicateAttribute { kind: kind.clone(), name });
            }

            let transform = match attribute.transform_name() {
                Some(transform_name) => Some(registry.lookup(transform_name)?),
                None => None,
            };

            compiled.push(CompiledAttribute {
                name,
                key_component: attribute.is_key_component(),
                default: attribute.default_value().cloned(),
                transform,
            });
        }

        Ok(Self {
            kind,
            parent_kind: parent_kind.map(str::to_string),
            attributes: compiled,
        })
    }

    /// The entity kind this schema defines.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The declared parent kind, if any.
    #[must_use]
    pub fn parent_kind(&self) -> Option<&str> {
        self.parent_kind.as_deref()
    }

    /// Declared attribute names, in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Whether any attribute contributes to the derived key.
    #[must_use]
    pub fn has_key_components(&self) -> bool {
        self.attributes.iter().any(|a| a.key_component)
    }

    pub(crate) fn attributes(&self) -> &[CompiledAttribute] {
        &self.attributes
    }

    /// Creates a blank instance: every declared attribute present and
    /// null, except those with a declared default.
    #[must_use]
    pub fn blank(&self) -> Instance {
        let mut properties = Properties::new();
        for attribute in &self.attributes {
            let value = attribute.default.clone().unwrap_or(Value::Null);
            properties.set(attribute.name.clone(), value);
        }
        Instance::new(self.kind.clone(), properties)
    }

    /// Creates an instance from the blank defaults overlaid with
    /// `overrides`.
    ///
    /// The overlay wins for any shared name. Override names outside
    /// the schema are preserved as given rather than rejected; they
    /// flow through persist and load untouched by transforms.
    #[must_use]
    pub fn construct(&self, overrides: Properties) -> Instance {
        let blank = self.blank().into_properties();
        Instance::new(self.kind.clone(), blank.merged(&overrides))
    }

    /// Applies every attribute transform's pre-persist function,
    /// producing the stored form of an instance.
    ///
    /// Transforms are invoked for null values too; properties without
    /// a transform, and properties the schema does not declare, pass
    /// through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the first transform failure.
    pub fn preprocess(&self, instance: Instance) -> CoreResult<Instance> {
        self.apply(instance, Transform::pre)
    }

    /// Applies every attribute transform's post-load function,
    /// restoring the logical form of an instance.
    ///
    /// # Errors
    ///
    /// Propagates the first transform failure, including
    /// deserialization errors from malformed stored text.
    pub fn postprocess(&self, instance: Instance) -> CoreResult<Instance> {
        self.apply(instance, Transform::post)
    }

    fn apply(
        &self,
        instance: Instance,
        direction: impl Fn(&Transform, Value) -> CoreResult<Value>,
    ) -> CoreResult<Instance> {
        instance.map_properties(|mut properties| {
            for attribute in &self.attributes {
                if let Some(transform) = &attribute.transform {
                    if let Some(value) = properties.get(&attribute.name) {
                        let transformed = direction(transform.as_ref(), value.clone())?;
                        properties.set(attribute.name.clone(), transformed);
                    }
                }
            }
            Ok(properties)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation_schema() -> EntitySchema {
        let registry = TransformRegistry::with_builtins();
        EntitySchema::compile(
            "citation",
            None,
            vec![
                Attribute::new("pmid").key_component(),
                Attribute::new("abstract").text().default(""),
                Attribute::new("volume"),
                Attribute::new("issue"),
                Attribute::new("year"),
                Attribute::new("month"),
                Attribute::new("pages"),
                Attribute::new("journal"),
                Attribute::new("journal-abbrev"),
                Attribute::new("authors").complex(),
            ],
            &registry,
        )
        .unwrap()
    }

    #[test]
    fn compile_records_declaration_order() {
        let schema = citation_schema();
        assert_eq!(schema.kind(), "citation");
        assert_eq!(
            schema.attribute_names().collect::<Vec<_>>(),
            vec![
                "pmid",
                "abstract",
                "volume",
                "issue",
                "year",
                "month",
                "pages",
                "journal",
                "journal-abbrev",
                "authors"
            ]
        );
        assert!(schema.has_key_components());
    }

    #[test]
    fn compile_rejects_unknown_transform() {
        let registry = TransformRegistry::with_builtins();
        let result = EntitySchema::compile(
            "citation",
            None,
            vec![Attribute::new("field").transform("does-not-exist")],
            &registry,
        );
        assert!(matches!(result, Err(CoreError::UnknownTransform { .. })));
    }

    #[test]
    fn compile_rejects_duplicate_attribute() {
        let registry = TransformRegistry::with_builtins();
        let result = EntitySchema::compile(
            "citation",
            None,
            vec![Attribute::new("year"), Attribute::new("year")],
            &registry,
        );
        assert!(matches!(result, Err(CoreError::DuplicateAttribute { .. })));
    }

    #[test]
    fn compile_rejects_reserved_names() {
        let registry = TransformRegistry::with_builtins();
        for reserved in ["kind", "key"] {
            let result = EntitySchema::compile(
                "citation",
                None,
                vec![Attribute::new(reserved)],
                &registry,
            );
            assert!(matches!(result, Err(CoreError::ReservedAttribute { .. })));
        }
    }

    #[test]
    fn compile_rejects_empty_attribute_list() {
        let registry = TransformRegistry::with_builtins();
        let result = EntitySchema::compile("citation", None, vec![], &registry);
        assert!(matches!(result, Err(CoreError::NoAttributes { .. })));
    }

    #[test]
    fn blank_uses_defaults() {
        let schema = citation_schema();
        let blank = schema.blank();

        assert_eq!(blank.get("abstract"), Some(&Value::Text(String::new())));
        for name in [
            "pmid", "volume", "issue", "year", "month", "pages", "journal", "journal-abbrev",
            "authors",
        ] {
            assert_eq!(blank.get(name), Some(&Value::Null), "attribute {name}");
        }
    }

    #[test]
    fn construct_with_empty_overrides_equals_blank() {
        let schema = citation_schema();
        assert_eq!(schema.construct(Properties::new()), schema.blank());
    }

    #[test]
    fn construct_overlays_exactly_the_overrides() {
        let schema = citation_schema();
        let instance = schema.construct(
            Properties::new()
                .with("abstract", "Lorem ipsum")
                .with("authors", vec!["Joe", "Jim", "Bob"])
                .with("year", 2010),
        );

        assert_eq!(
            instance.get("abstract"),
            Some(&Value::Text("Lorem ipsum".to_string()))
        );
        assert_eq!(instance.get("year"), Some(&Value::Integer(2010)));
        assert_eq!(
            instance.get("authors"),
            Some(&Value::from(vec!["Joe", "Jim", "Bob"]))
        );
        assert_eq!(instance.get("pmid"), Some(&Value::Null));
        assert_eq!(instance.get("journal"), Some(&Value::Null));
    }

    #[test]
    fn construct_preserves_unknown_overrides() {
        let schema = citation_schema();
        let instance = schema.construct(Properties::new().with("annotation", "keeper"));
        assert_eq!(
            instance.get("annotation"),
            Some(&Value::Text("keeper".to_string()))
        );
    }

    #[test]
    fn preprocess_transforms_declared_attributes() {
        let schema = citation_schema();
        let instance = schema.construct(
            Properties::new()
                .with("abstract", "Lorem ipsum")
                .with("authors", vec!["Joe", "Jim", "Bob"])
                .with("year", 2010),
        );

        let stored = schema.preprocess(instance).unwrap();
        assert_eq!(
            stored.get("abstract"),
            Some(&Value::LongText("Lorem ipsum".to_string()))
        );
        assert_eq!(
            stored.get("authors"),
            Some(&Value::Text("[\"Joe\",\"Jim\",\"Bob\"]".to_string()))
        );
        // Untransformed attributes are untouched.
        assert_eq!(stored.get("year"), Some(&Value::Integer(2010)));
    }

    #[test]
    fn postprocess_inverts_preprocess() {
        let schema = citation_schema();
        let instance = schema.construct(
            Properties::new()
                .with("abstract", "Lorem ipsum")
                .with("authors", vec!["Joe", "Jim", "Bob"])
                .with("year", 2010),
        );

        let roundtripped = schema
            .postprocess(schema.preprocess(instance.clone()).unwrap())
            .unwrap();
        assert_eq!(roundtripped, instance);
    }

    #[test]
    fn roundtrip_holds_for_blank_instances() {
        let schema = citation_schema();
        let blank = schema.blank();
        let roundtripped = schema
            .postprocess(schema.preprocess(blank.clone()).unwrap())
            .unwrap();
        assert_eq!(roundtripped, blank);
    }

    #[test]
    fn postprocess_rejects_malformed_stored_text() {
        let schema = citation_schema();
        let stored = Instance::new(
            "citation",
            Properties::new().with("authors", "[\"Joe\","),
        );
        let result = schema.postprocess(stored);
        assert!(matches!(result, Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn parent_kind_is_recorded() {
        let registry = TransformRegistry::with_builtins();
        let schema = EntitySchema::compile(
            "citation",
            Some("journal"),
            vec![Attribute::new("pmid")],
            &registry,
        )
        .unwrap();
        assert_eq!(schema.parent_kind(), Some("journal"));
    }
}
