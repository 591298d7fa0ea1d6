//! Property transforms and their registry.
//!
//! A transform is a named pair of inverse functions applied to a
//! property value on its way into (`pre`) and out of (`post`) the
//! store. Every transform must obey the round-trip law:
//! `post(pre(v))` is observably equal to `v` for all values it accepts.

use crate::error::{CoreError, CoreResult};
use kindred_codec::{from_text, to_text, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name of the built-in serialization transform.
pub const SERIALIZE: &str = "serialize";

/// Name of the built-in long-text transform.
pub const LONG_TEXT: &str = "long-text";

/// A property transform function.
pub type TransformFn = Arc<dyn Fn(Value) -> CoreResult<Value> + Send + Sync>;

/// A named pair of inverse pre-persist/post-load functions.
///
/// Transforms are immutable once constructed and shared behind `Arc`
/// by every schema that references them. There is no implicit
/// nil-guard: `pre` and `post` are invoked for `Null` values too, and
/// a transform that cannot handle `Null` is the transform author's
/// bug.
#[derive(Clone)]
pub struct Transform {
    name: String,
    pre: TransformFn,
    post: TransformFn,
}

impl Transform {
    /// Creates a transform from a name and a pre/post function pair.
    pub fn new<F, G>(name: impl Into<String>, pre: F, post: G) -> Self
    where
        F: Fn(Value) -> CoreResult<Value> + Send + Sync + 'static,
        G: Fn(Value) -> CoreResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            pre: Arc::new(pre),
            post: Arc::new(post),
        }
    }

    /// The transform's registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the pre-persist function.
    pub fn pre(&self, value: Value) -> CoreResult<Value> {
        (self.pre)(value)
    }

    /// Applies the post-load function.
    pub fn post(&self, value: Value) -> CoreResult<Value> {
        (self.post)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The built-in serialization transform.
///
/// `pre` renders any value to its canonical textual form; `post`
/// parses that text back. Malformed stored text is a deserialization
/// error, never a partial value.
#[must_use]
pub fn serialize() -> Transform {
    Transform::new(
        SERIALIZE,
        |value| {
            let text = to_text(&value)
                .map_err(|e| CoreError::transform_input(SERIALIZE, e.to_string()))?;
            Ok(Value::Text(text))
        },
        |value| match value {
            Value::Text(s) | Value::LongText(s) => Ok(from_text(&s)?),
            other => Err(CoreError::transform_input(
                SERIALIZE,
                format!("expected stored text, got {other:?}"),
            )),
        },
    )
}

/// The built-in long-text transform.
///
/// `pre` wraps an indexed text value as unindexed long text; `post`
/// unwraps it. `Null` passes through unchanged in both directions.
/// Values exceeding the store's indexed-field size limit must use this
/// transform; nothing enforces that automatically - it is the schema
/// author's responsibility.
#[must_use]
pub fn long_text() -> Transform {
    Transform::new(
        LONG_TEXT,
        |value| match value {
            Value::Null => Ok(Value::Null),
            Value::Text(s) => Ok(Value::LongText(s)),
            other => Err(CoreError::transform_input(
                LONG_TEXT,
                format!("expected text, got {other:?}"),
            )),
        },
        |value| match value {
            Value::Null => Ok(Value::Null),
            Value::LongText(s) => Ok(Value::Text(s)),
            other => Err(CoreError::transform_input(
                LONG_TEXT,
                format!("expected stored long text, got {other:?}"),
            )),
        },
    )
}

/// A registry of named transforms.
///
/// Populated once at schema-declaration time; schema compilation
/// resolves transform references against it, so lookups never happen
/// on the hot path.
#[derive(Debug, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Arc<Transform>>,
}

impl TransformRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in transforms registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Built-in names cannot collide in a fresh registry.
        registry.register(serialize()).expect("fresh registry");
        registry.register(long_text()).expect("fresh registry");
        registry
    }

    /// Registers a transform.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTransform` if the name is already taken.
    pub fn register(&mut self, transform: Transform) -> CoreResult<()> {
        let name = transform.name().to_string();
        if self.transforms.contains_key(&name) {
            return Err(CoreError::duplicate_transform(name));
        }
        self.transforms.insert(name, Arc::new(transform));
        Ok(())
    }

    /// Looks up a transform by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTransform` if no transform has that name.
    pub fn lookup(&self, name: &str) -> CoreResult<Arc<Transform>> {
        self.transforms
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::unknown_transform(name))
    }

    /// Checks whether a transform name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }
}
