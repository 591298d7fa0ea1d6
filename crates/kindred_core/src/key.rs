//! Natural key derivation.

use crate::error::{CoreError, CoreResult};
use crate::schema::EntitySchema;
use kindred_codec::Value;
use kindred_store::{Key, Properties};

/// Separator joining key-component values in a derived key name.
pub const KEY_SEPARATOR: char = '-';

/// Derives an entity's natural key from its key-component attributes.
///
/// Returns `None` when the schema declares no key components - the
/// store assigns an opaque key at persist time instead. Otherwise the
/// components' string forms are joined with [`KEY_SEPARATOR`] in
/// declaration order and scoped under `parent` when one is supplied.
/// The result is deterministic: equal inputs always derive equal keys,
/// which makes creates by natural key idempotent upserts.
///
/// # Errors
///
/// - `IncompleteKey` when a declared key-component attribute is absent
///   or null
/// - `InvalidKeyComponent` when a key-component value is not a scalar
pub fn derive_key(
    schema: &EntitySchema,
    parent: Option<&Key>,
    properties: &Properties,
) -> CoreResult<Option<Key>> {
    let components: Vec<_> = schema
        .attributes()
        .iter()
        .filter(|a| a.key_component)
        .collect();

    if components.is_empty() {
        return Ok(None);
    }

    let mut parts = Vec::with_capacity(components.len());
    for attribute in components {
        let value = properties
            .get(&attribute.name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| CoreError::incomplete_key(schema.kind(), &attribute.name))?;
        parts.push(component_string(schema.kind(), &attribute.name, value)?);
    }

    let name = parts.join(&KEY_SEPARATOR.to_string());
    let key = Key::named(schema.kind(), name);
    Ok(Some(match parent {
        Some(parent) => key.under(parent.clone()),
        None => key,
    }))
}

/// Renders a scalar key-component value as its key string form.
fn component_string(kind: &str, attribute: &str, value: &Value) -> CoreResult<String> {
    match value {
        Value::Text(s) | Value::LongText(s) => Ok(s.clone()),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Float(f) => Ok(format!("{f:?}")),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Map(_) => Err(CoreError::InvalidKeyComponent {
            kind: kind.to_string(),
            attribute: attribute.to_string(),
        }),
    }
}
