//! Typed entity data trait.

use crate::error::CoreResult;
use kindred_store::Properties;

/// Trait for statically shaped types that map to entity properties.
///
/// Implementing this lets a plain struct ride the same
/// default-merging, transform, and accessor pipeline as dynamically
/// built property maps: `to_properties` feeds
/// [`crate::EntitySchema::construct`] and the dataset operations,
/// while [`crate::Instance::data`] decodes results back.
///
/// # Example
///
/// ```rust,ignore
/// struct Citation {
///     pmid: String,
///     year: i64,
/// }
///
/// impl EntityData for Citation {
///     fn to_properties(&self) -> Properties {
///         Properties::new()
///             .with("pmid", self.pmid.clone())
///             .with("year", self.year)
///     }
///
///     fn from_properties(properties: &Properties) -> CoreResult<Self> {
///         // ... read fields out of the map
///     }
/// }
/// ```
pub trait EntityData: Sized {
    /// Encodes this value as an ordered property map.
    fn to_properties(&self) -> Properties;

    /// Decodes a value from an ordered property map.
    ///
    /// # Errors
    ///
    /// Returns an error if required properties are missing or have the
    /// wrong shape.
    fn from_properties(properties: &Properties) -> CoreResult<Self>;
}
