//! # Kindred Core
//!
//! Entity definition and transform engine for Kindred.
//!
//! Declare a typed entity schema once and get, for free: a
//! default-valued constructor, bidirectional property transforms
//! (preprocess before persist, postprocess after load), natural-key
//! derivation from key-component attributes, and a generated
//! create/find/update/delete accessor suite over any
//! [`kindred_store::DocumentStore`].
//!
//! This crate provides:
//! - [`TransformRegistry`] with the built-in `serialize` and
//!   `long-text` transforms
//! - [`EntitySchema`] compilation with fail-fast validation
//! - [`derive_key`] for deterministic, optionally ancestor-scoped
//!   natural keys
//! - [`Catalog`] for kind-string dispatch over compiled schemas
//! - [`Dataset`] accessor suites binding a schema to a store
//!
//! ## Example
//!
//! ```
//! use kindred_core::{Attribute, Catalog, Dataset};
//! use kindred_store::{InMemoryStore, Properties};
//! use std::sync::Arc;
//!
//! let catalog = Catalog::builder()
//!     .entity(
//!         "citation",
//!         None,
//!         vec![
//!             Attribute::new("pmid").key_component(),
//!             Attribute::new("abstract").text().default(""),
//!             Attribute::new("year"),
//!             Attribute::new("authors").complex(),
//!         ],
//!     )
//!     .unwrap()
//!     .build();
//!
//! let citations = Dataset::new(
//!     catalog.schema("citation").unwrap().clone(),
//!     Arc::new(InMemoryStore::new()),
//! );
//!
//! let created = citations
//!     .create(
//!         None,
//!         Properties::new()
//!             .with("pmid", "1234")
//!             .with("abstract", "Lorem ipsum")
//!             .with("authors", vec!["Joe", "Jim", "Bob"]),
//!     )
//!     .unwrap();
//! assert_eq!(created.key().unwrap().name(), Some("1234"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod attribute;
mod catalog;
mod data;
mod dataset;
mod error;
mod instance;
mod key;
mod schema;
mod transform;

pub use attribute::Attribute;
pub use catalog::{Catalog, CatalogBuilder};
pub use data::EntityData;
pub use dataset::Dataset;
pub use error::{CoreError, CoreResult};
pub use instance::Instance;
pub use key::{derive_key, KEY_SEPARATOR};
pub use schema::EntitySchema;
pub use transform::{
    long_text, serialize, Transform, TransformFn, TransformRegistry, LONG_TEXT, SERIALIZE,
};
