//! # Kindred Store
//!
//! Document-store contract and reference backend for Kindred.
//!
//! This crate defines the boundary between the entity-mapping layer and
//! whatever actually persists entities. Stores are **opaque property
//! stores** - they hold ordered property maps under hierarchical keys
//! and answer kind-scoped queries, and nothing more.
//!
//! ## Design Principles
//!
//! - Stores persist property maps under keys (put, get, update, delete,
//!   query)
//! - No knowledge of schemas, defaults, transforms, or key derivation
//! - Must be `Send + Sync` for concurrent access
//! - The entity-mapping layer owns all schema interpretation
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral storage
//!
//! ## Example
//!
//! ```rust
//! use kindred_store::{DocumentStore, InMemoryStore, Key, Properties};
//!
//! let store = InMemoryStore::new();
//! let key = store
//!     .put("person", None, Properties::new().with("name", "Alice"))
//!     .unwrap();
//! let props = store.get(&key).unwrap();
//! assert_eq!(props.get("name").unwrap().as_text(), Some("Alice"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod key;
mod memory;
mod properties;
mod query;

pub use backend::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use key::{Key, KeyId};
pub use memory::InMemoryStore;
pub use properties::Properties;
pub use query::{compare_values, Direction, Filter, Operator, Query, Sort};
