//! Error types for Kindred core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in Kindred core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document store error, passed through unmodified.
    #[error("store error: {0}")]
    Store(#[from] kindred_store::StoreError),

    /// A stored textual form is malformed and cannot be parsed back.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] kindred_codec::CodecError),

    /// A schema references a transform that is not registered.
    #[error("unknown transform: {name}")]
    UnknownTransform {
        /// The transform name that failed to resolve.
        name: String,
    },

    /// A transform with this name is already registered.
    #[error("transform already registered: {name}")]
    DuplicateTransform {
        /// The colliding transform name.
        name: String,
    },

    /// No schema is declared for this kind.
    #[error("unknown kind: {kind}")]
    UnknownKind {
        /// The kind that failed to resolve.
        kind: String,
    },

    /// A schema with this kind is already declared.
    #[error("kind already declared: {kind}")]
    DuplicateKind {
        /// The colliding kind.
        kind: String,
    },

    /// A schema was declared without attributes.
    #[error("entity {kind} declares no attributes")]
    NoAttributes {
        /// The offending kind.
        kind: String,
    },

    /// An attribute name appears more than once in a schema.
    #[error("duplicate attribute {name} in entity {kind}")]
    DuplicateAttribute {
        /// The entity kind.
        kind: String,
        /// The duplicated attribute name.
        name: String,
    },

    /// An attribute uses one of the implicit reserved names.
    #[error("attribute name {name} is reserved in entity {kind}")]
    ReservedAttribute {
        /// The entity kind.
        kind: String,
        /// The reserved name.
        name: String,
    },

    /// Key derivation was invoked with a key-component attribute absent.
    #[error("incomplete key for {kind}: attribute {attribute} is absent")]
    IncompleteKey {
        /// The entity kind.
        kind: String,
        /// The missing key-component attribute.
        attribute: String,
    },

    /// A key-component attribute holds a non-scalar value.
    #[error("key component {attribute} of {kind} must be a scalar value")]
    InvalidKeyComponent {
        /// The entity kind.
        kind: String,
        /// The offending attribute.
        attribute: String,
    },

    /// A transform was applied to a value shape it cannot handle.
    #[error("transform {transform} cannot be applied: {message}")]
    TransformInput {
        /// The transform name.
        transform: String,
        /// Description of the mismatch.
        message: String,
    },
}

impl CoreError {
    /// Creates an unknown transform error.
    pub fn unknown_transform(name: impl Into<String>) -> Self {
        Self::UnknownTransform { name: name.into() }
    }

    /// Creates a duplicate transform error.
    pub fn duplicate_transform(name: impl Into<String>) -> Self {
        Self::DuplicateTransform { name: name.into() }
    }

    /// Creates an unknown kind error.
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind { kind: kind.into() }
    }

    /// Creates an incomplete key error.
    pub fn incomplete_key(kind: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::IncompleteKey {
            kind: kind.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a transform input error.
    pub fn transform_input(transform: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransformInput {
            transform: transform.into(),
            message: message.into(),
        }
    }
}
