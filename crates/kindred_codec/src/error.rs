//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Non-finite floats cannot be represented textually.
    #[error("non-finite float cannot be encoded")]
    NonFiniteFloat,

    /// Unexpected end of input.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Unexpected character in the input.
    #[error("unexpected character {found:?} at byte {position}")]
    UnexpectedChar {
        /// The character encountered.
        found: char,
        /// Byte offset into the input.
        position: usize,
    },

    /// Invalid escape sequence inside a string literal.
    #[error("invalid escape sequence at byte {position}")]
    InvalidEscape {
        /// Byte offset into the input.
        position: usize,
    },

    /// Number literal cannot be parsed.
    #[error("invalid number literal {literal:?} at byte {position}")]
    InvalidNumber {
        /// The offending literal.
        literal: String,
        /// Byte offset into the input.
        position: usize,
    },

    /// Unknown tagged literal.
    #[error("unknown tag {tag:?} at byte {position}")]
    UnknownTag {
        /// The tag name encountered.
        tag: String,
        /// Byte offset into the input.
        position: usize,
    },

    /// Input continues past the end of the value.
    #[error("trailing input at byte {position}")]
    TrailingInput {
        /// Byte offset of the first trailing character.
        position: usize,
    },

    /// Nesting exceeds the decoder's depth limit.
    #[error("nesting depth exceeds limit of {max_depth}")]
    DepthLimitExceeded {
        /// The configured limit.
        max_depth: usize,
    },
}

impl CodecError {
    /// Create an unexpected character error.
    pub fn unexpected_char(found: char, position: usize) -> Self {
        Self::UnexpectedChar { found, position }
    }

    /// Create an invalid number error.
    pub fn invalid_number(literal: impl Into<String>, position: usize) -> Self {
        Self::InvalidNumber {
            literal: literal.into(),
            position,
        }
    }

    /// Create an unknown tag error.
    pub fn unknown_tag(tag: impl Into<String>, position: usize) -> Self {
        Self::UnknownTag {
            tag: tag.into(),
            position,
        }
    }
}
