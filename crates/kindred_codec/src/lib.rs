//! # Kindred Codec
//!
//! Value model and textual codec for Kindred.
//!
//! This crate defines the dynamic [`Value`] type entity properties are
//! made of, and a canonical textual encoding for it:
//! - Identical values produce identical text
//! - Every encodable value parses back to an equal value
//! - Malformed text is a hard error, never a partial value
//!
//! ## Grammar
//!
//! JSON-style literals (`null`, `true`/`false`, decimal integers,
//! floats always carrying a `.` or exponent, escaped double-quoted
//! strings, `[...]` arrays, `{"key": value}` maps in stored order)
//! plus the tagged literal `#text "..."` for unindexed long text.
//!
//! ## Usage
//!
//! ```
//! use kindred_codec::{to_text, from_text, Value};
//!
//! let value = Value::Array(vec![Value::Integer(1), Value::Text("two".into())]);
//! let text = to_text(&value).unwrap();
//! assert_eq!(text, "[1,\"two\"]");
//!
//! let decoded = from_text(&text).unwrap();
//! assert_eq!(value, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod value;

pub use decoder::{from_text, TextDecoder};
pub use encoder::{to_text, TextEncoder};
pub use error::{CodecError, CodecResult};
pub use value::Value;
