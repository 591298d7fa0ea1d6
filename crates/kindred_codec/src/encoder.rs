//! Textual value encoder.

use crate::error::{CodecError, CodecResult};
use crate::value::Value;

/// Encode a value to its canonical textual form.
///
/// The output is deterministic: identical values produce identical
/// text. Containers are rendered in stored order, strings are escaped,
/// and floats use the shortest representation that parses back to the
/// same value (always carrying a `.` or an exponent so they stay
/// distinguishable from integers). Long text is rendered as the tagged
/// literal `#text "..."`.
///
/// # Errors
///
/// Returns an error if the value contains a non-finite float.
pub fn to_text(value: &Value) -> CodecResult<String> {
    let mut encoder = TextEncoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_string())
}

/// A textual value encoder.
///
/// Accumulates output in an internal buffer; use [`to_text`] for the
/// common single-value case.
pub struct TextEncoder {
    buffer: String,
}

impl TextEncoder {
    /// Create a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Create a new encoder with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Encode a value into the buffer.
    pub fn encode(&mut self, value: &Value) -> CodecResult<()> {
        match value {
            Value::Null => {
                self.buffer.push_str("null");
                Ok(())
            }
            Value::Bool(b) => {
                self.buffer.push_str(if *b { "true" } else { "false" });
                Ok(())
            }
            Value::Integer(n) => {
                self.buffer.push_str(&n.to_string());
                Ok(())
            }
            Value::Float(f) => self.encode_float(*f),
            Value::Text(s) => {
                self.encode_string(s);
                Ok(())
            }
            Value::LongText(s) => {
                self.buffer.push_str("#text ");
                self.encode_string(s);
                Ok(())
            }
            Value::Array(items) => self.encode_array(items),
            Value::Map(pairs) => self.encode_map(pairs),
        }
    }

    /// Consume this encoder and return the encoded text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Get a reference to the encoded text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn encode_float(&mut self, f: f64) -> CodecResult<()> {
        if !f.is_finite() {
            return Err(CodecError::NonFiniteFloat);
        }
        // Debug formatting of f64 is the shortest round-trippable form
        // and always contains a '.' or an exponent.
        self.buffer.push_str(&format!("{f:?}"));
        Ok(())
    }

    fn encode_string(&mut self, s: &str) {
        self.buffer.push('"');
        for c in s.chars() {
            match c {
                '"' => self.buffer.push_str("\\\""),
                '\\' => self.buffer.push_str("\\\\"),
                '\n' => self.buffer.push_str("\\n"),
                '\t' => self.buffer.push_str("\\t"),
                '\r' => self.buffer.push_str("\\r"),
                c if (c as u32) < 0x20 => {
                    self.buffer.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.buffer.push(c),
            }
        }
        self.buffer.push('"');
    }

    fn encode_array(&mut self, items: &[Value]) -> CodecResult<()> {
        self.buffer.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.buffer.push(',');
            }
            self.encode(item)?;
        }
        self.buffer.push(']');
        Ok(())
    }

    fn encode_map(&mut self, pairs: &[(String, Value)]) -> CodecResult<()> {
        self.buffer.push('{');
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                self.buffer.push(',');
            }
            self.encode_string(key);
            self.buffer.push(':');
            self.encode(value)?;
        }
        self.buffer.push('}');
        Ok(())
    }
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new()
    }
}
