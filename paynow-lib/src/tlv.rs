//! Tag-length-value encoding for EMV-style payloads.
//!
//! Each field serializes as a 2-digit tag, a 2-digit zero-padded byte
//! length and the value itself. A field's value is either literal text or
//! an ordered template of child fields; children serialize first and their
//! concatenation becomes the parent's value, so templates nest to any depth.

use crate::{PaynowError, Result};

/// Largest serialized value a 2-digit length field can describe.
const MAX_VALUE_LEN: usize = 99;

/// A single TLV field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tlv {
    tag: &'static str,
    value: Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Value {
    Text(String),
    Template(Vec<Tlv>),
}

impl Tlv {
    /// A field with a literal text value.
    pub fn text(tag: &'static str, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: Value::Text(value.into()),
        }
    }

    /// A field whose value is an ordered template of child fields.
    pub fn template(tag: &'static str, children: Vec<Tlv>) -> Self {
        Self {
            tag,
            value: Value::Template(children),
        }
    }

    /// The field's 2-digit tag.
    pub fn tag(&self) -> &str {
        self.tag
    }

    fn write_into(&self, out: &mut String) -> Result<()> {
        let value = match &self.value {
            Value::Text(text) => text.clone(),
            Value::Template(children) => encode(children)?,
        };
        // Length is raw bytes of the (possibly serialized) value.
        let length = value.len();
        if length > MAX_VALUE_LEN {
            return Err(PaynowError::ValueTooLong {
                tag: self.tag.to_string(),
                length,
            });
        }
        out.push_str(self.tag);
        out.push_str(&format!("{:02}", length));
        out.push_str(&value);
        Ok(())
    }
}

/// Serialize an ordered sequence of fields to the flat wire form.
pub fn encode(fields: &[Tlv]) -> Result<String> {
    let mut out = String::new();
    for field in fields {
        field.write_into(&mut out)?;
    }
    Ok(out)
}
