//! Error types for PayNow payload generation.

use thiserror::Error;

/// Error type for payload generation and rendering.
///
/// Validation failures are all [`PaynowError::InvalidInput`]: they are raised
/// before any assembly happens and carry the name of the offending parameter.
#[derive(Debug, Error)]
pub enum PaynowError {
    /// A request parameter failed a precondition.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Parameter name (e.g. "amount", "expiry").
        field: &'static str,
        /// Which precondition was violated.
        reason: String,
    },

    /// A value serialized to more bytes than a 2-digit length can describe.
    #[error("value for tag {tag} is {length} bytes, limit is 99")]
    ValueTooLong {
        /// The tag whose value overflowed.
        tag: String,
        /// The serialized byte length.
        length: usize,
    },

    /// The QR encoder or PNG rasterizer rejected the payload.
    #[error("qr render failed: {0}")]
    Render(String),

    /// Reading the logo asset failed.
    #[error("logo asset: {0}")]
    Io(#[from] std::io::Error),
}

impl PaynowError {
    /// Create an invalid input error.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
