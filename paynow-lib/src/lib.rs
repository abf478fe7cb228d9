//! PayNow QR payload generation.
//!
//! Builds EMV-style PayNow payment payloads: flat tag-length-value strings
//! sealed with a CRC-16/CCITT checksum, optionally rendered as a
//! `data:image/png;base64,...` QR image (feature `qr-image`, on by default).
//!
//! The generator is stateless and synchronous. Each call validates an
//! immutable [`QrRequest`], assembles the payload and returns it; nothing is
//! retained between calls, so a single [`Paynow`] can be shared freely
//! across threads.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use paynow_lib::{Paynow, QrRequest};
//!
//! let request = QrRequest::new(12.50, Utc::now() + Duration::hours(1), "Acme Pte Ltd")
//!     .with_uen("201403121W")
//!     .with_reference("INV-1009");
//!
//! let payload = Paynow::new().generate(&request)?;
//! assert!(payload.starts_with("000201"));
//! # Ok::<(), paynow_lib::PaynowError>(())
//! ```

pub mod crc;
pub mod errors;
mod generator;
pub mod request;
pub mod tlv;

#[cfg(feature = "qr-image")]
pub mod qr;

pub use errors::PaynowError;
pub use generator::{Paynow, PaynowConfig};
pub use request::{PaymentType, QrRequest};

/// Common result alias for PayNow operations.
pub type Result<T> = std::result::Result<T, PaynowError>;
