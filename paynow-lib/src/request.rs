//! Transaction request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the payee is addressed, selecting the PayNow proxy type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    /// Pay to a company Unique Entity Number (wire code `'2'`).
    Uen,
    /// Pay to a mobile number (wire code `'0'`).
    Mobile,
}

impl PaymentType {
    /// Wire code carried in field 01 of the merchant account template.
    pub fn code(self) -> &'static str {
        match self {
            PaymentType::Uen => "2",
            PaymentType::Mobile => "0",
        }
    }
}

/// Parameters for a single PayNow QR code.
///
/// The request is an immutable value object: [`crate::Paynow::generate`]
/// reads it, never stores it, and produces exactly one payload from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QrRequest {
    /// Transaction amount in SGD; rendered with exactly 2 fraction digits.
    pub amount: f64,
    /// Whether the payer may edit the amount.
    pub editable: bool,
    /// Unique order reference, carried as the bill number. When empty the
    /// additional-data template (tag 62) is omitted entirely.
    pub reference: String,
    /// Expiry of the QR code; must be strictly in the future.
    pub expiry: DateTime<Utc>,
    /// Merchant company name.
    pub company: String,
    /// ISO 3166-1 alpha-2 country code of the merchant.
    pub merchant_country: String,
    /// City of the merchant.
    pub merchant_city: String,
    /// Company UEN to pay. Mandatory unless `mobile` is provided.
    pub uen: Option<String>,
    /// Mobile number to pay. Mandatory unless `uen` is provided.
    pub mobile: Option<String>,
    /// Return the payload wrapped as a base64 PNG data URI.
    pub render_as_image: bool,
}

impl QrRequest {
    /// Create a request with the Singapore defaults for country and city.
    pub fn new(amount: f64, expiry: DateTime<Utc>, company: impl Into<String>) -> Self {
        Self {
            amount,
            editable: false,
            reference: String::new(),
            expiry,
            company: company.into(),
            merchant_country: "SG".to_string(),
            merchant_city: "Singapore".to_string(),
            uen: None,
            mobile: None,
            render_as_image: false,
        }
    }

    /// Set the company UEN to pay.
    pub fn with_uen(mut self, uen: impl Into<String>) -> Self {
        self.uen = Some(uen.into());
        self
    }

    /// Set the mobile number to pay.
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Set the unique order reference (bill number).
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Override the merchant country and city.
    pub fn with_location(
        mut self,
        country: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.merchant_country = country.into();
        self.merchant_city = city.into();
        self
    }

    /// Set whether the payer may edit the amount.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Request the payload wrapped as a base64 PNG data URI.
    pub fn as_image(mut self) -> Self {
        self.render_as_image = true;
        self
    }

    /// The payee identifier and implied payment type.
    ///
    /// When both a UEN and a mobile number are set, the UEN wins; this
    /// precedence is a documented behavior downstream consumers rely on.
    /// `None` only when neither identifier is present.
    pub fn payee(&self) -> Option<(PaymentType, &str)> {
        if let Some(uen) = self.uen.as_deref() {
            Some((PaymentType::Uen, uen))
        } else {
            self.mobile
                .as_deref()
                .map(|mobile| (PaymentType::Mobile, mobile))
        }
    }
}
