//! Validation and payload assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::request::{PaymentType, QrRequest};
use crate::tlv::{self, Tlv};
use crate::{crc, PaynowError, Result};

/// Payload format indicator, fixed to the first EMVCo version.
const PAYLOAD_FORMAT: &str = "01";
/// Point of initiation method: `12` marks a dynamic, per-transaction code.
const INITIATION_DYNAMIC: &str = "12";
/// Scheme identifier inside the merchant account template.
const PAYNOW_SCHEME: &str = "SG.PAYNOW";
/// Merchant category code; not used by PayNow.
const MERCHANT_CATEGORY: &str = "0000";
/// ISO 4217 numeric code for SGD.
const CURRENCY_SGD: &str = "702";
/// Checksum tag and its fixed 4-character length; part of the CRC input.
const CHECKSUM_PREFIX: &str = "6304";

/// Configuration for a [`Paynow`] generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PaynowConfig {
    /// PNG logo blended into the center of rendered QR images.
    pub logo_path: Option<PathBuf>,
    /// Edge length in pixels of rendered QR images.
    pub pixel_size: u32,
}

impl Default for PaynowConfig {
    fn default() -> Self {
        Self {
            logo_path: None,
            pixel_size: 512,
        }
    }
}

/// PayNow QR payload generator.
///
/// Stateless per call: nothing from a request survives the call, so one
/// generator can serve concurrent requests without coordination.
#[derive(Clone, Debug, Default)]
pub struct Paynow {
    config: PaynowConfig,
}

impl Paynow {
    /// Generator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with explicit configuration.
    pub fn with_config(config: PaynowConfig) -> Self {
        Self { config }
    }

    /// Generate the payload for `request`.
    ///
    /// Returns the raw EMV TLV string, or a `data:image/png;base64,...` URI
    /// when the request asks for an image (feature `qr-image`). Fails fast
    /// with [`PaynowError::InvalidInput`] on the first violated
    /// precondition; nothing is assembled after a validation failure.
    pub fn generate(&self, request: &QrRequest) -> Result<String> {
        self.generate_at(request, Utc::now())
    }

    // Time-dependent validation is factored through an explicit clock so the
    // assembly path stays deterministic under test.
    fn generate_at(&self, request: &QrRequest, now: DateTime<Utc>) -> Result<String> {
        let (payment_type, payee) = validate(request, now)?;
        let payload = build_payload(request, payment_type, payee)?;
        debug!(len = payload.len(), "assembled paynow payload");

        if !request.render_as_image {
            return Ok(payload);
        }
        self.render_data_uri(&payload)
    }

    #[cfg(feature = "qr-image")]
    fn render_data_uri(&self, payload: &str) -> Result<String> {
        let logo = match &self.config.logo_path {
            Some(path) => Some(std::fs::read(path)?),
            None => None,
        };
        crate::qr::data_uri(payload, logo.as_deref(), self.config.pixel_size)
    }

    #[cfg(not(feature = "qr-image"))]
    fn render_data_uri(&self, _payload: &str) -> Result<String> {
        Err(PaynowError::Render(
            "image output requires the qr-image feature".to_string(),
        ))
    }
}

/// Check the request preconditions, returning the payee selection.
///
/// Rules are checked in a fixed order and the first violation is reported.
/// Only the absence of both payee identifiers is rejected; when both are
/// present the UEN takes precedence (see [`QrRequest::payee`]).
fn validate(request: &QrRequest, now: DateTime<Utc>) -> Result<(PaymentType, &str)> {
    if request.amount < 0.0 {
        return Err(PaynowError::invalid_input("amount", "cannot be negative"));
    }
    if request.company.is_empty() {
        return Err(PaynowError::invalid_input("company", "must be provided"));
    }
    if request.merchant_country.is_empty() {
        return Err(PaynowError::invalid_input(
            "merchant country",
            "must be provided",
        ));
    }
    if request.merchant_city.is_empty() {
        return Err(PaynowError::invalid_input(
            "merchant city",
            "must be provided",
        ));
    }
    if request.expiry <= now {
        return Err(PaynowError::invalid_input(
            "expiry",
            "must be in the future",
        ));
    }
    request.payee().ok_or_else(|| {
        PaynowError::invalid_input("payee", "a mobile number or a company UEN must be provided")
    })
}

/// Assemble the TLV tree, serialize it and seal it with the checksum.
fn build_payload(request: &QrRequest, payment_type: PaymentType, payee: &str) -> Result<String> {
    let mut fields = vec![
        Tlv::text("00", PAYLOAD_FORMAT),
        Tlv::text("01", INITIATION_DYNAMIC),
        Tlv::template(
            "26",
            vec![
                Tlv::text("00", PAYNOW_SCHEME),
                Tlv::text("01", payment_type.code()),
                Tlv::text("02", payee),
                Tlv::text("03", if request.editable { "1" } else { "0" }),
                Tlv::text("04", request.expiry.format("%Y%m%d").to_string()),
            ],
        ),
        Tlv::text("52", MERCHANT_CATEGORY),
        Tlv::text("53", CURRENCY_SGD),
        Tlv::text("54", format!("{:.2}", request.amount)),
        Tlv::text("58", request.merchant_country.clone()),
        Tlv::text("59", request.company.clone()),
        Tlv::text("60", request.merchant_city.clone()),
    ];
    if !request.reference.is_empty() {
        fields.push(Tlv::template(
            "62",
            vec![Tlv::text("01", request.reference.clone())],
        ));
    }

    let mut payload = tlv::encode(&fields)?;
    payload.push_str(CHECKSUM_PREFIX);
    let digest = crc::checksum(payload.as_bytes());
    payload.push_str(&digest);
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SCENARIO_A: &str = "00020101021226500009SG.PAYNOW0101202112020111104G030100408202011125204000053037025406100.005802SG5924Clothing Company Pte Ltd6009Singapore62110107O1234566304B015";
    const SCENARIO_B: &str = "00020101021226470009SG.PAYNOW01010020882049939030100408202011125204000053037025406100.005802SG5924Clothing Company Pte Ltd6009Singapore62110107O123456630417C6";

    // The historical vectors carry an expiry of 2020-11-12, so the clock is
    // pinned one hour before it.
    fn pinned_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 11, 12, 0, 0, 0).unwrap()
    }

    fn scenario_request() -> QrRequest {
        let expiry = Utc.with_ymd_and_hms(2020, 11, 12, 1, 0, 0).unwrap();
        QrRequest::new(100.0, expiry, "Clothing Company Pte Ltd").with_reference("O123456")
    }

    #[test]
    fn scenario_uen() {
        let request = scenario_request().with_uen("2020111104G");
        let payload = Paynow::new().generate_at(&request, pinned_now()).unwrap();
        assert_eq!(payload, SCENARIO_A);
    }

    #[test]
    fn scenario_mobile() {
        let request = scenario_request().with_mobile("82049939");
        let payload = Paynow::new().generate_at(&request, pinned_now()).unwrap();
        assert_eq!(payload, SCENARIO_B);
    }

    #[test]
    fn uen_wins_when_both_identifiers_are_set() {
        let request = scenario_request()
            .with_uen("2020111104G")
            .with_mobile("82049939");
        let payload = Paynow::new().generate_at(&request, pinned_now()).unwrap();
        assert_eq!(payload, SCENARIO_A);
    }

    #[test]
    fn empty_reference_omits_tag_62() {
        let request = scenario_request()
            .with_uen("2020111104G")
            .with_reference("");
        let payload = Paynow::new().generate_at(&request, pinned_now()).unwrap();
        assert!(!payload.contains("62110107"));
        // the checksum tag immediately follows tag 60
        assert_eq!(&payload[payload.len() - 8..payload.len() - 4], "6304");
    }

    #[test]
    fn editable_flag_serializes_as_one() {
        let request = scenario_request().with_uen("2020111104G").editable(true);
        let payload = Paynow::new().generate_at(&request, pinned_now()).unwrap();
        assert!(payload.contains("03011"));
    }

    #[test]
    fn amount_renders_with_two_fraction_digits() {
        let request = scenario_request().with_uen("2020111104G");
        let request = QrRequest {
            amount: 7.5,
            ..request
        };
        let payload = Paynow::new().generate_at(&request, pinned_now()).unwrap();
        assert!(payload.contains("54047.50"));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let request = QrRequest {
            amount: -0.01,
            ..scenario_request().with_uen("2020111104G")
        };
        let err = Paynow::new()
            .generate_at(&request, pinned_now())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid amount: cannot be negative");
    }

    #[test]
    fn empty_company_is_rejected() {
        let request = QrRequest {
            company: String::new(),
            ..scenario_request().with_uen("2020111104G")
        };
        let err = Paynow::new()
            .generate_at(&request, pinned_now())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid company: must be provided");
    }

    #[test]
    fn empty_country_is_rejected() {
        let request = scenario_request()
            .with_uen("2020111104G")
            .with_location("", "Singapore");
        let err = Paynow::new()
            .generate_at(&request, pinned_now())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid merchant country: must be provided");
    }

    #[test]
    fn empty_city_is_rejected() {
        let request = scenario_request()
            .with_uen("2020111104G")
            .with_location("SG", "");
        let err = Paynow::new()
            .generate_at(&request, pinned_now())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid merchant city: must be provided");
    }

    #[test]
    fn past_expiry_is_rejected() {
        let request = scenario_request().with_uen("2020111104G");
        let late = Utc.with_ymd_and_hms(2020, 11, 12, 2, 0, 0).unwrap();
        let err = Paynow::new().generate_at(&request, late).unwrap_err();
        assert_eq!(err.to_string(), "invalid expiry: must be in the future");
    }

    #[test]
    fn expiry_equal_to_now_is_rejected() {
        let request = scenario_request().with_uen("2020111104G");
        let err = Paynow::new()
            .generate_at(&request, request.expiry)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid expiry: must be in the future");
    }

    #[test]
    fn missing_payee_is_rejected() {
        let err = Paynow::new()
            .generate_at(&scenario_request(), pinned_now())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid payee: a mobile number or a company UEN must be provided"
        );
    }

    #[test]
    fn oversized_company_fails_instead_of_mispadding() {
        let request = QrRequest {
            company: "x".repeat(100),
            ..scenario_request().with_uen("2020111104G")
        };
        let err = Paynow::new()
            .generate_at(&request, pinned_now())
            .unwrap_err();
        assert!(matches!(err, PaynowError::ValueTooLong { .. }));
    }
}
