use reqwest::Url;
use uuid::Uuid;

use crate::error::{Result, WizardError};

pub const UPI_PAY_URI: &str = "upi://pay";
pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_NOTE_PREFIX: &str = "SwimFest Registration";
pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const QR_SIZE: &str = "300x300";

const REG_ID_PREFIX: &str = "SWIM-";
const REG_ID_RANDOM_LEN: usize = 16;

/// Payee identity and rendering endpoint for payment links
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub upi_id: String,
    pub payee_name: String,
    pub currency: String,
    pub note_prefix: String,
    pub qr_endpoint: String,
}

impl PaymentConfig {
    pub fn new(upi_id: impl Into<String>, payee_name: impl Into<String>) -> Self {
        Self {
            upi_id: upi_id.into(),
            payee_name: payee_name.into(),
            currency: DEFAULT_CURRENCY.to_string(),
            note_prefix: DEFAULT_NOTE_PREFIX.to_string(),
            qr_endpoint: DEFAULT_QR_ENDPOINT.to_string(),
        }
    }

    pub fn with_qr_endpoint(mut self, qr_endpoint: impl Into<String>) -> Self {
        self.qr_endpoint = qr_endpoint.into();
        self
    }
}

/// A fresh registration id such as `SWIM-3F9A0C7D12E4B8A1`.
///
/// The suffix is 64 random bits from a v4 UUID.
pub fn generate_registration_id() -> String {
    let random = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}{}", REG_ID_PREFIX, &random[..REG_ID_RANDOM_LEN])
}

/// Build the UPI deep link for `amount` rupees referencing `reg_id`.
///
/// Field order is fixed: `pa, pn, am, cu, tn, tr`.
pub fn upi_link(config: &PaymentConfig, amount: i32, reg_id: &str) -> Result<String> {
    let note = format!("{} {}", config.note_prefix, reg_id);
    let amount = amount.to_string();

    let url = Url::parse_with_params(
        UPI_PAY_URI,
        &[
            ("pa", config.upi_id.as_str()),
            ("pn", config.payee_name.as_str()),
            ("am", amount.as_str()),
            ("cu", config.currency.as_str()),
            ("tn", note.as_str()),
            ("tr", reg_id),
        ],
    )
    .map_err(|e| WizardError::PaymentLink(e.to_string()))?;

    Ok(url.to_string())
}

/// URL of a scannable image for `link`. Same link, same image.
pub fn qr_code_url(config: &PaymentConfig, link: &str) -> Result<String> {
    let url = Url::parse_with_params(&config.qr_endpoint, &[("size", QR_SIZE), ("data", link)])
        .map_err(|e| WizardError::PaymentLink(e.to_string()))?;

    Ok(url.to_string())
}
