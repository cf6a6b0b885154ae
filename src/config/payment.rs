//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (VietQR)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// VietQR API key
    pub vietqr_api_key: String,

    /// Bank BIN receiving refund transfers
    pub bank_bin: String,

    /// Account number receiving refund transfers
    pub account_number: String,

    /// Account holder name printed on the QR
    #[serde(default)]
    pub account_name: String,

    /// Use the mock provider instead of the live gateway
    #[serde(default)]
    pub use_mock: bool,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.use_mock {
            return Ok(());
        }
        if self.vietqr_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("VIETQR_API_KEY"));
        }
        if self.bank_bin.is_empty() {
            return Err(ValidationError::MissingRequired("BANK_BIN"));
        }
        if !self.bank_bin.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidBankBin);
        }
        if self.account_number.is_empty() {
            return Err(ValidationError::MissingRequired("ACCOUNT_NUMBER"));
        }
        Ok(())
    }
}
