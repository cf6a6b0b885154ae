//! VietQR Provider - refund QR generation through the VietQR gateway.
//!
//! Posts a quick-link generation request and returns the hosted QR image
//! URL. The cancellation flow treats the call as best-effort, so this
//! adapter reports failures instead of retrying.
//!
//! # Configuration
//!
//! ```ignore
//! let config = VietQrConfig::new(api_key, "970422", "0123456789")
//!     .with_account_name("SAN BONG ABC");
//!
//! let provider = VietQrProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::{BookingId, Money};
use crate::ports::{QrError, RefundQrProvider};

/// Configuration for the VietQR provider.
#[derive(Debug, Clone)]
pub struct VietQrConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Bank BIN receiving the refund transfer.
    pub bank_bin: String,
    /// Account number receiving the refund transfer.
    pub account_number: String,
    /// Account holder name printed on the QR.
    pub account_name: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl VietQrConfig {
    /// Creates a new configuration with the given API key and account.
    pub fn new(
        api_key: impl Into<String>,
        bank_bin: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            bank_bin: bank_bin.into(),
            account_number: account_number.into(),
            account_name: String::new(),
            base_url: "https://api.vietqr.io".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the account holder name.
    pub fn with_account_name(mut self, name: impl Into<String>) -> Self {
        self.account_name = name.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// VietQR gateway provider implementation.
pub struct VietQrProvider {
    config: VietQrConfig,
    client: Client,
}

impl VietQrProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: VietQrConfig) -> Result<Self, QrError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QrError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!("{}/v2/generate", self.config.base_url)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    #[serde(rename = "acqId")]
    acq_id: &'a str,
    #[serde(rename = "accountNo")]
    account_no: &'a str,
    #[serde(rename = "accountName")]
    account_name: &'a str,
    /// Amount in whole currency units; VietQR does not take minor units.
    amount: i64,
    #[serde(rename = "addInfo")]
    add_info: String,
    template: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    code: String,
    desc: Option<String>,
    data: Option<GenerateData>,
}

#[derive(Debug, Deserialize)]
struct GenerateData {
    #[serde(rename = "qrDataURL")]
    qr_data_url: String,
}

#[async_trait]
impl RefundQrProvider for VietQrProvider {
    async fn generate_refund_qr(
        &self,
        booking_id: BookingId,
        amount: Money,
    ) -> Result<String, QrError> {
        let request = GenerateRequest {
            acq_id: &self.config.bank_bin,
            account_no: &self.config.account_number,
            account_name: &self.config.account_name,
            amount: amount.as_major_f64().round() as i64,
            add_info: format!("Hoan tien dat san {}", booking_id),
            template: "compact",
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-api-key", self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| QrError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QrError::Rejected(format!("HTTP {}: {}", status, body)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| QrError::BadResponse(e.to_string()))?;

        if body.code != "00" {
            return Err(QrError::Rejected(format!(
                "gateway code {}: {}",
                body.code,
                body.desc.unwrap_or_default()
            )));
        }

        body.data
            .map(|d| d.qr_data_url)
            .ok_or_else(|| QrError::BadResponse("missing qrDataURL in response".to_string()))
    }
}
