//! Resend implementation of the Mailer port.
//!
//! Sends one HTTP request per message. The cancellation flow fans out a
//! notice to each recipient separately and swallows delivery failures,
//! so this adapter does not retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::EmailConfig;
use crate::ports::{EmailMessage, MailError, Mailer};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Resend mailer.
pub struct ResendMailer {
    config: EmailConfig,
    client: Client,
}

impl ResendMailer {
    /// Creates a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MailError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        let request = SendRequest {
            from: self.config.from_header(),
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html_body,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.config.resend_api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }
}
