//! Mailer port.
//!
//! Fire-and-forget email delivery. Failures surface as `MailError` and the
//! callers decide whether to swallow them (the cancellation flow does).

use async_trait::async_trait;

/// A single outbound email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Errors from the email provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MailError {
    #[error("email provider unreachable: {0}")]
    Network(String),

    #[error("email provider rejected the message: {0}")]
    Rejected(String),
}

/// Port over the email provider.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }
}
