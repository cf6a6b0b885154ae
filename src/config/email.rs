//! Email delivery configuration (Resend).

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the outgoing cancellation notices.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key, always prefixed `re_`
    pub resend_api_key: String,

    /// Sender address on cancellation notices
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Formats the "From" header as `Name <address>`.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !self.resend_api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

fn default_from_email() -> String {
    "noreply@fieldbook.vn".to_string()
}

fn default_from_name() -> String {
    "Fieldbook".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> EmailConfig {
        EmailConfig {
            resend_api_key: api_key.to_string(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }

    #[test]
    fn test_from_header() {
        let mut config = config("re_abcd1234");
        config.from_email = "support@fieldbook.vn".to_string();
        config.from_name = "Fieldbook Support".to_string();
        assert_eq!(
            config.from_header(),
            "Fieldbook Support <support@fieldbook.vn>"
        );
    }

    #[test]
    fn test_validation_missing_api_key() {
        assert!(config("").validate().is_err());
    }

    #[test]
    fn test_validation_rejects_foreign_key_prefix() {
        assert!(config("sk_xxx").validate().is_err());
    }

    #[test]
    fn test_validation_rejects_sender_without_at_sign() {
        let mut config = config("re_abcd1234");
        config.from_email = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("re_abcd1234").validate().is_ok());
    }
}
