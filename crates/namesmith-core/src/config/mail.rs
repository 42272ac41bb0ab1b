//! Verification-code mail configuration.

use serde::{Deserialize, Serialize};

/// Settings for the email verification codes sent before registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sender address placed on outgoing messages.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Subject line of the verification message.
    #[serde(default = "default_subject")]
    pub code_subject: String,
    /// Number of decimal digits in a verification code.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// How long a code stays valid after it was issued.
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: default_from(),
            code_subject: default_subject(),
            code_length: default_code_length(),
            code_ttl_seconds: default_code_ttl(),
        }
    }
}

fn default_from() -> String {
    "no-reply@namesmith.local".to_string()
}

fn default_subject() -> String {
    "[Namesmith] Verification code".to_string()
}

fn default_code_length() -> usize {
    4
}

fn default_code_ttl() -> u64 {
    600
}
