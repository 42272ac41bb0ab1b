//! Mail delivery through the log.

use async_trait::async_trait;
use tracing::info;

use namesmith_core::result::AppResult;
use namesmith_core::traits::{MailMessage, Mailer};

/// [`Mailer`] that records each message in the log instead of delivering it.
///
/// The message body is not logged since it carries the verification code.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    /// Creates a mailer sending as `from_address`.
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        info!(
            from = %self.from_address,
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "Mail dispatched"
        );
        Ok(())
    }
}
