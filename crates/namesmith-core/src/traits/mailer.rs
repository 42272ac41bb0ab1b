//! Outgoing mail abstraction.

use async_trait::async_trait;

use crate::result::AppResult;

/// A plain-text message addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Delivers mail on behalf of the service.
///
/// Delivery transports live outside this workspace; implementations report
/// transport failures as `ErrorKind::ExternalService`.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send a single message.
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}
