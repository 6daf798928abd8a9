use crate::application::ApplicationResult;
use crate::domain::user::EmailAddress;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

/// Outbound plain-text mail. Delivery is best effort; callers decide what
/// a failure means.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> ApplicationResult<()>;
}
