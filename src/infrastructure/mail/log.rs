// src/infrastructure/mail/log.rs
use crate::application::{
    ApplicationResult,
    ports::mail::{MailMessage, Mailer},
};
use async_trait::async_trait;

/// Writes outgoing mail to the log instead of delivering it. Used when no
/// SMTP host is configured.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> ApplicationResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "mail not delivered: no smtp transport configured"
        );
        Ok(())
    }
}
