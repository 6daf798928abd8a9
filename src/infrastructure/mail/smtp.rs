// src/infrastructure/mail/smtp.rs
use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::mail::{MailMessage, Mailer},
};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub starttls: bool,
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> ApplicationResult<Self> {
        let from: Mailbox = settings.from.parse().map_err(|err| {
            ApplicationError::infrastructure(format!("invalid sender address: {err}"))
        })?;

        let mut builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host).map_err(
                |err| ApplicationError::infrastructure(format!("smtp transport: {err}")),
            )?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };
        builder = builder.port(settings.port);

        if let (Some(username), Some(password)) = (settings.username, settings.password) {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, message: MailMessage) -> ApplicationResult<Message> {
        let to: Mailbox = message.to.as_str().parse().map_err(|err| {
            ApplicationError::validation(format!("invalid recipient address: {err}"))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|err| ApplicationError::infrastructure(format!("failed to build mail: {err}")))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> ApplicationResult<()> {
        let email = self.build_message(message)?;
        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|err| ApplicationError::infrastructure(format!("smtp delivery failed: {err}")))
    }
}
