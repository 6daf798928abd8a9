// tests/support/mocks/mail.rs
use async_trait::async_trait;
use newsroom::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::mail::{MailMessage, Mailer},
};
use std::collections::HashSet;
use std::sync::Mutex;

/// Keeps every delivered message. Addresses marked with [`fail_for`]
/// are refused with an infrastructure error.
///
/// [`fail_for`]: RecordingMailer::fail_for
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    pub fn recover(&self, address: &str) {
        self.failing.lock().unwrap().remove(address);
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        let mut to: Vec<String> = self
            .sent()
            .iter()
            .map(|m| m.to.as_str().to_string())
            .collect();
        to.sort();
        to
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> ApplicationResult<()> {
        if self.failing.lock().unwrap().contains(message.to.as_str()) {
            return Err(ApplicationError::infrastructure(format!(
                "mailbox {} unavailable",
                message.to
            )));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
