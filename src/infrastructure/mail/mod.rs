// src/infrastructure/mail/mod.rs
mod log;
mod smtp;

pub use log::LogMailer;
pub use smtp::{SmtpMailer, SmtpSettings};
