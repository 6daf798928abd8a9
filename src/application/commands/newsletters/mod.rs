mod manage;
mod service;

pub use manage::{CreateNewsletterCommand, DeleteNewsletterCommand, UpdateNewsletterCommand};
pub use service::NewsletterCommandService;
