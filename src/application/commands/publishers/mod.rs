mod join_requests;
mod manage;
mod service;

pub use join_requests::{RequestJoinCommand, ReviewJoinRequestCommand};
pub use manage::{CreatePublisherCommand, UpdatePublisherCommand};
pub use service::PublisherCommandService;
