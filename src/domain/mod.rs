pub mod article;
pub mod authorization;
pub mod errors;
pub mod newsletter;
pub mod publisher;
pub mod subscription;
pub mod user;
