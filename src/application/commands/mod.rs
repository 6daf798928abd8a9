pub mod articles;
pub mod newsletters;
pub mod publishers;
pub mod subscriptions;
pub mod users;
