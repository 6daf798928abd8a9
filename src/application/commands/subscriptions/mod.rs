mod service;
mod toggle;

pub use service::SubscriptionCommandService;
pub use toggle::{SubscribeCommand, SubscriptionTargetRef, UnsubscribeCommand};
