use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{NewsletterDto, PublisherDto, UserDto};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionsDto {
    pub publishers: Vec<PublisherDto>,
    pub journalists: Vec<UserDto>,
    pub newsletters: Vec<NewsletterDto>,
}

/// Outcome of an idempotent subscribe or unsubscribe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionChangeDto {
    /// `true` when the call changed the stored edge set.
    pub changed: bool,
    pub subscribed: bool,
}
