pub mod articles;
pub mod auth;
pub mod newsletters;
pub mod pagination;
pub mod publishers;
pub mod serde_time;
pub mod subscriptions;
pub mod users;

pub use articles::{ArticleDto, RejectionDto};
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use newsletters::NewsletterDto;
pub use pagination::CursorPage;
pub use publishers::{JoinRequestDto, PublisherDto};
pub use subscriptions::{SubscriptionChangeDto, SubscriptionsDto};
pub use users::{CapabilityView, UserDto, UserProfileDto};
