use std::sync::Arc;

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        newsletter::{NewsletterId, NewsletterRepository},
        publisher::{PublisherId, PublisherRepository},
        subscription::{SubscriptionRepository, SubscriptionTarget},
        user::{UserId, UserRepository},
    },
};

use super::SubscriptionTargetRef;

pub struct SubscriptionCommandService {
    pub(super) subscription_repo: Arc<dyn SubscriptionRepository>,
    pub(super) publisher_repo: Arc<dyn PublisherRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) newsletter_repo: Arc<dyn NewsletterRepository>,
}

impl SubscriptionCommandService {
    pub fn new(
        subscription_repo: Arc<dyn SubscriptionRepository>,
        publisher_repo: Arc<dyn PublisherRepository>,
        user_repo: Arc<dyn UserRepository>,
        newsletter_repo: Arc<dyn NewsletterRepository>,
    ) -> Self {
        Self {
            subscription_repo,
            publisher_repo,
            user_repo,
            newsletter_repo,
        }
    }

    /// Turns a raw reference into a target that is known to exist. A
    /// journalist target must hold the journalist role.
    pub(super) async fn resolve_target(
        &self,
        target: SubscriptionTargetRef,
    ) -> ApplicationResult<SubscriptionTarget> {
        match target {
            SubscriptionTargetRef::Publisher(raw) => {
                let id = PublisherId::new(raw)?;
                self.publisher_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("publisher not found"))?;
                Ok(SubscriptionTarget::Publisher(id))
            }
            SubscriptionTargetRef::Journalist(raw) => {
                let id = UserId::new(raw)?;
                match self.user_repo.find_by_id(id).await? {
                    Some(user) if user.is_journalist() => Ok(SubscriptionTarget::Journalist(id)),
                    _ => Err(ApplicationError::not_found("journalist not found")),
                }
            }
            SubscriptionTargetRef::Newsletter(raw) => {
                let id = NewsletterId::new(raw)?;
                self.newsletter_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("newsletter not found"))?;
                Ok(SubscriptionTarget::Newsletter(id))
            }
        }
    }
}
