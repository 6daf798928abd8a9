use std::sync::Arc;

use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{AuthenticatedUser, SubscriptionsDto},
        error::ApplicationResult,
    },
    domain::{
        authorization::{Action, Resource},
        newsletter::NewsletterRepository,
        publisher::PublisherRepository,
        subscription::SubscriptionRepository,
        user::UserRepository,
    },
};

pub struct SubscriptionQueryService {
    subscription_repo: Arc<dyn SubscriptionRepository>,
    publisher_repo: Arc<dyn PublisherRepository>,
    user_repo: Arc<dyn UserRepository>,
    newsletter_repo: Arc<dyn NewsletterRepository>,
}

impl SubscriptionQueryService {
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

    pub async fn list_subscriptions(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<SubscriptionsDto> {
        ensure_allowed(
            actor,
            Action::ManageSubscriptions,
            Resource::Subscriptions(actor.id),
            "subscriptions",
        )?;

        let follows = self.subscription_repo.list_for_reader(actor.id).await?;
        let publishers = self.publisher_repo.find_many(&follows.publishers).await?;
        let journalists = self.user_repo.find_many(&follows.journalists).await?;
        let newsletters = self.newsletter_repo.find_many(&follows.newsletters).await?;

        Ok(SubscriptionsDto {
            publishers: publishers.into_iter().map(Into::into).collect(),
            journalists: journalists.into_iter().map(Into::into).collect(),
            newsletters: newsletters.into_iter().map(Into::into).collect(),
        })
    }
}
