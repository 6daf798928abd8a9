use super::SubscriptionCommandService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{AuthenticatedUser, SubscriptionChangeDto},
        error::ApplicationResult,
    },
    domain::authorization::{Action, Resource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionTargetRef {
    Publisher(i64),
    Journalist(i64),
    Newsletter(i64),
}

pub struct SubscribeCommand {
    pub target: SubscriptionTargetRef,
}

pub struct UnsubscribeCommand {
    pub target: SubscriptionTargetRef,
}

impl SubscriptionCommandService {
    /// Idempotent; `changed` is `false` when the edge already existed.
    pub async fn subscribe(
        &self,
        actor: &AuthenticatedUser,
        command: SubscribeCommand,
    ) -> ApplicationResult<SubscriptionChangeDto> {
        let target = self.resolve_target(command.target).await?;
        ensure_allowed(
            actor,
            Action::ManageSubscriptions,
            Resource::Subscriptions(actor.id),
            "subscriptions",
        )?;

        let created = self.subscription_repo.add(actor.id, target).await?;
        if created {
            tracing::info!(reader_id = %actor.id, %target, "subscribed");
        }
        Ok(SubscriptionChangeDto {
            changed: created,
            subscribed: true,
        })
    }

    /// Idempotent; removing an absent edge succeeds with `changed = false`.
    pub async fn unsubscribe(
        &self,
        actor: &AuthenticatedUser,
        command: UnsubscribeCommand,
    ) -> ApplicationResult<SubscriptionChangeDto> {
        let target = self.resolve_target(command.target).await?;
        ensure_allowed(
            actor,
            Action::ManageSubscriptions,
            Resource::Subscriptions(actor.id),
            "subscriptions",
        )?;

        let removed = self.subscription_repo.remove(actor.id, target).await?;
        if removed {
            tracing::info!(reader_id = %actor.id, %target, "unsubscribed");
        }
        Ok(SubscriptionChangeDto {
            changed: removed,
            subscribed: false,
        })
    }
}
