use super::PublisherCommandService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{AuthenticatedUser, JoinRequestDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        authorization::{Action, Resource},
        publisher::{
            JoinRequestId, JoinRequestReview, JoinRequestStatus, NewJoinRequest, PublisherId,
            member_kind_for,
        },
    },
};

pub struct RequestJoinCommand {
    pub publisher_id: i64,
    pub message: Option<String>,
}

pub struct ReviewJoinRequestCommand {
    pub id: i64,
    pub approve: bool,
}

impl PublisherCommandService {
    pub async fn request_join(
        &self,
        actor: &AuthenticatedUser,
        command: RequestJoinCommand,
    ) -> ApplicationResult<JoinRequestDto> {
        let publisher = self
            .load_publisher(PublisherId::new(command.publisher_id)?)
            .await?;
        ensure_allowed(actor, Action::Join, Resource::Publisher(&publisher), "publishers")?;

        if publisher.has_member(actor.id) {
            return Err(ApplicationError::conflict(
                "you are already a member of this publisher",
            ));
        }
        if self
            .join_repo
            .find_pending(actor.id, publisher.id)
            .await?
            .is_some()
        {
            return Err(ApplicationError::conflict(
                "a pending join request already exists",
            ));
        }

        let message = command
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        let request = self
            .join_repo
            .insert(NewJoinRequest {
                requester_id: actor.id,
                publisher_id: publisher.id,
                message,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(
            join_request_id = i64::from(request.id),
            publisher_id = %publisher.id,
            requester_id = %actor.id,
            "join request filed"
        );
        Ok(request.into())
    }

    /// Approving adds the requester to the publisher's journalists or
    /// editors, depending on their role.
    pub async fn review_join_request(
        &self,
        actor: &AuthenticatedUser,
        command: ReviewJoinRequestCommand,
    ) -> ApplicationResult<JoinRequestDto> {
        let id = JoinRequestId::new(command.id)?;
        let mut request = self
            .join_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("join request not found"))?;
        let publisher = self.load_publisher(request.publisher_id).await?;
        ensure_allowed(
            actor,
            Action::ReviewJoinRequests,
            Resource::JoinRequestsOf(&publisher),
            "join requests of this publisher",
        )?;

        let outcome = if command.approve {
            JoinRequestStatus::Approved
        } else {
            JoinRequestStatus::Rejected
        };
        let now = self.clock.now();
        request.review(outcome, actor.id, now)?;

        let grant = if command.approve {
            let requester = self
                .user_repo
                .find_by_id(request.requester_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("requesting user no longer exists"))?;
            Some(member_kind_for(requester.role).ok_or_else(|| {
                ApplicationError::invalid_state(format!(
                    "a {} cannot join a publisher",
                    requester.role
                ))
            })?)
        } else {
            None
        };

        let reviewed = self
            .join_repo
            .record_review(JoinRequestReview {
                id,
                outcome,
                reviewed_by: actor.id,
                reviewed_at: now,
                grant,
            })
            .await?;
        tracing::info!(
            join_request_id = command.id,
            publisher_id = %publisher.id,
            outcome = %outcome,
            "join request reviewed"
        );
        Ok(reviewed.into())
    }
}
