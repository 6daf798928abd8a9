use crate::domain::errors::DomainResult;
use crate::domain::publisher::entity::{
    NewJoinRequest, NewPublisher, Publisher, PublisherJoinRequest, PublisherUpdate,
};
use crate::domain::publisher::value_objects::{
    JoinRequestId, JoinRequestStatus, MemberKind, PublisherId,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct JoinRequestReview {
    pub id: JoinRequestId,
    pub outcome: JoinRequestStatus,
    pub reviewed_by: UserId,
    pub reviewed_at: DateTime<Utc>,
    pub grant: Option<MemberKind>,
}

#[async_trait]
pub trait PublisherRepository: Send + Sync {
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher>;
    async fn update(&self, update: PublisherUpdate) -> DomainResult<Publisher>;
    async fn find_by_id(&self, id: PublisherId) -> DomainResult<Option<Publisher>>;
    async fn find_many(&self, ids: &[PublisherId]) -> DomainResult<Vec<Publisher>>;
    async fn list(&self) -> DomainResult<Vec<Publisher>>;
    /// Idempotent: adding an existing member is a no-op.
    async fn add_member(
        &self,
        id: PublisherId,
        user_id: UserId,
        kind: MemberKind,
    ) -> DomainResult<()>;
}

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    async fn insert(&self, request: NewJoinRequest) -> DomainResult<PublisherJoinRequest>;
    async fn find_by_id(&self, id: JoinRequestId) -> DomainResult<Option<PublisherJoinRequest>>;
    async fn find_pending(
        &self,
        requester_id: UserId,
        publisher_id: PublisherId,
    ) -> DomainResult<Option<PublisherJoinRequest>>;
    async fn list_for_publisher(
        &self,
        publisher_id: PublisherId,
        status: Option<JoinRequestStatus>,
    ) -> DomainResult<Vec<PublisherJoinRequest>>;
    /// Conditional write: only a request still `pending` is updated, and
    /// `grant` adds the requester to the publisher in the same transaction.
    /// Fails with `InvalidState` when another reviewer got there first.
    async fn record_review(
        &self,
        review: JoinRequestReview,
    ) -> DomainResult<PublisherJoinRequest>;
}
