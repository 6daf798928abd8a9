// src/domain/publisher/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publisher::value_objects::{
    JoinRequestId, JoinRequestStatus, MemberKind, PublisherId, PublisherName, Website,
};
use crate::domain::user::{Role, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Publisher {
    pub id: PublisherId,
    pub name: PublisherName,
    pub description: String,
    pub website: Option<Website>,
    pub established_date: Option<NaiveDate>,
    pub owner_id: Option<UserId>,
    pub editors: BTreeSet<UserId>,
    pub journalists: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Publisher {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == Some(user_id)
    }

    pub fn has_journalist(&self, user_id: UserId) -> bool {
        self.journalists.contains(&user_id)
    }

    pub fn has_member(&self, user_id: UserId) -> bool {
        self.editors.contains(&user_id) || self.journalists.contains(&user_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewPublisher {
    pub name: PublisherName,
    pub description: String,
    pub website: Option<Website>,
    pub established_date: Option<NaiveDate>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PublisherUpdate {
    pub id: PublisherId,
    pub name: Option<PublisherName>,
    pub description: Option<String>,
    pub website: Option<Option<Website>>,
    pub established_date: Option<Option<NaiveDate>>,
    pub updated_at: DateTime<Utc>,
}

impl PublisherUpdate {
    pub fn new(id: PublisherId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            description: None,
            website: None,
            established_date: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: PublisherName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_website(mut self, website: Option<Website>) -> Self {
        self.website = Some(website);
        self
    }

    pub fn with_established_date(mut self, date: Option<NaiveDate>) -> Self {
        self.established_date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.website.is_none()
            && self.established_date.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct PublisherJoinRequest {
    pub id: JoinRequestId,
    pub requester_id: UserId,
    pub publisher_id: PublisherId,
    pub status: JoinRequestStatus,
    pub message: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PublisherJoinRequest {
    /// Moves a pending request to `outcome`. Reviewing twice is an error.
    pub fn review(
        &mut self,
        outcome: JoinRequestStatus,
        reviewer: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != JoinRequestStatus::Pending {
            return Err(DomainError::InvalidState(format!(
                "join request is already {}",
                self.status
            )));
        }
        if outcome == JoinRequestStatus::Pending {
            return Err(DomainError::Validation(
                "a review must approve or reject".into(),
            ));
        }
        self.status = outcome;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewJoinRequest {
    pub requester_id: UserId,
    pub publisher_id: PublisherId,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Member list a requester of the given role joins on approval.
pub fn member_kind_for(role: Role) -> Option<MemberKind> {
    match role {
        Role::Journalist => Some(MemberKind::Journalist),
        Role::Editor => Some(MemberKind::Editor),
        Role::Reader | Role::Publisher => None,
    }
}
