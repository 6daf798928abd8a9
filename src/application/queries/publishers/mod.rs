use std::{str::FromStr, sync::Arc};

use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{AuthenticatedUser, JoinRequestDto, PublisherDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        authorization::{Action, Resource},
        errors::DomainError,
        publisher::{JoinRequestRepository, JoinRequestStatus, PublisherId, PublisherRepository},
    },
};

/// Status filter for join request listings; `All` disables filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinRequestFilter {
    #[default]
    Pending,
    Approved,
    Rejected,
    All,
}

impl JoinRequestFilter {
    const fn status(self) -> Option<JoinRequestStatus> {
        match self {
            Self::Pending => Some(JoinRequestStatus::Pending),
            Self::Approved => Some(JoinRequestStatus::Approved),
            Self::Rejected => Some(JoinRequestStatus::Rejected),
            Self::All => None,
        }
    }
}

impl FromStr for JoinRequestFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => Ok(match other.parse::<JoinRequestStatus>()? {
                JoinRequestStatus::Pending => Self::Pending,
                JoinRequestStatus::Approved => Self::Approved,
                JoinRequestStatus::Rejected => Self::Rejected,
            }),
        }
    }
}

pub struct ListJoinRequestsQuery {
    pub publisher_id: i64,
    pub filter: JoinRequestFilter,
}

pub struct PublisherQueryService {
    publisher_repo: Arc<dyn PublisherRepository>,
    join_repo: Arc<dyn JoinRequestRepository>,
}

impl PublisherQueryService {
    pub fn new(
        publisher_repo: Arc<dyn PublisherRepository>,
        join_repo: Arc<dyn JoinRequestRepository>,
    ) -> Self {
        Self {
            publisher_repo,
            join_repo,
        }
    }

    pub async fn get_publisher(&self, id: i64) -> ApplicationResult<PublisherDto> {
        let id = PublisherId::new(id)?;
        self.publisher_repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("publisher not found"))
    }

    pub async fn list_publishers(&self) -> ApplicationResult<Vec<PublisherDto>> {
        let records = self.publisher_repo.list().await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Owner-only view of the requests addressed to a publisher.
    pub async fn list_join_requests(
        &self,
        actor: &AuthenticatedUser,
        query: ListJoinRequestsQuery,
    ) -> ApplicationResult<Vec<JoinRequestDto>> {
        let id = PublisherId::new(query.publisher_id)?;
        let publisher = self
            .publisher_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("publisher not found"))?;
        ensure_allowed(
            actor,
            Action::ReviewJoinRequests,
            Resource::JoinRequestsOf(&publisher),
            "join requests of this publisher",
        )?;

        let records = self
            .join_repo
            .list_for_publisher(id, query.filter.status())
            .await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
