use crate::domain::publisher::{JoinRequestStatus, Publisher, PublisherJoinRequest};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublisherDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub established_date: Option<NaiveDate>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    pub editors: Vec<i64>,
    pub journalists: Vec<i64>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Publisher> for PublisherDto {
    fn from(publisher: Publisher) -> Self {
        Self {
            id: publisher.id.into(),
            name: publisher.name.into(),
            description: publisher.description,
            website: publisher.website.map(Into::into),
            established_date: publisher.established_date,
            owner_id: publisher.owner_id.map(Into::into),
            editors: publisher.editors.into_iter().map(Into::into).collect(),
            journalists: publisher.journalists.into_iter().map(Into::into).collect(),
            created_at: publisher.created_at,
            updated_at: publisher.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JoinRequestDto {
    pub id: i64,
    pub requester_id: i64,
    pub publisher_id: i64,
    pub status: JoinRequestStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<i64>,
    #[serde(default, with = "serde_time::option")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<PublisherJoinRequest> for JoinRequestDto {
    fn from(request: PublisherJoinRequest) -> Self {
        Self {
            id: request.id.into(),
            requester_id: request.requester_id.into(),
            publisher_id: request.publisher_id.into(),
            status: request.status,
            message: request.message,
            reviewed_by: request.reviewed_by.map(Into::into),
            reviewed_at: request.reviewed_at,
            created_at: request.created_at,
        }
    }
}
