use crate::domain::article::{Article, ArticleStatus, Review};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author_id: i64,
    #[serde(default)]
    pub publisher_id: Option<i64>,
    pub status: ArticleStatus,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default, with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionDto>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RejectionDto {
    pub rejected_by: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(with = "serde_time")]
    pub rejected_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        let status = article.status();
        let (approved_by, published_at, rejection) = match article.review {
            Review::Pending => (None, None, None),
            Review::Approved {
                editor,
                published_at,
            } => (Some(editor.into()), Some(published_at), None),
            Review::Rejected {
                editor,
                reason,
                rejected_at,
            } => (
                None,
                None,
                Some(RejectionDto {
                    rejected_by: editor.into(),
                    reason,
                    rejected_at,
                }),
            ),
        };
        Self {
            id: article.id.into(),
            title: article.title.into(),
            content: article.content.into(),
            summary: article.summary.into(),
            author_id: article.author_id.into(),
            publisher_id: article.publisher_id.map(Into::into),
            status,
            approved_by,
            published_at,
            rejection,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
