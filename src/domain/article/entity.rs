// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleContent, ArticleId, ArticleStatus, ArticleSummary, ArticleTitle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Editorial state of an article. The approving editor and the
/// publication time only exist on `Approved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Review {
    Pending,
    Approved {
        editor: UserId,
        published_at: DateTime<Utc>,
    },
    Rejected {
        editor: UserId,
        reason: Option<String>,
        rejected_at: DateTime<Utc>,
    },
}

impl Review {
    pub const fn status(&self) -> ArticleStatus {
        match self {
            Self::Pending => ArticleStatus::Pending,
            Self::Approved { .. } => ArticleStatus::Approved,
            Self::Rejected { .. } => ArticleStatus::Rejected,
        }
    }

    /// Rebuilds the state from its flattened storage columns, refusing
    /// combinations where approval fields and status disagree.
    pub fn from_parts(
        status: ArticleStatus,
        approved_by: Option<UserId>,
        published_at: Option<DateTime<Utc>>,
        rejected_by: Option<UserId>,
        rejection_reason: Option<String>,
        rejected_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        match (status, approved_by, published_at) {
            (ArticleStatus::Approved, Some(editor), Some(published_at)) => Ok(Self::Approved {
                editor,
                published_at,
            }),
            (ArticleStatus::Approved, _, _) => Err(DomainError::Persistence(
                "approved article is missing approver or publication time".into(),
            )),
            (_, Some(_), _) | (_, _, Some(_)) => Err(DomainError::Persistence(format!(
                "{status} article carries approval fields"
            ))),
            (ArticleStatus::Pending, None, None) => Ok(Self::Pending),
            (ArticleStatus::Rejected, None, None) => match (rejected_by, rejected_at) {
                (Some(editor), Some(rejected_at)) => Ok(Self::Rejected {
                    editor,
                    reason: rejection_reason,
                    rejected_at,
                }),
                _ => Err(DomainError::Persistence(
                    "rejected article is missing reviewer or rejection time".into(),
                )),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub summary: ArticleSummary,
    pub author_id: UserId,
    pub publisher_id: Option<PublisherId>,
    pub review: Review,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub const fn status(&self) -> ArticleStatus {
        self.review.status()
    }

    pub const fn is_approved(&self) -> bool {
        matches!(self.review, Review::Approved { .. })
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self.review, Review::Pending)
    }

    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    pub const fn approved_by(&self) -> Option<UserId> {
        match self.review {
            Review::Approved { editor, .. } => Some(editor),
            _ => None,
        }
    }

    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        match self.review {
            Review::Approved { published_at, .. } => Some(published_at),
            _ => None,
        }
    }

    pub fn approve(&mut self, editor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.expect_status(ArticleStatus::Pending, "approved")?;
        self.review = Review::Approved {
            editor,
            published_at: now,
        };
        self.updated_at = now;
        Ok(())
    }

    pub fn reject(
        &mut self,
        editor: UserId,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.expect_status(ArticleStatus::Pending, "rejected")?;
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self.review = Review::Rejected {
            editor,
            reason,
            rejected_at: now,
        };
        self.updated_at = now;
        Ok(())
    }

    pub fn resubmit(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.expect_status(ArticleStatus::Rejected, "resubmitted")?;
        self.review = Review::Pending;
        self.updated_at = now;
        Ok(())
    }

    fn expect_status(&self, expected: ArticleStatus, verb: &str) -> DomainResult<()> {
        let current = self.status();
        if current == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidState(format!(
                "article {} is {current} and cannot be {verb}",
                self.id
            )))
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub summary: ArticleSummary,
    pub author_id: UserId,
    pub publisher_id: Option<PublisherId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub content: Option<ArticleContent>,
    pub summary: Option<ArticleSummary>,
    pub publisher_id: Option<Option<PublisherId>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            content: None,
            summary: None,
            publisher_id: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_content(mut self, content: ArticleContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_summary(mut self, summary: ArticleSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_publisher(mut self, publisher_id: Option<PublisherId>) -> Self {
        self.publisher_id = Some(publisher_id);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.summary.is_none()
            && self.publisher_id.is_none()
    }
}

/// A review-state change applied only if the stored status still equals
/// `expected`.
#[derive(Debug, Clone)]
pub struct ArticleTransition {
    pub id: ArticleId,
    pub expected: ArticleStatus,
    pub review: Review,
    pub updated_at: DateTime<Utc>,
}

impl ArticleTransition {
    /// Captures the change already applied to `article` in memory.
    pub fn from_article(article: &Article, expected: ArticleStatus) -> Self {
        Self {
            id: article.id,
            expected,
            review: article.review.clone(),
            updated_at: article.updated_at,
        }
    }
}
