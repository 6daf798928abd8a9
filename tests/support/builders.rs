// tests/support/builders.rs
use chrono::{DateTime, Duration, Utc};

use newsroom::domain::article::*;
use newsroom::domain::publisher::PublisherId;
use newsroom::domain::user::UserId;

use super::mocks::fixed_now;

/// Builds articles directly in a given review state, bypassing the
/// approval workflow.
pub struct ArticleBuilder {
    id: i64,
    title: String,
    author_id: i64,
    publisher_id: Option<i64>,
    review: Review,
    created_at: DateTime<Utc>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            id: 1,
            title: "Test Article".into(),
            author_id: 1,
            publisher_id: None,
            review: Review::Pending,
            created_at: fixed_now(),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn author(mut self, author_id: i64) -> Self {
        self.author_id = author_id;
        self
    }

    pub fn publisher(mut self, publisher_id: i64) -> Self {
        self.publisher_id = Some(publisher_id);
        self
    }

    /// Approved by user 99, `minutes` after the creation time.
    pub fn approved_after(mut self, minutes: i64) -> Self {
        self.review = Review::Approved {
            editor: UserId::new(99).unwrap(),
            published_at: self.created_at + Duration::minutes(minutes),
        };
        self
    }

    pub fn rejected(mut self, reason: &str) -> Self {
        self.review = Review::Rejected {
            editor: UserId::new(99).unwrap(),
            reason: Some(reason.into()),
            rejected_at: self.created_at,
        };
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Article {
        Article {
            id: ArticleId::new(self.id).unwrap(),
            title: ArticleTitle::new(self.title).unwrap(),
            content: ArticleContent::new("Test body").unwrap(),
            summary: ArticleSummary::default(),
            author_id: UserId::new(self.author_id).unwrap(),
            publisher_id: self.publisher_id.map(|id| PublisherId::new(id).unwrap()),
            review: self.review,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
