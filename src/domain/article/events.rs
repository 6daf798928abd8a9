use crate::domain::article::entity::Article;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Emitted once an approval has been committed. `event_id` identifies the
/// approval across redeliveries.
#[derive(Debug, Clone)]
pub struct ArticleApproved {
    pub event_id: Uuid,
    pub article: Article,
    pub approved_by: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl ArticleApproved {
    pub fn new(article: Article, approved_by: UserId, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            article,
            approved_by,
            occurred_at,
        }
    }
}
