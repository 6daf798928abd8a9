use crate::domain::newsletter::value_objects::{NewsletterContent, NewsletterId, NewsletterTitle};
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Published on creation; newsletters skip editorial review.
#[derive(Debug, Clone)]
pub struct Newsletter {
    pub id: NewsletterId,
    pub title: NewsletterTitle,
    pub content: NewsletterContent,
    pub author_id: UserId,
    pub publisher_id: Option<PublisherId>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Newsletter {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewNewsletter {
    pub title: NewsletterTitle,
    pub content: NewsletterContent,
    pub author_id: UserId,
    pub publisher_id: Option<PublisherId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewsletterUpdate {
    pub id: NewsletterId,
    pub title: Option<NewsletterTitle>,
    pub content: Option<NewsletterContent>,
    pub publisher_id: Option<Option<PublisherId>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsletterUpdate {
    pub fn new(id: NewsletterId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            content: None,
            publisher_id: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: NewsletterTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_content(mut self, content: NewsletterContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_publisher(mut self, publisher_id: Option<PublisherId>) -> Self {
        self.publisher_id = Some(publisher_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.publisher_id.is_none()
    }
}
