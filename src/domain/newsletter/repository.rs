use crate::domain::errors::DomainResult;
use crate::domain::newsletter::entity::{NewNewsletter, Newsletter, NewsletterUpdate};
use crate::domain::newsletter::value_objects::NewsletterId;
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct NewsletterFilter {
    pub publisher_id: Option<PublisherId>,
    pub author_id: Option<UserId>,
}

#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn insert(&self, newsletter: NewNewsletter) -> DomainResult<Newsletter>;
    async fn update(&self, update: NewsletterUpdate) -> DomainResult<Newsletter>;
    async fn delete(&self, id: NewsletterId) -> DomainResult<()>;
    async fn find_by_id(&self, id: NewsletterId) -> DomainResult<Option<Newsletter>>;
    /// Newest publication first; unknown ids are skipped.
    async fn find_many(&self, ids: &[NewsletterId]) -> DomainResult<Vec<Newsletter>>;
    /// Newest publication first.
    async fn list(&self, filter: NewsletterFilter) -> DomainResult<Vec<Newsletter>>;
}
