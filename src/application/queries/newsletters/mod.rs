use std::sync::Arc;

use crate::{
    application::{
        dto::NewsletterDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        newsletter::{NewsletterFilter, NewsletterId, NewsletterRepository},
        publisher::PublisherId,
        user::UserId,
    },
};

#[derive(Debug, Default)]
pub struct ListNewslettersQuery {
    pub publisher_id: Option<i64>,
    pub author_id: Option<i64>,
}

/// Newsletters are public once written, so reads need no caller.
pub struct NewsletterQueryService {
    repo: Arc<dyn NewsletterRepository>,
}

impl NewsletterQueryService {
    pub fn new(repo: Arc<dyn NewsletterRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_newsletter(&self, id: i64) -> ApplicationResult<NewsletterDto> {
        let id = NewsletterId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("newsletter not found"))
    }

    pub async fn list_newsletters(
        &self,
        query: ListNewslettersQuery,
    ) -> ApplicationResult<Vec<NewsletterDto>> {
        let filter = NewsletterFilter {
            publisher_id: query.publisher_id.map(PublisherId::new).transpose()?,
            author_id: query.author_id.map(UserId::new).transpose()?,
        };
        let records = self.repo.list(filter).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
