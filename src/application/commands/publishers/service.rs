use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        publisher::{JoinRequestRepository, Publisher, PublisherId, PublisherRepository},
        user::UserRepository,
    },
};

pub struct PublisherCommandService {
    pub(super) publisher_repo: Arc<dyn PublisherRepository>,
    pub(super) join_repo: Arc<dyn JoinRequestRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PublisherCommandService {
    pub fn new(
        publisher_repo: Arc<dyn PublisherRepository>,
        join_repo: Arc<dyn JoinRequestRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            publisher_repo,
            join_repo,
            user_repo,
            clock,
        }
    }

    pub(super) async fn load_publisher(&self, id: PublisherId) -> ApplicationResult<Publisher> {
        self.publisher_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("publisher not found"))
    }
}
