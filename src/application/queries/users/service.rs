use std::sync::Arc;

use crate::{
    application::{dto::UserDto, error::ApplicationResult, ports::time::Clock},
    domain::user::{Role, UserRepository},
};

pub struct UserQueryService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }

    /// Public directory of journalists, the targets readers can follow.
    pub async fn list_journalists(&self) -> ApplicationResult<Vec<UserDto>> {
        let users = self.user_repo.list_by_role(Role::Journalist).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}
