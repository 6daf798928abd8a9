use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User},
    value_objects::{Role, UserId, Username},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Missing ids are skipped rather than reported.
    async fn find_many(&self, ids: &[UserId]) -> DomainResult<Vec<User>>;

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>>;
}
