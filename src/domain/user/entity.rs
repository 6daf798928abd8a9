// src/domain/user/entity.rs
use crate::domain::user::value_objects::{EmailAddress, Role, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Option<EmailAddress>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_journalist(&self) -> bool {
        self.role == Role::Journalist
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Option<EmailAddress>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
