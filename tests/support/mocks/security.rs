// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use newsroom::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use std::collections::HashMap;
use std::sync::Mutex;

use super::time::fixed_now;

pub const EXPIRED_TOKEN: &str = "expired-token";

/// Hands out opaque `token-<id>` strings and resolves them from memory.
#[derive(Default)]
pub struct StaticTokenManager {
    issued: Mutex<HashMap<String, AuthenticatedUser>>,
}

impl StaticTokenManager {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = fixed_now();
        let expires_at = issued_at + Duration::hours(1);
        let token = format!("token-{}", subject.user_id);
        self.issued.lock().unwrap().insert(
            token.clone(),
            AuthenticatedUser {
                id: subject.user_id,
                username: subject.username,
                role: subject.role,
                issued_at,
                expires_at,
            },
        );
        Ok(AuthTokenDto {
            token,
            issued_at,
            expires_at,
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        if token == EXPIRED_TOKEN {
            return Err(ApplicationError::unauthorized("token expired"));
        }
        self.issued
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| ApplicationError::unauthorized("invalid token"))
    }
}
