use crate::application::ApplicationResult;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Record of which reader has been notified about which event.
#[async_trait]
pub trait NotificationLedger: Send + Sync {
    /// Returns `true` if this call claimed the pair, `false` if it was
    /// already claimed.
    async fn claim(
        &self,
        event_id: Uuid,
        reader_id: UserId,
        at: DateTime<Utc>,
    ) -> ApplicationResult<bool>;
    /// Gives a claim back after a failed send so a redelivery can retry.
    async fn release(&self, event_id: Uuid, reader_id: UserId) -> ApplicationResult<()>;
}
