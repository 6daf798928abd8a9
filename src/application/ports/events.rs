use crate::domain::article::ArticleApproved;
use async_trait::async_trait;

/// Receives article lifecycle events after the state change has been
/// committed. Consumers handle their own failures; nothing is returned to
/// the emitter.
#[async_trait]
pub trait ArticleEventConsumer: Send + Sync {
    async fn article_approved(&self, event: ArticleApproved);
}
