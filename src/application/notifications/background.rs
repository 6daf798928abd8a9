use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::task::TaskTracker;

use crate::{application::ports::events::ArticleEventConsumer, domain::article::ArticleApproved};

/// Runs the wrapped consumer on a tracked task so the emitter returns
/// immediately. Call [`drain`](Self::drain) on shutdown to let in-flight
/// notifications finish.
pub struct BackgroundEventConsumer {
    inner: Arc<dyn ArticleEventConsumer>,
    tasks: TaskTracker,
}

impl BackgroundEventConsumer {
    pub fn new(inner: Arc<dyn ArticleEventConsumer>) -> Self {
        Self {
            inner,
            tasks: TaskTracker::new(),
        }
    }

    /// Waits for every dispatch spawned so far. Events arriving afterwards
    /// still run.
    pub async fn drain(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}

#[async_trait]
impl ArticleEventConsumer for BackgroundEventConsumer {
    async fn article_approved(&self, event: ArticleApproved) {
        let inner = Arc::clone(&self.inner);
        self.tasks.spawn(async move {
            inner.article_approved(event).await;
        });
    }
}
