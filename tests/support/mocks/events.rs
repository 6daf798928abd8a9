// tests/support/mocks/events.rs
use async_trait::async_trait;
use newsroom::application::ports::events::ArticleEventConsumer;
use newsroom::domain::article::ArticleApproved;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingEventConsumer {
    events: Mutex<Vec<ArticleApproved>>,
}

impl RecordingEventConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn approved(&self) -> Vec<ArticleApproved> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleEventConsumer for RecordingEventConsumer {
    async fn article_approved(&self, event: ArticleApproved) {
        self.events.lock().unwrap().push(event);
    }
}
