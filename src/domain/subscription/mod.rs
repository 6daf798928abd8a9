use crate::domain::errors::DomainResult;
use crate::domain::newsletter::NewsletterId;
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use std::fmt;

/// What a reader can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionTarget {
    Publisher(PublisherId),
    Journalist(UserId),
    Newsletter(NewsletterId),
}

impl fmt::Display for SubscriptionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Publisher(id) => write!(f, "publisher {id}"),
            Self::Journalist(id) => write!(f, "journalist {id}"),
            Self::Newsletter(id) => write!(f, "newsletter {id}"),
        }
    }
}

/// Everything one reader follows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderSubscriptions {
    pub publishers: Vec<PublisherId>,
    pub journalists: Vec<UserId>,
    pub newsletters: Vec<NewsletterId>,
}

impl ReaderSubscriptions {
    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty() && self.journalists.is_empty() && self.newsletters.is_empty()
    }
}

/// Edge store between readers and what they follow. Adding and removing
/// edges is idempotent.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Returns `true` when a new edge was stored.
    async fn add(&self, reader_id: UserId, target: SubscriptionTarget) -> DomainResult<bool>;
    /// Returns `true` when an edge existed and was removed.
    async fn remove(&self, reader_id: UserId, target: SubscriptionTarget) -> DomainResult<bool>;
    async fn list_for_reader(&self, reader_id: UserId) -> DomainResult<ReaderSubscriptions>;
    async fn subscribers_of(&self, target: SubscriptionTarget) -> DomainResult<Vec<UserId>>;
}
