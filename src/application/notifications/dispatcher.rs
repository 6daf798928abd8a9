use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;

use super::message::approval_message;
use crate::{
    application::{
        error::ApplicationResult,
        ports::{
            events::ArticleEventConsumer, mail::Mailer, notifications::NotificationLedger,
            time::Clock,
        },
    },
    domain::{
        article::ArticleApproved,
        publisher::PublisherRepository,
        subscription::{SubscriptionRepository, SubscriptionTarget},
        user::{UserId, UserRepository},
    },
};

/// Counts from one dispatch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub already_sent: usize,
    pub failed: usize,
    pub without_email: usize,
}

/// Mails every reader subscribed to an approved article's publisher or
/// author, at most once per `(event_id, reader_id)`.
pub struct NotificationDispatcher {
    subscription_repo: Arc<dyn SubscriptionRepository>,
    user_repo: Arc<dyn UserRepository>,
    publisher_repo: Arc<dyn PublisherRepository>,
    ledger: Arc<dyn NotificationLedger>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(
        subscription_repo: Arc<dyn SubscriptionRepository>,
        user_repo: Arc<dyn UserRepository>,
        publisher_repo: Arc<dyn PublisherRepository>,
        ledger: Arc<dyn NotificationLedger>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subscription_repo,
            user_repo,
            publisher_repo,
            ledger,
            mailer,
            clock,
        }
    }

    /// Readers following the publisher or the author, deduplicated, author
    /// excluded.
    pub async fn recipients(&self, event: &ArticleApproved) -> ApplicationResult<Vec<UserId>> {
        let article = &event.article;
        let mut readers = BTreeSet::new();
        if let Some(publisher_id) = article.publisher_id {
            readers.extend(
                self.subscription_repo
                    .subscribers_of(SubscriptionTarget::Publisher(publisher_id))
                    .await?,
            );
        }
        readers.extend(
            self.subscription_repo
                .subscribers_of(SubscriptionTarget::Journalist(article.author_id))
                .await?,
        );
        readers.remove(&article.author_id);
        Ok(readers.into_iter().collect())
    }

    pub async fn dispatch(&self, event: &ArticleApproved) -> ApplicationResult<DispatchReport> {
        let article = &event.article;
        let mut report = DispatchReport::default();

        let recipient_ids = self.recipients(event).await?;
        if recipient_ids.is_empty() {
            tracing::debug!(article_id = %article.id, event_id = %event.event_id, "no subscribers to notify");
            return Ok(report);
        }

        let author = self
            .user_repo
            .find_by_id(article.author_id)
            .await?
            .map_or_else(|| format!("user #{}", article.author_id), |u| u.username.into());
        let publisher = match article.publisher_id {
            Some(id) => self
                .publisher_repo
                .find_by_id(id)
                .await?
                .map(|p| String::from(p.name)),
            None => None,
        };

        for reader in self.user_repo.find_many(&recipient_ids).await? {
            let Some(email) = reader.email.clone() else {
                report.without_email += 1;
                tracing::debug!(event_id = %event.event_id, reader_id = %reader.id, "reader has no e-mail address");
                continue;
            };

            match self
                .ledger
                .claim(event.event_id, reader.id, self.clock.now())
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    report.already_sent += 1;
                    continue;
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        article_id = %article.id,
                        event_id = %event.event_id,
                        reader_id = %reader.id,
                        error = %err,
                        "could not claim notification"
                    );
                    continue;
                }
            }

            let message = approval_message(email, article, &author, publisher.as_deref());
            match self.mailer.send(message).await {
                Ok(()) => {
                    report.sent += 1;
                    tracing::info!(
                        article_id = %article.id,
                        event_id = %event.event_id,
                        reader_id = %reader.id,
                        "notification sent"
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        article_id = %article.id,
                        event_id = %event.event_id,
                        reader_id = %reader.id,
                        error = %err,
                        "notification failed"
                    );
                    if let Err(err) = self.ledger.release(event.event_id, reader.id).await {
                        tracing::warn!(
                            event_id = %event.event_id,
                            reader_id = %reader.id,
                            error = %err,
                            "could not release notification claim"
                        );
                    }
                }
            }
        }

        Ok(report)
    }
}

#[async_trait]
impl ArticleEventConsumer for NotificationDispatcher {
    async fn article_approved(&self, event: ArticleApproved) {
        match self.dispatch(&event).await {
            Ok(report) => tracing::info!(
                article_id = %event.article.id,
                event_id = %event.event_id,
                sent = report.sent,
                already_sent = report.already_sent,
                failed = report.failed,
                "approval notifications processed"
            ),
            Err(err) => tracing::warn!(
                article_id = %event.article.id,
                event_id = %event.event_id,
                error = %err,
                "approval notifications aborted"
            ),
        }
    }
}
