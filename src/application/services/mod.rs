// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            articles::ArticleCommandService, newsletters::NewsletterCommandService,
            publishers::PublisherCommandService, subscriptions::SubscriptionCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{events::ArticleEventConsumer, security::TokenManager, time::Clock},
        queries::{
            articles::ArticleQueryService, newsletters::NewsletterQueryService,
            publishers::PublisherQueryService, subscriptions::SubscriptionQueryService,
            users::UserQueryService,
        },
        ApplicationResult,
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        newsletter::NewsletterRepository,
        publisher::{JoinRequestRepository, PublisherRepository},
        subscription::SubscriptionRepository,
        user::UserRepository,
    },
};

/// Repository handles the services are wired from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub article_writes: Arc<dyn ArticleWriteRepository>,
    pub article_reads: Arc<dyn ArticleReadRepository>,
    pub newsletters: Arc<dyn NewsletterRepository>,
    pub publishers: Arc<dyn PublisherRepository>,
    pub join_requests: Arc<dyn JoinRequestRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub newsletter_commands: Arc<NewsletterCommandService>,
    pub newsletter_queries: Arc<NewsletterQueryService>,
    pub publisher_commands: Arc<PublisherCommandService>,
    pub publisher_queries: Arc<PublisherQueryService>,
    pub subscription_commands: Arc<SubscriptionCommandService>,
    pub subscription_queries: Arc<SubscriptionQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        article_events: Arc<dyn ArticleEventConsumer>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&repos.article_writes),
            Arc::clone(&repos.article_reads),
            Arc::clone(&repos.publishers),
            article_events,
            Arc::clone(&clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&repos.article_reads),
            Arc::clone(&repos.publishers),
            Arc::clone(&repos.users),
            Arc::clone(&repos.subscriptions),
        ));

        let newsletter_commands = Arc::new(NewsletterCommandService::new(
            Arc::clone(&repos.newsletters),
            Arc::clone(&repos.publishers),
            Arc::clone(&clock),
        ));
        let newsletter_queries =
            Arc::new(NewsletterQueryService::new(Arc::clone(&repos.newsletters)));

        let publisher_commands = Arc::new(PublisherCommandService::new(
            Arc::clone(&repos.publishers),
            Arc::clone(&repos.join_requests),
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));
        let publisher_queries = Arc::new(PublisherQueryService::new(
            Arc::clone(&repos.publishers),
            Arc::clone(&repos.join_requests),
        ));

        let subscription_commands = Arc::new(SubscriptionCommandService::new(
            Arc::clone(&repos.subscriptions),
            Arc::clone(&repos.publishers),
            Arc::clone(&repos.users),
            Arc::clone(&repos.newsletters),
        ));
        let subscription_queries = Arc::new(SubscriptionQueryService::new(
            Arc::clone(&repos.subscriptions),
            Arc::clone(&repos.publishers),
            Arc::clone(&repos.users),
            Arc::clone(&repos.newsletters),
        ));

        Self {
            user_commands,
            user_queries,
            article_commands,
            article_queries,
            newsletter_commands,
            newsletter_queries,
            publisher_commands,
            publisher_queries,
            subscription_commands,
            subscription_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Verifies a raw bearer token into the caller context.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
