// tests/support/mocks/memory.rs
//! One shared in-memory store implementing every repository port with the
//! same conflict and check-and-set behaviour as the Postgres adapters.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

use newsroom::application::{
    ApplicationResult, error::ApplicationError, ports::notifications::NotificationLedger,
};
use newsroom::domain::article::{
    Article, ArticleFeedQuery, ArticleId, ArticleListQuery, ArticleReadRepository,
    ArticleTransition, ArticleUpdate, ArticleVisibility, ArticleWriteRepository, NewArticle,
    Review,
};
use newsroom::domain::errors::{DomainError, DomainResult};
use newsroom::domain::newsletter::{
    NewNewsletter, Newsletter, NewsletterFilter, NewsletterId, NewsletterRepository,
    NewsletterUpdate,
};
use newsroom::domain::publisher::{
    JoinRequestId, JoinRequestRepository, JoinRequestReview, JoinRequestStatus, MemberKind,
    NewJoinRequest, NewPublisher, Publisher, PublisherId, PublisherJoinRequest,
    PublisherRepository, PublisherUpdate,
};
use newsroom::domain::subscription::{
    ReaderSubscriptions, SubscriptionRepository, SubscriptionTarget,
};
use newsroom::domain::user::{NewUser, Role, User, UserId, UserRepository, Username};

#[derive(Default)]
struct State {
    next_id: i64,
    users: HashMap<UserId, User>,
    articles: HashMap<ArticleId, Article>,
    newsletters: HashMap<NewsletterId, Newsletter>,
    publishers: HashMap<PublisherId, Publisher>,
    join_requests: HashMap<JoinRequestId, PublisherJoinRequest>,
    subscriptions: BTreeSet<(UserId, SubscriptionKey)>,
    deliveries: HashSet<(Uuid, UserId)>,
    unreachable_ledger: HashSet<UserId>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SubscriptionKey {
    Publisher(PublisherId),
    Journalist(UserId),
    Newsletter(NewsletterId),
}

impl From<SubscriptionTarget> for SubscriptionKey {
    fn from(value: SubscriptionTarget) -> Self {
        match value {
            SubscriptionTarget::Publisher(id) => Self::Publisher(id),
            SubscriptionTarget::Journalist(id) => Self::Journalist(id),
            SubscriptionTarget::Newsletter(id) => Self::Newsletter(id),
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fully built article as-is, for fixtures that need a given
    /// review state or timestamp.
    pub fn put_article(&self, article: Article) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(article.id.into());
        state.articles.insert(article.id, article);
    }

    pub fn article(&self, id: ArticleId) -> Option<Article> {
        self.state.lock().unwrap().articles.get(&id).cloned()
    }

    pub fn delivery_count(&self) -> usize {
        self.state.lock().unwrap().deliveries.len()
    }

    /// Makes ledger claims for `reader` fail as if the database dropped out.
    pub fn fail_claims_for(&self, reader: UserId) {
        self.state.lock().unwrap().unreachable_ledger.insert(reader);
    }
}

fn visible(article: &Article, visibility: ArticleVisibility) -> bool {
    match visibility {
        ArticleVisibility::All => true,
        ArticleVisibility::ApprovedOnly => article.is_approved(),
        ArticleVisibility::ApprovedOrAuthoredBy(user) => {
            article.is_approved() || article.is_authored_by(user)
        }
    }
}

fn before_cursor(sort_at: DateTime<Utc>, id: i64, cursor: Option<(DateTime<Utc>, i64)>) -> bool {
    cursor.is_none_or(|(at, cid)| (sort_at, id) < (at, cid))
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut state = self.state.lock().unwrap();
        if state
            .users
            .values()
            .any(|u| u.username.as_str() == new_user.username.as_str())
        {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let id = UserId::new(state.next_id()).unwrap();
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            role: new_user.role,
            created_at: new_user.created_at,
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .find(|u| u.username.as_str() == username.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut users: Vec<User> = ids.iter().filter_map(|id| state.users.get(id).cloned()).collect();
        users.sort_by_key(|u| u.id);
        users.dedup_by_key(|u| u.id);
        Ok(users)
    }

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut users: Vec<User> = state.users.values().filter(|u| u.role == role).cloned().collect();
        users.sort_by(|a, b| a.username.as_str().cmp(b.username.as_str()));
        Ok(users)
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        if let Some(publisher_id) = article.publisher_id {
            if !state.publishers.contains_key(&publisher_id) {
                return Err(DomainError::NotFound("publisher not found".into()));
            }
        }
        let id = ArticleId::new(state.next_id()).unwrap();
        let stored = Article {
            id,
            title: article.title,
            content: article.content,
            summary: article.summary,
            author_id: article.author_id,
            publisher_id: article.publisher_id,
            review: Review::Pending,
            created_at: article.created_at,
            updated_at: article.created_at,
        };
        state.articles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        let article = state
            .articles
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if article.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "article was modified concurrently, please retry".into(),
            ));
        }
        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(content) = update.content {
            article.content = content;
        }
        if let Some(summary) = update.summary {
            article.summary = summary;
        }
        if let Some(publisher_id) = update.publisher_id {
            article.publisher_id = publisher_id;
        }
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .articles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }

    async fn transition(&self, transition: ArticleTransition) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        let article = state
            .articles
            .get_mut(&transition.id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if article.status() != transition.expected {
            return Err(DomainError::InvalidState(format!(
                "article {} is {} and cannot be changed",
                transition.id,
                article.status()
            )));
        }
        article.review = transition.review;
        article.updated_at = transition.updated_at;
        Ok(article.clone())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.article(id))
    }

    async fn list(&self, query: ArticleListQuery) -> DomainResult<Vec<Article>> {
        let state = self.state.lock().unwrap();
        let cursor = query.cursor.map(|c| (c.sort_at, c.id));
        let mut items: Vec<Article> = state
            .articles
            .values()
            .filter(|a| visible(a, query.visibility))
            .filter(|a| query.status.is_none_or(|s| a.status() == s))
            .filter(|a| query.publisher_id.is_none_or(|p| a.publisher_id == Some(p)))
            .filter(|a| query.author_id.is_none_or(|u| a.author_id == u))
            .filter(|a| before_cursor(a.created_at, a.id.into(), cursor))
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        items.truncate(query.limit as usize);
        Ok(items)
    }

    async fn feed(&self, query: ArticleFeedQuery) -> DomainResult<Vec<Article>> {
        let state = self.state.lock().unwrap();
        let cursor = query.cursor.map(|c| (c.sort_at, c.id));
        let mut items: Vec<(DateTime<Utc>, Article)> = state
            .articles
            .values()
            .filter_map(|a| a.published_at().map(|at| (at, a)))
            .filter(|(_, a)| {
                a.publisher_id.is_some_and(|p| query.publisher_ids.contains(&p))
                    || query.author_ids.contains(&a.author_id)
            })
            .filter(|(at, a)| before_cursor(*at, a.id.into(), cursor))
            .map(|(at, a)| (at, a.clone()))
            .collect();
        items.sort_by(|(at_a, a), (at_b, b)| (at_b, b.id.0).cmp(&(at_a, a.id.0)));
        items.truncate(query.limit as usize);
        Ok(items.into_iter().map(|(_, a)| a).collect())
    }
}

#[async_trait]
impl NewsletterRepository for InMemoryStore {
    async fn insert(&self, newsletter: NewNewsletter) -> DomainResult<Newsletter> {
        let mut state = self.state.lock().unwrap();
        let id = NewsletterId::new(state.next_id()).unwrap();
        let stored = Newsletter {
            id,
            title: newsletter.title,
            content: newsletter.content,
            author_id: newsletter.author_id,
            publisher_id: newsletter.publisher_id,
            published_at: newsletter.created_at,
            created_at: newsletter.created_at,
            updated_at: newsletter.created_at,
        };
        state.newsletters.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: NewsletterUpdate) -> DomainResult<Newsletter> {
        let mut state = self.state.lock().unwrap();
        let newsletter = state
            .newsletters
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("newsletter not found".into()))?;
        if newsletter.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "newsletter update conflict, please retry".into(),
            ));
        }
        if let Some(title) = update.title {
            newsletter.title = title;
        }
        if let Some(content) = update.content {
            newsletter.content = content;
        }
        if let Some(publisher_id) = update.publisher_id {
            newsletter.publisher_id = publisher_id;
        }
        newsletter.updated_at = update.updated_at;
        Ok(newsletter.clone())
    }

    async fn delete(&self, id: NewsletterId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .newsletters
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("newsletter not found".into()))
    }

    async fn find_by_id(&self, id: NewsletterId) -> DomainResult<Option<Newsletter>> {
        Ok(self.state.lock().unwrap().newsletters.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[NewsletterId]) -> DomainResult<Vec<Newsletter>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Newsletter> = ids
            .iter()
            .filter_map(|id| state.newsletters.get(id).cloned())
            .collect();
        items.sort_by(|a, b| (b.published_at, b.id.0).cmp(&(a.published_at, a.id.0)));
        Ok(items)
    }

    async fn list(&self, filter: NewsletterFilter) -> DomainResult<Vec<Newsletter>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Newsletter> = state
            .newsletters
            .values()
            .filter(|n| filter.publisher_id.is_none_or(|p| n.publisher_id == Some(p)))
            .filter(|n| filter.author_id.is_none_or(|a| n.author_id == a))
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.published_at, b.id.0).cmp(&(a.published_at, a.id.0)));
        Ok(items)
    }
}

#[async_trait]
impl PublisherRepository for InMemoryStore {
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher> {
        let mut state = self.state.lock().unwrap();
        if state
            .publishers
            .values()
            .any(|p| p.name.as_str() == publisher.name.as_str())
        {
            return Err(DomainError::Conflict("publisher name already exists".into()));
        }
        let id = PublisherId::new(state.next_id()).unwrap();
        let stored = Publisher {
            id,
            name: publisher.name,
            description: publisher.description,
            website: publisher.website,
            established_date: publisher.established_date,
            owner_id: Some(publisher.owner_id),
            editors: BTreeSet::new(),
            journalists: BTreeSet::new(),
            created_at: publisher.created_at,
            updated_at: publisher.created_at,
        };
        state.publishers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: PublisherUpdate) -> DomainResult<Publisher> {
        let mut state = self.state.lock().unwrap();
        if let Some(name) = &update.name {
            if state
                .publishers
                .values()
                .any(|p| p.id != update.id && p.name.as_str() == name.as_str())
            {
                return Err(DomainError::Conflict("publisher name already exists".into()));
            }
        }
        let publisher = state
            .publishers
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("publisher not found".into()))?;
        if let Some(name) = update.name {
            publisher.name = name;
        }
        if let Some(description) = update.description {
            publisher.description = description;
        }
        if let Some(website) = update.website {
            publisher.website = website;
        }
        if let Some(date) = update.established_date {
            publisher.established_date = date;
        }
        publisher.updated_at = update.updated_at;
        Ok(publisher.clone())
    }

    async fn find_by_id(&self, id: PublisherId) -> DomainResult<Option<Publisher>> {
        Ok(self.state.lock().unwrap().publishers.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[PublisherId]) -> DomainResult<Vec<Publisher>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Publisher> = ids
            .iter()
            .filter_map(|id| state.publishers.get(id).cloned())
            .collect();
        items.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        items.dedup_by_key(|p| p.id);
        Ok(items)
    }

    async fn list(&self) -> DomainResult<Vec<Publisher>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Publisher> = state.publishers.values().cloned().collect();
        items.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(items)
    }

    async fn add_member(
        &self,
        id: PublisherId,
        user_id: UserId,
        kind: MemberKind,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let publisher = state
            .publishers
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("publisher not found".into()))?;
        match kind {
            MemberKind::Editor => publisher.editors.insert(user_id),
            MemberKind::Journalist => publisher.journalists.insert(user_id),
        };
        Ok(())
    }
}

#[async_trait]
impl JoinRequestRepository for InMemoryStore {
    async fn insert(&self, request: NewJoinRequest) -> DomainResult<PublisherJoinRequest> {
        let mut state = self.state.lock().unwrap();
        if state.join_requests.values().any(|r| {
            r.requester_id == request.requester_id
                && r.publisher_id == request.publisher_id
                && r.status == JoinRequestStatus::Pending
        }) {
            return Err(DomainError::Conflict(
                "a pending join request already exists".into(),
            ));
        }
        let id = JoinRequestId::new(state.next_id()).unwrap();
        let stored = PublisherJoinRequest {
            id,
            requester_id: request.requester_id,
            publisher_id: request.publisher_id,
            status: JoinRequestStatus::Pending,
            message: request.message,
            reviewed_by: None,
            reviewed_at: None,
            created_at: request.created_at,
        };
        state.join_requests.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: JoinRequestId) -> DomainResult<Option<PublisherJoinRequest>> {
        Ok(self.state.lock().unwrap().join_requests.get(&id).cloned())
    }

    async fn find_pending(
        &self,
        requester_id: UserId,
        publisher_id: PublisherId,
    ) -> DomainResult<Option<PublisherJoinRequest>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .join_requests
            .values()
            .find(|r| {
                r.requester_id == requester_id
                    && r.publisher_id == publisher_id
                    && r.status == JoinRequestStatus::Pending
            })
            .cloned())
    }

    async fn list_for_publisher(
        &self,
        publisher_id: PublisherId,
        status: Option<JoinRequestStatus>,
    ) -> DomainResult<Vec<PublisherJoinRequest>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<PublisherJoinRequest> = state
            .join_requests
            .values()
            .filter(|r| r.publisher_id == publisher_id)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        Ok(items)
    }

    async fn record_review(
        &self,
        review: JoinRequestReview,
    ) -> DomainResult<PublisherJoinRequest> {
        let mut state = self.state.lock().unwrap();
        let request = state
            .join_requests
            .get(&review.id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound("join request not found".into()))?;
        if request.status != JoinRequestStatus::Pending {
            return Err(DomainError::InvalidState(
                "join request has already been reviewed".into(),
            ));
        }
        if let Some(kind) = review.grant {
            let publisher = state
                .publishers
                .get_mut(&request.publisher_id)
                .ok_or_else(|| DomainError::NotFound("publisher not found".into()))?;
            match kind {
                MemberKind::Editor => publisher.editors.insert(request.requester_id),
                MemberKind::Journalist => publisher.journalists.insert(request.requester_id),
            };
        }
        let stored = state
            .join_requests
            .get_mut(&review.id)
            .ok_or_else(|| DomainError::NotFound("join request not found".into()))?;
        stored.status = review.outcome;
        stored.reviewed_by = Some(review.reviewed_by);
        stored.reviewed_at = Some(review.reviewed_at);
        Ok(stored.clone())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn add(&self, reader_id: UserId, target: SubscriptionTarget) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state.subscriptions.insert((reader_id, target.into())))
    }

    async fn remove(&self, reader_id: UserId, target: SubscriptionTarget) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state.subscriptions.remove(&(reader_id, target.into())))
    }

    async fn list_for_reader(&self, reader_id: UserId) -> DomainResult<ReaderSubscriptions> {
        let state = self.state.lock().unwrap();
        let mut follows = ReaderSubscriptions::default();
        for (reader, key) in &state.subscriptions {
            if *reader != reader_id {
                continue;
            }
            match key {
                SubscriptionKey::Publisher(id) => follows.publishers.push(*id),
                SubscriptionKey::Journalist(id) => follows.journalists.push(*id),
                SubscriptionKey::Newsletter(id) => follows.newsletters.push(*id),
            }
        }
        Ok(follows)
    }

    async fn subscribers_of(&self, target: SubscriptionTarget) -> DomainResult<Vec<UserId>> {
        let state = self.state.lock().unwrap();
        let key = SubscriptionKey::from(target);
        Ok(state
            .subscriptions
            .iter()
            .filter(|(_, k)| *k == key)
            .map(|(reader, _)| *reader)
            .collect())
    }
}

#[async_trait]
impl NotificationLedger for InMemoryStore {
    async fn claim(
        &self,
        event_id: Uuid,
        reader_id: UserId,
        _at: DateTime<Utc>,
    ) -> ApplicationResult<bool> {
        let mut state = self.state.lock().unwrap();
        if state.unreachable_ledger.contains(&reader_id) {
            return Err(ApplicationError::infrastructure("notification ledger unavailable"));
        }
        Ok(state.deliveries.insert((event_id, reader_id)))
    }

    async fn release(&self, event_id: Uuid, reader_id: UserId) -> ApplicationResult<()> {
        self.state.lock().unwrap().deliveries.remove(&(event_id, reader_id));
        Ok(())
    }
}
