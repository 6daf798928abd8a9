// tests/support/helpers.rs
use std::sync::Arc;

use axum::{
    Router,
    body::{self, Body},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;

use newsroom::application::{
    commands::{
        articles::{ApproveArticleCommand, CreateArticleCommand},
        publishers::CreatePublisherCommand,
        users::RegisterUserCommand,
    },
    dto::{ArticleDto, AuthenticatedUser, PublisherDto, TokenSubject},
    notifications::NotificationDispatcher,
    ports::{events::ArticleEventConsumer, security::TokenManager},
    services::{ApplicationServices, Repositories},
};
use newsroom::domain::{
    publisher::{MemberKind, PublisherId, PublisherRepository},
    user::{Role, UserId},
};
use newsroom::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};

use super::mocks::{InMemoryStore, RecordingMailer, StaticTokenManager, TestClock};

/// A registered user together with a bearer token that resolves to them.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user: AuthenticatedUser,
    pub token: String,
}

impl Actor {
    pub fn id(&self) -> i64 {
        i64::from(self.user.id)
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Services wired to the in-memory store, with the dispatcher running
/// inline so mail is observable as soon as an approval returns.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub tokens: Arc<StaticTokenManager>,
    pub clock: Arc<TestClock>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub services: Arc<ApplicationServices>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let tokens = Arc::new(StaticTokenManager::new());
        let clock = Arc::new(TestClock::new());

        let dispatcher = Arc::new(NotificationDispatcher::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            mailer.clone(),
            clock.clone(),
        ));
        let events: Arc<dyn ArticleEventConsumer> = dispatcher.clone();

        let services = Arc::new(ApplicationServices::new(
            repositories(&store),
            events,
            tokens.clone(),
            clock.clone(),
        ));

        Self {
            store,
            mailer,
            tokens,
            clock,
            dispatcher,
            services,
        }
    }

    pub fn router(&self) -> Router {
        build_router_with_rate_limiter(
            HttpState {
                services: Arc::clone(&self.services),
            },
            false,
        )
    }

    pub async fn user(&self, username: &str, role: Role, email: Option<&str>) -> Actor {
        let dto = self
            .services
            .user_commands
            .register(RegisterUserCommand {
                username: username.into(),
                email: email.map(str::to_string),
                role: Some(role),
            })
            .await
            .expect("register user");
        let issued = self
            .tokens
            .issue(TokenSubject {
                user_id: UserId::new(dto.id).unwrap(),
                username: dto.username,
                role,
            })
            .await
            .expect("issue token");
        let user = self
            .tokens
            .authenticate(&issued.token)
            .await
            .expect("resolve token");
        Actor {
            user,
            token: issued.token,
        }
    }

    pub async fn reader(&self, username: &str) -> Actor {
        let email = format!("{username}@example.com");
        self.user(username, Role::Reader, Some(&email)).await
    }

    pub async fn journalist(&self, username: &str) -> Actor {
        let email = format!("{username}@example.com");
        self.user(username, Role::Journalist, Some(&email)).await
    }

    pub async fn editor(&self, username: &str) -> Actor {
        self.user(username, Role::Editor, None).await
    }

    pub async fn publisher(&self, owner: &Actor, name: &str) -> PublisherDto {
        self.services
            .publisher_commands
            .create_publisher(
                &owner.user,
                CreatePublisherCommand {
                    name: name.into(),
                    description: format!("{name} newsroom"),
                    website: None,
                    established_date: None,
                },
            )
            .await
            .expect("create publisher")
    }

    /// Adds a member without going through a join request.
    pub async fn enrol(&self, publisher_id: i64, member: &Actor, kind: MemberKind) {
        PublisherRepository::add_member(
            self.store.as_ref(),
            PublisherId::new(publisher_id).unwrap(),
            member.user.id,
            kind,
        )
        .await
        .expect("add member");
    }

    pub async fn submit(&self, author: &Actor, title: &str, publisher_id: Option<i64>) -> ArticleDto {
        let mut builder = CreateArticleCommand::builder()
            .title(title)
            .content(format!("{title}: full story"))
            .summary(format!("{title} in brief"));
        if let Some(id) = publisher_id {
            builder = builder.publisher_id(id);
        }
        self.services
            .article_commands
            .create_article(&author.user, builder.build().unwrap())
            .await
            .expect("create article")
    }

    pub async fn approve(&self, editor: &Actor, article_id: i64) -> ArticleDto {
        self.services
            .article_commands
            .approve_article(&editor.user, ApproveArticleCommand { id: article_id })
            .await
            .expect("approve article")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub fn repositories(store: &Arc<InMemoryStore>) -> Repositories {
    Repositories {
        users: store.clone(),
        article_writes: store.clone(),
        article_reads: store.clone(),
        newsletters: store.clone(),
        publishers: store.clone(),
        join_requests: store.clone(),
        subscriptions: store.clone(),
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Asserts that a response is an `ErrorResponse` with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
