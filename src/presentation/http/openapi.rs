// src/presentation/http/openapi.rs
use crate::application::dto::ArticleDto;
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Documented shape of `CursorPage<ArticleDto>`; handlers return the page
/// itself.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleListResponse {
    pub items: Vec<ArticleDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::users::register,
        crate::presentation::http::controllers::users::profile,
        crate::presentation::http::controllers::users::list_journalists,
        crate::presentation::http::controllers::users::journalist_articles,
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::list_pending_articles,
        crate::presentation::http::controllers::articles::subscription_feed,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::articles::approve_article,
        crate::presentation::http::controllers::articles::reject_article,
        crate::presentation::http::controllers::articles::resubmit_article,
        crate::presentation::http::controllers::newsletters::list_newsletters,
        crate::presentation::http::controllers::newsletters::get_newsletter,
        crate::presentation::http::controllers::newsletters::create_newsletter,
        crate::presentation::http::controllers::newsletters::update_newsletter,
        crate::presentation::http::controllers::newsletters::delete_newsletter,
        crate::presentation::http::controllers::publishers::list_publishers,
        crate::presentation::http::controllers::publishers::get_publisher,
        crate::presentation::http::controllers::publishers::create_publisher,
        crate::presentation::http::controllers::publishers::update_publisher,
        crate::presentation::http::controllers::publishers::publisher_articles,
        crate::presentation::http::controllers::publishers::request_join,
        crate::presentation::http::controllers::publishers::list_join_requests,
        crate::presentation::http::controllers::publishers::approve_join_request,
        crate::presentation::http::controllers::publishers::reject_join_request,
        crate::presentation::http::controllers::subscriptions::list_subscriptions,
        crate::presentation::http::controllers::subscriptions::subscribe_publisher,
        crate::presentation::http::controllers::subscriptions::unsubscribe_publisher,
        crate::presentation::http::controllers::subscriptions::subscribe_journalist,
        crate::presentation::http::controllers::subscriptions::unsubscribe_journalist,
        crate::presentation::http::controllers::subscriptions::subscribe_newsletter,
        crate::presentation::http::controllers::subscriptions::unsubscribe_newsletter
    ),
    components(
        schemas(
            StatusResponse,
            ArticleListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::users::RegisterRequest,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::UpdateArticleRequest,
            crate::presentation::http::controllers::articles::RejectArticleRequest,
            crate::presentation::http::controllers::newsletters::CreateNewsletterRequest,
            crate::presentation::http::controllers::newsletters::UpdateNewsletterRequest,
            crate::presentation::http::controllers::publishers::CreatePublisherRequest,
            crate::presentation::http::controllers::publishers::UpdatePublisherRequest,
            crate::presentation::http::controllers::publishers::JoinRequestBody,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::ArticleDto,
            crate::application::dto::RejectionDto,
            crate::application::dto::NewsletterDto,
            crate::application::dto::PublisherDto,
            crate::application::dto::JoinRequestDto,
            crate::application::dto::SubscriptionsDto,
            crate::application::dto::SubscriptionChangeDto,
            crate::domain::user::Role,
            crate::domain::article::ArticleStatus,
            crate::domain::publisher::JoinRequestStatus
        )
    ),
    tags(
        (name = "Users", description = "Accounts and journalist directory"),
        (name = "Articles", description = "Article submission and reading"),
        (name = "Review", description = "Editorial approval workflow"),
        (name = "Newsletters", description = "Journalist newsletters"),
        (name = "Publishers", description = "Publishers, members and join requests"),
        (name = "Subscriptions", description = "Reader subscriptions"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Newsroom API",
        description = "Editorial workflow backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();
        let url = env::var("PUBLIC_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "http://localhost:8080".to_string());
        servers.push(Server::new(url));
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Writes the document to `OPENAPI_SNAPSHOT_PATH` (default
/// `spec/openapi.json`) and returns the path used.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}
