// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, newsletters, publishers, subscriptions, users},
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// CORS open to any origin; used by tests and tooling.
pub fn build_router_with_rate_limiter(state: HttpState, enable_rate_limiter: bool) -> Router {
    build_router_with_options(state, enable_rate_limiter, &[])
}

/// An empty `allowed_origins` list allows any origin.
pub fn build_router_with_options(
    state: HttpState,
    enable_rate_limiter: bool,
    allowed_origins: &[String],
) -> Router {
    let mut router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(api_routes());

    if enable_rate_limiter {
        if let Some(limiter) = rate_limit_layer() {
            router = router.layer(limiter);
        } else {
            tracing::warn!("rate limiter configuration rejected; continuing without it");
        }
    }

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn api_routes() -> Router {
    Router::new()
        .route("/api/v1/users", post(users::register))
        .route("/api/v1/users/me", get(users::profile))
        .route("/api/v1/journalists", get(users::list_journalists))
        .route(
            "/api/v1/journalists/{id}/articles",
            get(users::journalist_articles),
        )
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/articles/pending",
            get(articles::list_pending_articles),
        )
        .route("/api/v1/articles/feed", get(articles::subscription_feed))
        .route(
            "/api/v1/articles/{id}",
            get(articles::get_article)
                .patch(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/api/v1/articles/{id}/approve",
            post(articles::approve_article),
        )
        .route("/api/v1/articles/{id}/reject", post(articles::reject_article))
        .route(
            "/api/v1/articles/{id}/resubmit",
            post(articles::resubmit_article),
        )
        .route(
            "/api/v1/newsletters",
            get(newsletters::list_newsletters).post(newsletters::create_newsletter),
        )
        .route(
            "/api/v1/newsletters/{id}",
            get(newsletters::get_newsletter)
                .patch(newsletters::update_newsletter)
                .delete(newsletters::delete_newsletter),
        )
        .route(
            "/api/v1/publishers",
            get(publishers::list_publishers).post(publishers::create_publisher),
        )
        .route(
            "/api/v1/publishers/{id}",
            get(publishers::get_publisher).patch(publishers::update_publisher),
        )
        .route(
            "/api/v1/publishers/{id}/articles",
            get(publishers::publisher_articles),
        )
        .route(
            "/api/v1/publishers/{id}/join-requests",
            get(publishers::list_join_requests).post(publishers::request_join),
        )
        .route(
            "/api/v1/join-requests/{id}/approve",
            post(publishers::approve_join_request),
        )
        .route(
            "/api/v1/join-requests/{id}/reject",
            post(publishers::reject_join_request),
        )
        .route(
            "/api/v1/subscriptions",
            get(subscriptions::list_subscriptions),
        )
        .route(
            "/api/v1/subscriptions/publishers/{id}",
            post(subscriptions::subscribe_publisher).delete(subscriptions::unsubscribe_publisher),
        )
        .route(
            "/api/v1/subscriptions/journalists/{id}",
            post(subscriptions::subscribe_journalist)
                .delete(subscriptions::unsubscribe_journalist),
        )
        .route(
            "/api/v1/subscriptions/newsletters/{id}",
            post(subscriptions::subscribe_newsletter)
                .delete(subscriptions::unsubscribe_newsletter),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
