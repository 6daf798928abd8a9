// src/presentation/http/controllers/subscriptions.rs
use crate::application::{
    commands::subscriptions::{SubscribeCommand, SubscriptionTargetRef, UnsubscribeCommand},
    dto::{SubscriptionChangeDto, SubscriptionsDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    responses((status = 200, description = "Publishers, journalists and newsletters the caller follows.", body = SubscriptionsDto)),
    tag = "Subscriptions"
)]
pub async fn list_subscriptions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<SubscriptionsDto>> {
    state
        .services
        .subscription_queries
        .list_subscriptions(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/publishers/{id}",
    params(("id" = i64, Path, description = "Publisher id")),
    responses(
        (status = 201, description = "Subscribed.", body = SubscriptionChangeDto),
        (status = 200, description = "Already subscribed.", body = SubscriptionChangeDto),
        (status = 404, description = "No such publisher.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn subscribe_publisher(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<(StatusCode, Json<SubscriptionChangeDto>)> {
    subscribe(&state, &user, SubscriptionTargetRef::Publisher(id)).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/publishers/{id}",
    params(("id" = i64, Path, description = "Publisher id")),
    responses((status = 200, description = "Not subscribed any more.", body = SubscriptionChangeDto)),
    tag = "Subscriptions"
)]
pub async fn unsubscribe_publisher(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SubscriptionChangeDto>> {
    unsubscribe(&state, &user, SubscriptionTargetRef::Publisher(id)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/journalists/{id}",
    params(("id" = i64, Path, description = "Journalist user id")),
    responses(
        (status = 201, description = "Subscribed.", body = SubscriptionChangeDto),
        (status = 200, description = "Already subscribed.", body = SubscriptionChangeDto),
        (status = 404, description = "No such journalist.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn subscribe_journalist(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<(StatusCode, Json<SubscriptionChangeDto>)> {
    subscribe(&state, &user, SubscriptionTargetRef::Journalist(id)).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/journalists/{id}",
    params(("id" = i64, Path, description = "Journalist user id")),
    responses((status = 200, description = "Not subscribed any more.", body = SubscriptionChangeDto)),
    tag = "Subscriptions"
)]
pub async fn unsubscribe_journalist(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SubscriptionChangeDto>> {
    unsubscribe(&state, &user, SubscriptionTargetRef::Journalist(id)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/newsletters/{id}",
    params(("id" = i64, Path, description = "Newsletter id")),
    responses(
        (status = 201, description = "Subscribed.", body = SubscriptionChangeDto),
        (status = 200, description = "Already subscribed.", body = SubscriptionChangeDto),
        (status = 404, description = "No such newsletter.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn subscribe_newsletter(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<(StatusCode, Json<SubscriptionChangeDto>)> {
    subscribe(&state, &user, SubscriptionTargetRef::Newsletter(id)).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/newsletters/{id}",
    params(("id" = i64, Path, description = "Newsletter id")),
    responses((status = 200, description = "Not subscribed any more.", body = SubscriptionChangeDto)),
    tag = "Subscriptions"
)]
pub async fn unsubscribe_newsletter(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SubscriptionChangeDto>> {
    unsubscribe(&state, &user, SubscriptionTargetRef::Newsletter(id)).await
}

async fn subscribe(
    state: &HttpState,
    user: &crate::application::dto::AuthenticatedUser,
    target: SubscriptionTargetRef,
) -> HttpResult<(StatusCode, Json<SubscriptionChangeDto>)> {
    let change = state
        .services
        .subscription_commands
        .subscribe(user, SubscribeCommand { target })
        .await
        .into_http()?;
    let status = if change.changed {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(change)))
}

async fn unsubscribe(
    state: &HttpState,
    user: &crate::application::dto::AuthenticatedUser,
    target: SubscriptionTargetRef,
) -> HttpResult<Json<SubscriptionChangeDto>> {
    state
        .services
        .subscription_commands
        .unsubscribe(user, UnsubscribeCommand { target })
        .await
        .into_http()
        .map(Json)
}
