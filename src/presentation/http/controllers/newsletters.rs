// src/presentation/http/controllers/newsletters.rs
use super::present;
use crate::application::{
    commands::newsletters::{
        CreateNewsletterCommand, DeleteNewsletterCommand, UpdateNewsletterCommand,
    },
    dto::NewsletterDto,
    queries::newsletters::ListNewslettersQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsletterListParams {
    #[serde(default)]
    pub publisher_id: Option<i64>,
    #[serde(default)]
    pub author_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNewsletterRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub publisher_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNewsletterRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>, nullable)]
    pub publisher_id: Option<Option<i64>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/newsletters",
    params(NewsletterListParams),
    responses((status = 200, description = "Newsletters, newest first.", body = [NewsletterDto])),
    tag = "Newsletters"
)]
pub async fn list_newsletters(
    Extension(state): Extension<HttpState>,
    Query(params): Query<NewsletterListParams>,
) -> HttpResult<Json<Vec<NewsletterDto>>> {
    state
        .services
        .newsletter_queries
        .list_newsletters(ListNewslettersQuery {
            publisher_id: params.publisher_id,
            author_id: params.author_id,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/newsletters/{id}",
    params(("id" = i64, Path, description = "Newsletter id")),
    responses(
        (status = 200, description = "Newsletter.", body = NewsletterDto),
        (status = 404, description = "No such newsletter.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Newsletters"
)]
pub async fn get_newsletter(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<NewsletterDto>> {
    state
        .services
        .newsletter_queries
        .get_newsletter(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/newsletters",
    request_body = CreateNewsletterRequest,
    responses(
        (status = 201, description = "Newsletter created.", body = NewsletterDto),
        (status = 400, description = "Author is not a journalist of the publisher.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Only journalists write newsletters.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Newsletters"
)]
pub async fn create_newsletter(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateNewsletterRequest>,
) -> HttpResult<(StatusCode, Json<NewsletterDto>)> {
    let command = CreateNewsletterCommand {
        title: payload.title,
        content: payload.content,
        publisher_id: payload.publisher_id,
    };

    state
        .services
        .newsletter_commands
        .create_newsletter(&user, command)
        .await
        .into_http()
        .map(|newsletter| (StatusCode::CREATED, Json(newsletter)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/newsletters/{id}",
    params(("id" = i64, Path, description = "Newsletter id")),
    request_body = UpdateNewsletterRequest,
    responses(
        (status = 200, description = "Updated newsletter.", body = NewsletterDto),
        (status = 403, description = "Not allowed to edit this newsletter.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Newsletters"
)]
pub async fn update_newsletter(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNewsletterRequest>,
) -> HttpResult<Json<NewsletterDto>> {
    let command = UpdateNewsletterCommand {
        id,
        title: payload.title,
        content: payload.content,
        publisher_id: payload.publisher_id,
    };

    state
        .services
        .newsletter_commands
        .update_newsletter(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/newsletters/{id}",
    params(("id" = i64, Path, description = "Newsletter id")),
    responses(
        (status = 204, description = "Newsletter deleted."),
        (status = 403, description = "Not allowed to delete this newsletter.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Newsletters"
)]
pub async fn delete_newsletter(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .newsletter_commands
        .delete_newsletter(&user, DeleteNewsletterCommand { id })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
