// src/presentation/http/controllers/publishers.rs
use super::{PageParams, present};
use crate::application::{
    commands::publishers::{
        CreatePublisherCommand, RequestJoinCommand, ReviewJoinRequestCommand,
        UpdatePublisherCommand,
    },
    dto::{ArticleDto, CursorPage, JoinRequestDto, PublisherDto},
    error::ApplicationError,
    queries::{
        articles::PublisherArticlesQuery,
        publishers::{JoinRequestFilter, ListJoinRequestsQuery},
    },
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::ArticleListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePublisherRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub established_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePublisherRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// An empty string clears the website.
    pub website: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<NaiveDate>, nullable)]
    pub established_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct JoinRequestBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JoinRequestListParams {
    /// `pending` (default), `approved`, `rejected` or `all`.
    #[serde(default)]
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/publishers",
    responses((status = 200, description = "All publishers.", body = [PublisherDto])),
    tag = "Publishers"
)]
pub async fn list_publishers(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<PublisherDto>>> {
    state
        .services
        .publisher_queries
        .list_publishers()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/publishers/{id}",
    params(("id" = i64, Path, description = "Publisher id")),
    responses(
        (status = 200, description = "Publisher with its members.", body = PublisherDto),
        (status = 404, description = "No such publisher.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn get_publisher(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<PublisherDto>> {
    state
        .services
        .publisher_queries
        .get_publisher(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/publishers",
    request_body = CreatePublisherRequest,
    responses(
        (status = 201, description = "Publisher created; the caller owns it.", body = PublisherDto),
        (status = 403, description = "Only publisher accounts create publishers.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Name already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn create_publisher(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreatePublisherRequest>,
) -> HttpResult<(StatusCode, Json<PublisherDto>)> {
    let command = CreatePublisherCommand {
        name: payload.name,
        description: payload.description,
        website: payload.website,
        established_date: payload.established_date,
    };

    state
        .services
        .publisher_commands
        .create_publisher(&user, command)
        .await
        .into_http()
        .map(|publisher| (StatusCode::CREATED, Json(publisher)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/publishers/{id}",
    params(("id" = i64, Path, description = "Publisher id")),
    request_body = UpdatePublisherRequest,
    responses(
        (status = 200, description = "Updated publisher.", body = PublisherDto),
        (status = 403, description = "Caller does not own the publisher.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn update_publisher(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePublisherRequest>,
) -> HttpResult<Json<PublisherDto>> {
    let command = UpdatePublisherCommand {
        id,
        name: payload.name,
        description: payload.description,
        website: payload.website,
        established_date: payload.established_date,
    };

    state
        .services
        .publisher_commands
        .update_publisher(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/publishers/{id}/articles",
    params(("id" = i64, Path, description = "Publisher id"), PageParams),
    responses(
        (status = 200, description = "Approved articles of the publisher.", body = ArticleListResponse),
        (status = 404, description = "No such publisher.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn publisher_articles(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<ArticleDto>>> {
    state
        .services
        .article_queries
        .publisher_articles(PublisherArticlesQuery {
            publisher_id: id,
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/publishers/{id}/join-requests",
    params(("id" = i64, Path, description = "Publisher id")),
    request_body(content = JoinRequestBody, description = "Optional note to the owner."),
    responses(
        (status = 201, description = "Join request filed.", body = JoinRequestDto),
        (status = 409, description = "Already a member or a request is pending.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn request_join(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    payload: Option<Json<JoinRequestBody>>,
) -> HttpResult<(StatusCode, Json<JoinRequestDto>)> {
    let message = payload.and_then(|Json(body)| body.message);

    state
        .services
        .publisher_commands
        .request_join(
            &user,
            RequestJoinCommand {
                publisher_id: id,
                message,
            },
        )
        .await
        .into_http()
        .map(|request| (StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/v1/publishers/{id}/join-requests",
    params(("id" = i64, Path, description = "Publisher id"), JoinRequestListParams),
    responses(
        (status = 200, description = "Join requests addressed to the publisher.", body = [JoinRequestDto]),
        (status = 403, description = "Caller does not own the publisher.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn list_join_requests(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Query(params): Query<JoinRequestListParams>,
) -> HttpResult<Json<Vec<JoinRequestDto>>> {
    let filter = match params.status.as_deref() {
        Some(raw) => raw
            .parse::<JoinRequestFilter>()
            .map_err(|err| HttpError::from_error(ApplicationError::from(err)))?,
        None => JoinRequestFilter::default(),
    };

    state
        .services
        .publisher_queries
        .list_join_requests(
            &user,
            ListJoinRequestsQuery {
                publisher_id: id,
                filter,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/join-requests/{id}/approve",
    params(("id" = i64, Path, description = "Join request id")),
    responses(
        (status = 200, description = "Requester added to the publisher.", body = JoinRequestDto),
        (status = 409, description = "Request is not pending.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn approve_join_request(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<JoinRequestDto>> {
    review(&state, &user, id, true).await
}

#[utoipa::path(
    post,
    path = "/api/v1/join-requests/{id}/reject",
    params(("id" = i64, Path, description = "Join request id")),
    responses(
        (status = 200, description = "Request rejected.", body = JoinRequestDto),
        (status = 409, description = "Request is not pending.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn reject_join_request(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<JoinRequestDto>> {
    review(&state, &user, id, false).await
}

async fn review(
    state: &HttpState,
    user: &crate::application::dto::AuthenticatedUser,
    id: i64,
    approve: bool,
) -> HttpResult<Json<JoinRequestDto>> {
    state
        .services
        .publisher_commands
        .review_join_request(user, ReviewJoinRequestCommand { id, approve })
        .await
        .into_http()
        .map(Json)
}
