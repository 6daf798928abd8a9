// src/presentation/http/controllers/users.rs
use super::PageParams;
use crate::application::{
    commands::users::RegisterUserCommand,
    dto::{ArticleDto, CursorPage, UserDto, UserProfileDto},
    queries::articles::JournalistArticlesQuery,
};
use crate::domain::user::Role;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::ArticleListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Defaults to `reader`.
    #[serde(default)]
    pub role: Option<Role>,
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created.", body = UserDto),
        (status = 409, description = "Username taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(()),
    tag = "Users"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<RegisterRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = RegisterUserCommand {
        username: payload.username,
        email: payload.email,
        role: payload.role,
    };

    state
        .services
        .user_commands
        .register(command)
        .await
        .into_http()
        .map(|user| (StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "The caller and what their role allows.", body = UserProfileDto),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserProfileDto>> {
    state
        .services
        .user_queries
        .get_profile(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/journalists",
    responses((status = 200, description = "Every journalist account.", body = [UserDto])),
    security(()),
    tag = "Users"
)]
pub async fn list_journalists(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .user_queries
        .list_journalists()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/journalists/{id}/articles",
    params(("id" = i64, Path, description = "Journalist user id"), PageParams),
    responses(
        (status = 200, description = "Approved articles by the journalist.", body = ArticleListResponse),
        (status = 404, description = "No such journalist.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(()),
    tag = "Users"
)]
pub async fn journalist_articles(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<ArticleDto>>> {
    state
        .services
        .article_queries
        .journalist_articles(JournalistArticlesQuery {
            journalist_id: id,
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()
        .map(Json)
}
