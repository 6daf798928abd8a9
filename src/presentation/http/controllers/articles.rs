// src/presentation/http/controllers/articles.rs
use super::{PageParams, default_limit, present};
use crate::application::{
    commands::articles::{
        ApproveArticleCommand, CreateArticleCommand, DeleteArticleCommand, RejectArticleCommand,
        ResubmitArticleCommand, UpdateArticleCommand,
    },
    dto::{ArticleDto, CursorPage},
    queries::articles::{
        GetArticleByIdQuery, ListArticlesQuery, ListPendingArticlesQuery, SubscriptionFeedQuery,
    },
};
use crate::domain::article::ArticleStatus;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::openapi::ArticleListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    #[serde(default)]
    pub status: Option<ArticleStatus>,
    #[serde(default)]
    pub publisher_id: Option<i64>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub publisher_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    /// `null` detaches the article from its publisher.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>, nullable)]
    pub publisher_id: Option<Option<i64>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RejectArticleRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Articles visible to the caller.", body = ArticleListResponse),
        (status = 400, description = "Invalid cursor.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<CursorPage<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_articles(
            actor.0.as_ref(),
            ListArticlesQuery {
                status: params.status,
                publisher_id: params.publisher_id,
                author_id: params.author_id,
                limit: params.limit,
                cursor: params.cursor,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/pending",
    params(PageParams),
    responses(
        (status = 200, description = "Articles awaiting review.", body = ArticleListResponse),
        (status = 403, description = "Caller is not an editor.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_pending_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_pending_articles(
            &user,
            ListPendingArticlesQuery {
                limit: params.limit,
                cursor: params.cursor,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/feed",
    params(PageParams),
    responses(
        (status = 200, description = "Approved articles from the caller's subscriptions.", body = ArticleListResponse)
    ),
    tag = "Articles"
)]
pub async fn subscription_feed(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CursorPage<ArticleDto>>> {
    state
        .services
        .article_queries
        .subscription_feed(
            &user,
            SubscriptionFeedQuery {
                limit: params.limit,
                cursor: params.cursor,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article.", body = ArticleDto),
        (status = 403, description = "Article is not visible to the caller.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(actor.0.as_ref(), GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article submitted for review.", body = ArticleDto),
        (status = 403, description = "Only journalists submit articles.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = CreateArticleCommand {
        title: payload.title,
        content: payload.content,
        summary: payload.summary,
        publisher_id: payload.publisher_id,
    };

    state
        .services
        .article_commands
        .create_article(&user, command)
        .await
        .into_http()
        .map(|article| (StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated article.", body = ArticleDto),
        (status = 409, description = "Concurrent modification.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        id,
        title: payload.title,
        content: payload.content,
        summary: payload.summary,
        publisher_id: payload.publisher_id,
    };

    state
        .services
        .article_commands
        .update_article(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 204, description = "Article deleted."),
        (status = 403, description = "Not allowed to delete this article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .delete_article(&user, DeleteArticleCommand { id })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/approve",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article approved and published.", body = ArticleDto),
        (status = 403, description = "Only editors approve.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Article is not pending.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn approve_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .approve_article(&user, ApproveArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/reject",
    params(("id" = i64, Path, description = "Article id")),
    request_body(content = RejectArticleRequest, description = "Optional reason shown to the author."),
    responses(
        (status = 200, description = "Article rejected.", body = ArticleDto),
        (status = 403, description = "Only editors reject.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Article is not pending.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn reject_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    payload: Option<Json<RejectArticleRequest>>,
) -> HttpResult<Json<ArticleDto>> {
    let reason = payload.and_then(|Json(body)| body.reason);

    state
        .services
        .article_commands
        .reject_article(&user, RejectArticleCommand { id, reason })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/resubmit",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Rejected article is pending again.", body = ArticleDto),
        (status = 409, description = "Article is not rejected.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn resubmit_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .resubmit_article(&user, ResubmitArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}
