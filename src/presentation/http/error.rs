// src/presentation/http/error.rs
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ApplicationError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ApplicationError::Conflict(msg) | ApplicationError::InvalidState(msg) => {
                Self::new(StatusCode::CONFLICT, msg)
            }
            ApplicationError::Unauthorized(msg) => Self::new(StatusCode::UNAUTHORIZED, msg),
            ApplicationError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            ApplicationError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "infrastructure failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApplicationError::Domain(domain_err) => Self::from_domain(domain_err),
        }
    }

    fn from_domain(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) | DomainError::InvalidState(_) => StatusCode::CONFLICT,
            DomainError::Persistence(msg) => {
                tracing::error!(error = %msg, "persistence failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }

    fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_and_conflict_share_409() {
        let from_app = HttpError::from_error(ApplicationError::invalid_state("not pending"));
        let from_domain = HttpError::from_error(ApplicationError::Domain(
            DomainError::InvalidState("article is approved".into()),
        ));
        let conflict = HttpError::from_error(ApplicationError::conflict("stale"));
        assert_eq!(from_app.status(), StatusCode::CONFLICT);
        assert_eq!(from_domain.status(), StatusCode::CONFLICT);
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn domain_validation_is_bad_request_and_persistence_is_500() {
        let validation =
            HttpError::from_error(DomainError::Validation("title is empty".into()).into());
        let persistence = HttpError::from_error(DomainError::Persistence("boom".into()).into());
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(persistence.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn authorization_errors_keep_their_codes() {
        assert_eq!(
            HttpError::from_error(ApplicationError::forbidden("no")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            HttpError::from_error(ApplicationError::unauthorized("no")).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            HttpError::from_error(ApplicationError::not_found("gone")).status(),
            StatusCode::NOT_FOUND
        );
    }
}
