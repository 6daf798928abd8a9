use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_PUBLISHER_NAME: &str = "publishers_name_key";
const CNT_JOIN_REQUEST_PENDING: &str = "publisher_join_requests_one_pending_idx";
const CNT_ARTICLE_AUTHOR: &str = "articles_author_id_fkey";
const CNT_ARTICLE_PUBLISHER: &str = "articles_publisher_id_fkey";
const CNT_ARTICLE_APPROVAL: &str = "articles_approval_consistency_chk";
const CNT_NEWSLETTER_PUBLISHER: &str = "newsletters_publisher_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_PUBLISHER_NAME => {
                        DomainError::Conflict("publisher name already exists".into())
                    }
                    CNT_JOIN_REQUEST_PENDING => {
                        DomainError::Conflict("a pending join request already exists".into())
                    }
                    CNT_ARTICLE_AUTHOR => DomainError::NotFound("author not found".into()),
                    CNT_ARTICLE_PUBLISHER | CNT_NEWSLETTER_PUBLISHER => {
                        DomainError::NotFound("publisher not found".into())
                    }
                    CNT_ARTICLE_APPROVAL => DomainError::InvalidState(
                        "approved articles require an approver and a publication time".into(),
                    ),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
