use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position in a listing ordered by `(sort_at DESC, id DESC)`.
/// `sort_at` is the creation time for plain listings and the publication
/// time for feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleCursor {
    pub sort_at: DateTime<Utc>,
    pub id: i64,
}

impl ArticleCursor {
    pub const fn new(sort_at: DateTime<Utc>, id: i64) -> Self {
        Self { sort_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.sort_at.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::Validation("invalid cursor token".into());
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (sort_at, id) = raw.split_once('|').ok_or_else(invalid)?;
        let sort_at = DateTime::parse_from_rfc3339(sort_at)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(sort_at, id))
    }
}
