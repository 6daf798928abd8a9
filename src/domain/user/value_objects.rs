// src/domain/user/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("user id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single `resource:action` grant. Roles map to a fixed table of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
    pub resource: &'static str,
    pub action: &'static str,
}

impl Capability {
    pub const fn new(resource: &'static str, action: &'static str) -> Self {
        Self { resource, action }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

const READER_CAPABILITIES: &[Capability] = &[
    Capability::new("articles", "read:approved"),
    Capability::new("newsletters", "read"),
    Capability::new("publishers", "read"),
    Capability::new("subscriptions", "manage:own"),
];

const EDITOR_CAPABILITIES: &[Capability] = &[
    Capability::new("articles", "read:approved"),
    Capability::new("articles", "read:any"),
    Capability::new("articles", "update:any"),
    Capability::new("articles", "delete:any"),
    Capability::new("articles", "review"),
    Capability::new("newsletters", "read"),
    Capability::new("newsletters", "update:any"),
    Capability::new("newsletters", "delete:any"),
    Capability::new("publishers", "read"),
    Capability::new("publishers", "join"),
];

const JOURNALIST_CAPABILITIES: &[Capability] = &[
    Capability::new("articles", "create"),
    Capability::new("articles", "read:approved"),
    Capability::new("articles", "read:own"),
    Capability::new("articles", "update:own"),
    Capability::new("articles", "delete:own"),
    Capability::new("articles", "resubmit:own"),
    Capability::new("newsletters", "create"),
    Capability::new("newsletters", "read"),
    Capability::new("newsletters", "update:own"),
    Capability::new("newsletters", "delete:own"),
    Capability::new("publishers", "read"),
    Capability::new("publishers", "join"),
];

const PUBLISHER_CAPABILITIES: &[Capability] = &[
    Capability::new("articles", "read:approved"),
    Capability::new("newsletters", "read"),
    Capability::new("publishers", "create"),
    Capability::new("publishers", "read"),
    Capability::new("publishers", "update:own"),
    Capability::new("join_requests", "review:own"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Editor,
    Journalist,
    Publisher,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Editor => "editor",
            Self::Journalist => "journalist",
            Self::Publisher => "publisher",
        }
    }

    pub const fn capabilities(&self) -> &'static [Capability] {
        match self {
            Self::Reader => READER_CAPABILITIES,
            Self::Editor => EDITOR_CAPABILITIES,
            Self::Journalist => JOURNALIST_CAPABILITIES,
            Self::Publisher => PUBLISHER_CAPABILITIES,
        }
    }

    pub fn grants(&self, resource: &str, action: &str) -> bool {
        self.capabilities()
            .iter()
            .any(|cap| cap.matches(resource, action))
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Reader
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reader" => Ok(Self::Reader),
            "editor" => Ok(Self::Editor),
            "journalist" => Ok(Self::Journalist),
            "publisher" => Ok(Self::Publisher),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("username cannot be empty".into()));
        }
        if value.len() < 3 {
            return Err(DomainError::Validation(
                "username must be at least 3 characters long".into(),
            ));
        }
        if value.len() > 150 {
            return Err(DomainError::Validation(
                "username must be at most 150 characters long".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape-checked address; deliverability is the mail transport's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        let valid = value
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !value.chars().any(char::is_whitespace)
            });
        if !valid {
            return Err(DomainError::Validation(format!(
                "'{value}' is not a valid e-mail address"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Reader, Role::Editor, Role::Journalist, Role::Publisher] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn only_editors_review_articles() {
        assert!(Role::Editor.grants("articles", "review"));
        assert!(!Role::Journalist.grants("articles", "review"));
        assert!(!Role::Reader.grants("articles", "review"));
        assert!(!Role::Publisher.grants("articles", "review"));
    }

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(EmailAddress::new("reader@example.com").is_ok());
        assert!(EmailAddress::new("  reader@example.com ").is_ok());
        assert!(EmailAddress::new("reader@localhost").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("reader at example.com").is_err());
    }

    #[test]
    fn username_length_is_checked() {
        assert!(Username::new("ab").is_err());
        assert!(Username::new("   ").is_err());
        assert!(Username::new("abc").is_ok());
    }
}
