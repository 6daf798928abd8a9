// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Reads the caller identity out of the facts of a verified token.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let mut claims = Claims::default();
    for fact in facts {
        claims.apply(&fact.predicate);
    }
    claims.into_user()
}

#[derive(Default)]
struct Claims {
    user: Option<(i64, String)>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl Claims {
    fn apply(&mut self, predicate: &Predicate) {
        match (predicate.name.as_str(), predicate.terms.as_slice()) {
            ("user", [Term::Integer(id), Term::Str(name)]) => {
                self.user = Some((*id, name.clone()));
            }
            ("role", [Term::Str(role)]) => {
                self.role = role.parse().ok();
            }
            ("issued_at", [Term::Date(seconds)]) => {
                self.issued_at = Some(UNIX_EPOCH + Duration::from_secs(*seconds));
            }
            ("expires_at", [Term::Date(seconds)]) => {
                self.expires_at = Some(UNIX_EPOCH + Duration::from_secs(*seconds));
            }
            _ => {}
        }
    }

    fn into_user(self) -> ApplicationResult<AuthenticatedUser> {
        let (id, username) = self
            .user
            .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
        let role = self
            .role
            .ok_or_else(|| ApplicationError::unauthorized("missing or unknown role"))?;
        let issued_at = self
            .issued_at
            .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
        let expires_at = self
            .expires_at
            .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

        Ok(AuthenticatedUser {
            id: UserId::new(id).map_err(|_| ApplicationError::unauthorized("invalid user id"))?,
            username,
            role,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(name: &str, terms: Vec<Term>) -> Fact {
        Fact::new(name.to_string(), terms)
    }

    #[test]
    fn complete_facts_yield_a_user() {
        let user = parse_claims(vec![
            fact("user", vec![Term::Integer(7), Term::Str("jo".into())]),
            fact("role", vec![Term::Str("journalist".into())]),
            fact("issued_at", vec![Term::Date(1_700_000_000)]),
            fact("expires_at", vec![Term::Date(1_700_003_600)]),
        ])
        .unwrap();
        assert_eq!(user.id, UserId::new(7).unwrap());
        assert_eq!(user.role, Role::Journalist);
        assert_eq!((user.expires_at - user.issued_at).num_seconds(), 3600);
    }

    #[test]
    fn unknown_role_is_unauthorized() {
        let err = parse_claims(vec![
            fact("user", vec![Term::Integer(7), Term::Str("jo".into())]),
            fact("role", vec![Term::Str("admin".into())]),
            fact("issued_at", vec![Term::Date(1)]),
            fact("expires_at", vec![Term::Date(2)]),
        ])
        .unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
