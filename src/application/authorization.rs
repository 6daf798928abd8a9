// src/application/authorization.rs
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::authorization::{Action, Resource, can},
};

/// Runs the gate and turns a refusal into `Forbidden`. The resource must
/// already have been loaded, so absence has been reported as `NotFound`.
pub(crate) fn ensure_allowed(
    actor: &AuthenticatedUser,
    action: Action,
    resource: Resource<'_>,
    what: &str,
) -> ApplicationResult<()> {
    if can(&actor.principal(), action, resource) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "{} may not {} {what}",
            actor.role,
            verb(action)
        )))
    }
}

const fn verb(action: Action) -> &'static str {
    match action {
        Action::Read => "read",
        Action::Create => "create",
        Action::Update => "update",
        Action::Delete => "delete",
        Action::Approve => "approve",
        Action::Reject => "reject",
        Action::Resubmit => "resubmit",
        Action::Join => "join",
        Action::ReviewJoinRequests => "review join requests for",
        Action::ManageSubscriptions => "manage",
    }
}
