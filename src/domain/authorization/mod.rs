//! The authorization gate: a pure decision over role grants, ownership and
//! resource state. Callers look the resource up first, so a `false` here
//! always means `Forbidden`, never `NotFound`.

use crate::domain::article::Article;
use crate::domain::newsletter::Newsletter;
use crate::domain::publisher::Publisher;
use crate::domain::user::{Role, UserId};

/// The acting user, as established by token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    fn grants(&self, resource: &str, action: &str) -> bool {
        self.role.grants(resource, action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Approve,
    Reject,
    Resubmit,
    Join,
    ReviewJoinRequests,
    ManageSubscriptions,
}

#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Article(&'a Article),
    /// An article that does not exist yet.
    NewArticle,
    /// The editorial queue of pending articles.
    PendingArticles,
    Newsletter(&'a Newsletter),
    NewNewsletter,
    Publisher(&'a Publisher),
    NewPublisher,
    /// Join requests addressed to the given publisher.
    JoinRequestsOf(&'a Publisher),
    /// The subscription set owned by the given reader.
    Subscriptions(UserId),
}

pub fn can(principal: &Principal, action: Action, resource: Resource<'_>) -> bool {
    match (action, resource) {
        (Action::Read, Resource::Article(article)) => {
            principal.grants("articles", "read:any")
                || (article.is_approved() && principal.grants("articles", "read:approved"))
                || (article.is_authored_by(principal.id) && principal.grants("articles", "read:own"))
        }
        (Action::Create, Resource::NewArticle) => principal.grants("articles", "create"),
        (Action::Update, Resource::Article(article)) => {
            principal.grants("articles", "update:any") || owns_pending(principal, article, "update:own")
        }
        (Action::Delete, Resource::Article(article)) => {
            principal.grants("articles", "delete:any") || owns_pending(principal, article, "delete:own")
        }
        // Status preconditions are left to the approval engine so that a
        // wrong state reports `InvalidState` rather than `Forbidden`.
        (Action::Approve | Action::Reject, Resource::Article(_))
        | (Action::Read, Resource::PendingArticles) => principal.grants("articles", "review"),
        (Action::Resubmit, Resource::Article(article)) => {
            article.is_authored_by(principal.id) && principal.grants("articles", "resubmit:own")
        }

        (Action::Read, Resource::Newsletter(_)) => principal.grants("newsletters", "read"),
        (Action::Create, Resource::NewNewsletter) => principal.grants("newsletters", "create"),
        (Action::Update, Resource::Newsletter(newsletter)) => {
            principal.grants("newsletters", "update:any")
                || (newsletter.is_authored_by(principal.id)
                    && principal.grants("newsletters", "update:own"))
        }
        (Action::Delete, Resource::Newsletter(newsletter)) => {
            principal.grants("newsletters", "delete:any")
                || (newsletter.is_authored_by(principal.id)
                    && principal.grants("newsletters", "delete:own"))
        }

        (Action::Read, Resource::Publisher(_)) => principal.grants("publishers", "read"),
        (Action::Create, Resource::NewPublisher) => principal.grants("publishers", "create"),
        (Action::Update, Resource::Publisher(publisher)) => {
            publisher.is_owned_by(principal.id) && principal.grants("publishers", "update:own")
        }
        (Action::Join, Resource::Publisher(_)) => principal.grants("publishers", "join"),
        (Action::ReviewJoinRequests, Resource::JoinRequestsOf(publisher)) => {
            publisher.is_owned_by(principal.id) && principal.grants("join_requests", "review:own")
        }

        (Action::ManageSubscriptions, Resource::Subscriptions(owner)) => {
            owner == principal.id && principal.grants("subscriptions", "manage:own")
        }

        _ => false,
    }
}

fn owns_pending(principal: &Principal, article: &Article, action: &str) -> bool {
    article.is_authored_by(principal.id) && article.is_pending() && principal.grants("articles", action)
}
