mod feeds;
mod get_by_id;
mod list;
mod service;

pub use feeds::{JournalistArticlesQuery, PublisherArticlesQuery, SubscriptionFeedQuery};
pub use get_by_id::GetArticleByIdQuery;
pub use list::{ListArticlesQuery, ListPendingArticlesQuery};
pub use service::ArticleQueryService;
