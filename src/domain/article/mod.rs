pub mod cursor;
pub mod entity;
pub mod events;
pub mod repository;
pub mod value_objects;

pub use cursor::ArticleCursor;
pub use entity::{Article, ArticleTransition, ArticleUpdate, NewArticle, Review};
pub use events::ArticleApproved;
pub use repository::{
    ArticleFeedQuery, ArticleListQuery, ArticleReadRepository, ArticleVisibility,
    ArticleWriteRepository,
};
pub use value_objects::{ArticleContent, ArticleId, ArticleStatus, ArticleSummary, ArticleTitle};
