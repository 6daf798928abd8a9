pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{
    NewJoinRequest, NewPublisher, Publisher, PublisherJoinRequest, PublisherUpdate,
    member_kind_for,
};
pub use repository::{JoinRequestRepository, JoinRequestReview, PublisherRepository};
pub use value_objects::{
    JoinRequestId, JoinRequestStatus, MemberKind, PublisherId, PublisherName, Website,
};
