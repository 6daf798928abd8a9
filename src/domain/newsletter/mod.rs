pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewNewsletter, Newsletter, NewsletterUpdate};
pub use repository::{NewsletterFilter, NewsletterRepository};
pub use value_objects::{NewsletterContent, NewsletterId, NewsletterTitle};
