//! Fan-out of approval events to subscribed readers.
mod background;
mod dispatcher;
mod message;

pub use background::BackgroundEventConsumer;
pub use dispatcher::{DispatchReport, NotificationDispatcher};
pub use message::{approval_message, excerpt};
