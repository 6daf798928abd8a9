// tests/support/mocks/mod.rs
//! In-memory adapters standing in for Postgres, SMTP and biscuit.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod events;
pub mod mail;
pub mod memory;
pub mod security;
pub mod time;

pub use events::RecordingEventConsumer;
pub use mail::RecordingMailer;
pub use memory::InMemoryStore;
pub use security::{EXPIRED_TOKEN, StaticTokenManager};
pub use time::{TestClock, fixed_now};
