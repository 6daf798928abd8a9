// src/application/ports/mod.rs
pub mod events;
pub mod mail;
pub mod notifications;
pub mod security;
pub mod time;
