//! Request handlers, one module per content area.

pub mod blogs;
pub mod chat;
pub mod contact;
pub mod devotionals;
pub mod events;
pub mod health;
pub mod radio;
pub mod sermons;
