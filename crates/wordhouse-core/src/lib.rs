//! # Wordhouse Core
//!
//! Core domain types for the Wordhouse content backend:
//! - Type-safe identifiers (newtype pattern)
//! - Document entities (sermons, events, devotionals, blogs, radio, subscribers)
//! - Tri-state patch fields for partial updates

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod blog;
pub mod chat;
pub mod devotional;
pub mod event;
pub mod id;
pub mod patch;
pub mod radio;
pub mod sermon;
pub mod subscriber;

pub use blog::Blog;
pub use chat::{ChatComment, ChatSession};
pub use devotional::Devotional;
pub use event::Event;
pub use id::*;
pub use patch::Patch;
pub use radio::RadioSlot;
pub use sermon::Sermon;
pub use subscriber::Subscriber;
