//! Application state.
//!
//! External-service handles are explicit dependencies injected at startup;
//! nothing here is ambient or global. Document collections are grouped into
//! three namespaces mirroring the deployment/ownership boundary of the
//! persisted state: assets, content, and contact.

use std::sync::Arc;
use wordhouse_core::{Blog, ChatSession, Devotional, Event, RadioSlot, Sermon, Subscriber};
use wordhouse_mail::MailTransport;
use wordhouse_media::FileLifecycle;
use wordhouse_store::Collection;

/// Sermon records and their file slots.
#[derive(Default)]
pub struct AssetNamespace {
    /// Sermon collection.
    pub sermons: Collection<Sermon>,
}

/// Events, devotionals, blogs, radio schedule, and chat sessions.
#[derive(Default)]
pub struct ContentNamespace {
    /// Event collection.
    pub events: Collection<Event>,
    /// Devotional collection.
    pub devotionals: Collection<Devotional>,
    /// Blog collection.
    pub blogs: Collection<Blog>,
    /// Radio schedule collection.
    pub radio_slots: Collection<RadioSlot>,
    /// Chat session collection.
    pub chat_sessions: Collection<ChatSession>,
}

/// Mailing-list subscribers.
#[derive(Default)]
pub struct ContactNamespace {
    /// Subscriber collection.
    pub subscribers: Collection<Subscriber>,
}

/// Application state shared across handlers.
pub struct AppState {
    /// Asset namespace.
    pub assets: AssetNamespace,
    /// Content namespace.
    pub content: ContentNamespace,
    /// Contact namespace.
    pub contact: ContactNamespace,
    /// File lifecycle manager over the object store.
    pub files: Arc<FileLifecycle>,
    /// Outbound mail transport.
    pub mailer: Arc<dyn MailTransport>,
    /// Application configuration.
    pub config: AppConfig,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name.
    pub service_name: String,
    /// Address contact and prayer notifications are delivered to.
    pub operator_address: String,
    /// Sender address for every outbound message.
    pub mail_from: String,
    /// CORS allowed origins; empty means any.
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "wordhouse".to_string(),
            operator_address: "office@wordhouse.example".to_string(),
            mail_from: "no-reply@wordhouse.example".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl AppState {
    /// Creates a new application state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }
}

/// Builder for [`AppState`].
pub struct AppStateBuilder {
    files: Option<Arc<FileLifecycle>>,
    mailer: Option<Arc<dyn MailTransport>>,
    config: AppConfig,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            files: None,
            mailer: None,
            config: AppConfig::default(),
        }
    }

    /// Sets the file lifecycle manager.
    pub fn files(mut self, files: Arc<FileLifecycle>) -> Self {
        self.files = Some(files);
        self
    }

    /// Sets the mail transport.
    pub fn mailer(mut self, mailer: Arc<dyn MailTransport>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Sets the configuration.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the state with empty collections.
    pub fn build(self) -> Result<AppState, &'static str> {
        Ok(AppState {
            assets: AssetNamespace::default(),
            content: ContentNamespace::default(),
            contact: ContactNamespace::default(),
            files: self.files.ok_or("files is required")?,
            mailer: self.mailer.ok_or("mailer is required")?,
            config: self.config,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
