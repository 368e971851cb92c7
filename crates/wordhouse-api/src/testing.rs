//! Shared test fixtures.

use crate::state::{AppConfig, AppState};
use std::sync::Arc;
use wordhouse_mail::RecordingTransport;
use wordhouse_media::{FileLifecycle, InMemoryObjects};

/// A test state with typed handles to the in-memory backends.
pub(crate) struct TestHarness {
    pub state: Arc<AppState>,
    pub objects: Arc<InMemoryObjects>,
    pub mailer: Arc<RecordingTransport>,
}

/// Builds an app state over in-memory backends.
pub(crate) fn test_state() -> TestHarness {
    let objects = Arc::new(InMemoryObjects::new());
    let mailer = Arc::new(RecordingTransport::new());

    let state = AppState::builder()
        .files(Arc::new(FileLifecycle::new(objects.clone())))
        .mailer(mailer.clone())
        .config(AppConfig::default())
        .build()
        .expect("test state is complete");

    TestHarness {
        state: Arc::new(state),
        objects,
        mailer,
    }
}
