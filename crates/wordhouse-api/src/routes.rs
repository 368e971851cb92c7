//! API routes.

use crate::{
    handlers::{blogs, chat, contact, devotionals, events, health, radio, sermons},
    middleware::{cors::cors_layer, logging::logging_layer},
    state::AppState,
};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Creates the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/sermon", sermon_routes())
        .nest("/event", event_routes())
        .nest("/devotional", devotional_routes())
        .nest("/blog", blog_routes())
        .nest("/radio", radio_routes())
        .nest("/contact", contact_routes())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config.cors_origins))
        .layer(middleware::from_fn(logging_layer))
        .with_state(state)
}

/// Health routes.
fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/live", get(health::liveness_handler))
        .route("/ready", get(health::readiness_handler))
}

/// Sermon routes.
fn sermon_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(sermons::list_sermons))
        .route("/items/:id", get(sermons::get_sermon))
        .route("/items/:id", delete(sermons::delete_sermon))
        .route("/upload", post(sermons::upload_sermon))
        .route("/edit/:id", put(sermons::edit_sermon))
        .route("/series", get(sermons::list_series))
        .route("/speakers", get(sermons::list_speakers))
}

/// Event routes.
fn event_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", post(events::create_event))
        .route("/events", get(events::list_events))
        .route("/events/:id", put(events::update_event))
        .route("/events/:id", delete(events::delete_event))
}

/// Devotional routes.
fn devotional_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(devotionals::create_devotional))
        .route("/contents", get(devotionals::list_devotionals))
        .route("/update/:id", put(devotionals::update_devotional))
        .route("/delete/:id", delete(devotionals::delete_devotional))
}

/// Blog routes.
fn blog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/blogs", post(blogs::create_blog))
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs/:id", get(blogs::get_blog))
        .route("/blogs/:id", put(blogs::update_blog))
        .route("/blogs/:id", delete(blogs::delete_blog))
        .route("/blogs/:id/views", get(blogs::get_blog_views))
        .route("/categories", get(blogs::list_categories))
        .route("/authors", get(blogs::list_authors))
}

/// Radio routes: schedule and chat sessions.
fn radio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schedule", post(radio::create_slot))
        .route("/schedule/:id", put(radio::update_slot))
        .route("/schedule/:id", delete(radio::delete_slot))
        .route("/schedule/all", get(radio::list_all))
        .route("/schedule/future", get(radio::list_future))
        .route("/schedule/now", get(radio::now_playing))
        .route("/schedule/next", get(radio::up_next))
        .route("/chatsession", post(chat::create_session))
        .route("/chatsession/:id", put(chat::update_session))
        .route("/chatsession/:id", delete(chat::delete_session))
        .route("/chatsession/all", get(chat::list_sessions))
        .route("/chatsession/:id/comment", post(chat::add_comment))
        .route("/chatsession/:id/comments", get(chat::list_comments))
}

/// Contact routes: subscribers, forms, broadcast.
fn contact_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/email", get(contact::list_subscribers))
        .route("/email", post(contact::add_subscriber))
        .route("/email/:id", delete(contact::delete_subscriber))
        .route("/contact", post(contact::submit_contact_form))
        .route("/prayer", post(contact::submit_prayer_request))
        .route("/sendSubscribeMessage", post(contact::send_subscribe_message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_state, TestHarness};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use wordhouse_core::Subscriber;

    const BOUNDARY: &str = "wordhouse-test-boundary";

    /// A multipart part: field name, optional (filename, content type), value.
    type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a str);

    fn multipart_body(parts: &[Part<'_>]) -> String {
        let mut body = String::new();
        for (name, file, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file {
                Some((filename, content_type)) => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    ));
                    body.push_str(&format!("Content-Type: {content_type}\r\n\r\n"));
                }
                None => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                    ));
                }
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(uri: &str, method: &str, parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn router(harness: &TestHarness) -> Router {
        create_router(harness.state.clone())
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let harness = test_state();
        let response = router(&harness)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_sermon_is_404_with_error_body() {
        let harness = test_state();
        let response = router(&harness)
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/sermon/items/{}",
                        wordhouse_core::SermonId::new()
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body["message"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn sermon_upload_stores_files_and_creates_record() {
        let harness = test_state();
        let response = router(&harness)
            .oneshot(multipart_request(
                "/sermon/upload",
                "POST",
                &[
                    ("title", None, "On the Mount"),
                    ("date", None, "2025-03-09"),
                    ("speaker", None, "P. Mensah"),
                    ("thumbnail", Some(("t.png", "image/png")), "thumb-bytes"),
                    ("audioFile", Some(("s.mp3", "audio/mpeg")), "audio-bytes"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["title"], "On the Mount");
        assert!(body["thumbnail"].is_string());
        assert!(body["audio"].is_string());
        assert_eq!(harness.objects.len(), 2);
    }

    #[tokio::test]
    async fn sermon_edit_replaces_slot_and_releases_old_object() {
        let harness = test_state();
        let app = router(&harness);

        let created = app
            .clone()
            .oneshot(multipart_request(
                "/sermon/upload",
                "POST",
                &[
                    ("title", None, "Original"),
                    ("date", None, "2025-03-09"),
                    ("thumbnail", Some(("v1.png", "image/png")), "v1-bytes"),
                ],
            ))
            .await
            .unwrap();
        let created = body_json(created).await;
        let id = created["id"].as_str().unwrap().to_string();
        let old_ref = created["thumbnail"].as_str().unwrap().to_string();

        let edited = app
            .oneshot(multipart_request(
                &format!("/sermon/edit/{id}"),
                "PUT",
                &[("thumbnail", Some(("v2.png", "image/png")), "v2-bytes")],
            ))
            .await
            .unwrap();
        assert_eq!(edited.status(), StatusCode::OK);
        let edited = body_json(edited).await;
        let new_ref = edited["thumbnail"].as_str().unwrap().to_string();

        assert_ne!(old_ref, new_ref);
        // Omitted text fields kept their values.
        assert_eq!(edited["title"], "Original");
        // Exactly the new object remains.
        assert_eq!(harness.objects.len(), 1);
        assert!(harness
            .objects
            .contains(&wordhouse_media::ObjectRef::new(new_ref)));
    }

    #[tokio::test]
    async fn broadcast_attempts_every_subscriber_despite_failure() {
        let harness = test_state();
        for (name, email) in [
            ("Ada", "ada@example.com"),
            ("Grace", "grace@example.com"),
            ("Katherine", "kat@example.com"),
        ] {
            harness
                .state
                .contact
                .subscribers
                .insert(Subscriber::new(name, email));
        }
        harness.mailer.fail_for("grace@example.com");

        let response = router(&harness)
            .oneshot(multipart_request(
                "/contact/sendSubscribeMessage",
                "POST",
                &[
                    ("subject", None, "Hello {name}"),
                    ("body", None, "Dear {name}, see you Sunday."),
                ],
            ))
            .await
            .unwrap();

        // The batch settles successfully even though one recipient failed.
        assert_eq!(response.status(), StatusCode::OK);
        let delivered = harness.mailer.recipients();
        assert_eq!(delivered.len(), 2);
        assert!(delivered.contains(&"ada@example.com".to_string()));
        assert!(delivered.contains(&"kat@example.com".to_string()));
    }

    #[tokio::test]
    async fn event_validation_failure_is_400() {
        let harness = test_state();
        let response = router(&harness)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/event/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title": "", "start_date": "2025-06-01T00:00:00Z"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
