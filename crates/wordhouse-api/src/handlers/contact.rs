//! Contact, prayer, subscriber, and broadcast handlers.

use crate::{
    extract::FormData,
    response::{Created, MessageResponse},
    state::AppState,
    validation::Validator,
    ApiResult,
};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use wordhouse_core::{Subscriber, SubscriberId};
use wordhouse_mail::{broadcast, Attachment, EmailMessage, Recipient};

/// Add subscriber request.
#[derive(Debug, Deserialize)]
pub struct AddSubscriberRequest {
    /// Subscriber display name.
    pub name: String,
    /// Destination address.
    pub email: String,
}

/// Contact form submission.
#[derive(Debug, Deserialize)]
pub struct ContactFormRequest {
    /// Sender name.
    pub name: String,
    /// Sender address.
    pub email: String,
    /// Message text.
    pub message: String,
}

/// Prayer request submission.
#[derive(Debug, Deserialize)]
pub struct PrayerFormRequest {
    /// Sender name.
    pub name: String,
    /// Sender address.
    pub email: String,
    /// Contact phone, optional.
    pub phone: Option<String>,
    /// Request text.
    pub message: String,
}

/// Lists every subscriber.
pub async fn list_subscribers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Subscriber>>> {
    Ok(Json(state.contact.subscribers.list()))
}

/// Adds a subscriber.
pub async fn add_subscriber(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddSubscriberRequest>,
) -> ApiResult<Created<Subscriber>> {
    Validator::new()
        .required("name", &request.name)
        .required("email", &request.email)
        .email("email", &request.email)
        .finish()?;

    let subscriber = Subscriber::new(request.name, request.email);
    Ok(Created(state.contact.subscribers.insert(subscriber)))
}

/// Removes a subscriber.
pub async fn delete_subscriber(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SubscriberId>,
) -> ApiResult<MessageResponse> {
    state.contact.subscribers.remove(&id)?;
    Ok(MessageResponse::new("Subscriber deleted."))
}

/// Sends a contact-form notification to the operator address.
pub async fn submit_contact_form(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContactFormRequest>,
) -> ApiResult<MessageResponse> {
    Validator::new()
        .required("name", &request.name)
        .required("email", &request.email)
        .email("email", &request.email)
        .required("message", &request.message)
        .finish()?;

    let text = format!(
        "You have received a new contact form submission:\n\nName: {}\nEmail: {}\nMessage: {}\n",
        request.name, request.email, request.message
    );
    let html = format!(
        "<h3>New Contact Form Submission</h3>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Message:</strong> {}</p>",
        request.name, request.email, request.message
    );

    let message = EmailMessage::new(
        &state.config.mail_from,
        &state.config.operator_address,
        "New Contact Form Submission",
        text,
    )
    .with_html(html);

    state.mailer.send(&message).await?;
    Ok(MessageResponse::new("Contact form submitted successfully."))
}

/// Sends a prayer-request notification to the operator address.
pub async fn submit_prayer_request(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PrayerFormRequest>,
) -> ApiResult<MessageResponse> {
    Validator::new()
        .required("name", &request.name)
        .required("email", &request.email)
        .email("email", &request.email)
        .required("message", &request.message)
        .finish()?;

    let phone = request.phone.as_deref().unwrap_or("-");
    let text = format!(
        "You have received a new prayer request:\n\nName: {}\nEmail: {}\nPhone: {}\nMessage: {}\n",
        request.name, request.email, phone, request.message
    );
    let html = format!(
        "<h3>New Prayer Request Submission</h3>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Message:</strong> {}</p>",
        request.name, request.email, phone, request.message
    );

    let message = EmailMessage::new(
        &state.config.mail_from,
        &state.config.operator_address,
        "New Prayer Request Submission",
        text,
    )
    .with_html(html);

    state.mailer.send(&message).await?;
    Ok(MessageResponse::new(
        "Prayer request submitted successfully.",
    ))
}

/// Broadcasts a personalized message to every subscriber.
///
/// Multipart body: `subject` and `body` text fields (the `{name}`
/// placeholder is replaced per recipient) plus any number of `files`
/// attachments forwarded to everyone. A failed individual send is logged by
/// the broadcast and does not fail the request; success means every
/// subscriber was attempted.
pub async fn send_subscribe_message(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<MessageResponse> {
    let form = FormData::read(multipart).await?;

    let subject = form.text("subject").unwrap_or_default();
    let body = form.text("body").unwrap_or_default();
    Validator::new()
        .required("subject", subject)
        .required("body", body)
        .finish()?;

    let attachments: Vec<Attachment> = form
        .files_named("files")
        .map(|upload| {
            Attachment::new(
                upload.name.clone(),
                upload.payload.clone(),
                upload.content_type.clone(),
            )
        })
        .collect();

    let recipients: Vec<Recipient> = state
        .contact
        .subscribers
        .list()
        .into_iter()
        .map(|s| Recipient {
            name: s.name,
            email: s.email,
        })
        .collect();

    broadcast(
        state.mailer.clone(),
        &state.config.mail_from,
        &recipients,
        subject,
        body,
        &attachments,
    )
    .await;

    Ok(MessageResponse::new(
        "Subscribe message sent to all subscribers.",
    ))
}
