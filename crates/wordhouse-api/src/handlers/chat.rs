//! Chat session handlers.
//!
//! Clients poll these endpoints during a broadcast; there is no push
//! delivery.

use crate::{
    response::{Created, MessageResponse},
    state::AppState,
    validation::Validator,
    ApiResult,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use wordhouse_core::{ChatComment, ChatSession, ChatSessionId, Patch};

/// Create chat session request.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// When the session opens.
    pub start_time: DateTime<Utc>,
    /// When the session closes.
    pub end_time: DateTime<Utc>,
}

/// Update chat session request.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSessionRequest {
    /// When the session opens; cannot be cleared.
    #[serde(default)]
    pub start_time: Patch<DateTime<Utc>>,
    /// When the session closes; cannot be cleared.
    #[serde(default)]
    pub end_time: Patch<DateTime<Utc>>,
}

/// Add comment request.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    /// Display name of the commenter.
    pub name: Option<String>,
    /// Comment text.
    pub comment: Option<String>,
}

/// Creates a chat session.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<Created<ChatSession>> {
    let session = ChatSession::new(request.start_time, request.end_time);
    Ok(Created(state.content.chat_sessions.insert(session)))
}

/// Updates a session's window; an empty body is a no-op.
pub async fn update_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ChatSessionId>,
    Json(request): Json<UpdateSessionRequest>,
) -> ApiResult<Json<ChatSession>> {
    Validator::new()
        .not_cleared("start_time", &request.start_time)
        .not_cleared("end_time", &request.end_time)
        .finish()?;

    let updated = state.content.chat_sessions.update(&id, |session| {
        request.start_time.apply_to_required(&mut session.start_time);
        request.end_time.apply_to_required(&mut session.end_time);
    })?;

    Ok(Json(updated))
}

/// Deletes a session.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ChatSessionId>,
) -> ApiResult<MessageResponse> {
    state.content.chat_sessions.remove(&id)?;
    Ok(MessageResponse::new("Chat session deleted"))
}

/// Lists every session, latest window first.
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ChatSession>>> {
    Ok(Json(
        state
            .content
            .chat_sessions
            .sorted_by(|a, b| b.start_time.cmp(&a.start_time)),
    ))
}

/// Appends a comment to a session.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ChatSessionId>,
    Json(request): Json<AddCommentRequest>,
) -> ApiResult<Json<ChatSession>> {
    let updated = state.content.chat_sessions.update(&id, |session| {
        session.add_comment(request.name, request.comment);
    })?;
    Ok(Json(updated))
}

/// Lists a session's comments in arrival order.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ChatSessionId>,
) -> ApiResult<Json<Vec<ChatComment>>> {
    let session = state.content.chat_sessions.get(&id)?;
    Ok(Json(session.comments))
}
