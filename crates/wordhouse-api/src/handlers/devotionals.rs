//! Devotional handlers.

use crate::{
    response::{Created, MessageResponse},
    state::AppState,
    ApiResult,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use wordhouse_core::{Devotional, DevotionalId, Patch};

/// Create devotional request.
#[derive(Debug, Deserialize)]
pub struct CreateDevotionalRequest {
    /// Publication date; defaults to now.
    pub date: Option<DateTime<Utc>>,
    /// Devotional topic.
    pub topic: Option<String>,
    /// Speaker or author.
    pub speaker: Option<String>,
    /// The devotional text.
    pub body: Option<String>,
}

/// Update devotional request.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDevotionalRequest {
    /// Publication date.
    #[serde(default)]
    pub date: Patch<DateTime<Utc>>,
    /// Devotional topic.
    #[serde(default)]
    pub topic: Patch<String>,
    /// Speaker or author.
    #[serde(default)]
    pub speaker: Patch<String>,
    /// The devotional text.
    #[serde(default)]
    pub body: Patch<String>,
}

/// Creates a devotional entry.
pub async fn create_devotional(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDevotionalRequest>,
) -> ApiResult<Created<Devotional>> {
    let mut devotional = Devotional::new(request.topic, request.speaker, request.body);
    if let Some(date) = request.date {
        devotional.date = date;
    }
    Ok(Created(state.content.devotionals.insert(devotional)))
}

/// Lists devotionals, newest first.
pub async fn list_devotionals(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Devotional>>> {
    Ok(Json(
        state.content.devotionals.sorted_by(|a, b| b.date.cmp(&a.date)),
    ))
}

/// Updates a devotional with partial-field semantics.
pub async fn update_devotional(
    State(state): State<Arc<AppState>>,
    Path(id): Path<DevotionalId>,
    Json(request): Json<UpdateDevotionalRequest>,
) -> ApiResult<Json<Devotional>> {
    let updated = state.content.devotionals.update(&id, |devotional| {
        request.date.apply_to_required(&mut devotional.date);
        request.topic.apply_to(&mut devotional.topic);
        request.speaker.apply_to(&mut devotional.speaker);
        request.body.apply_to(&mut devotional.body);
    })?;
    Ok(Json(updated))
}

/// Deletes a devotional.
pub async fn delete_devotional(
    State(state): State<Arc<AppState>>,
    Path(id): Path<DevotionalId>,
) -> ApiResult<MessageResponse> {
    state.content.devotionals.remove(&id)?;
    Ok(MessageResponse::new("Devotional deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_state;

    #[tokio::test]
    async fn create_defaults_date_to_now() {
        let harness = test_state();
        let before = Utc::now();

        let Created(devotional) = create_devotional(
            State(harness.state.clone()),
            Json(CreateDevotionalRequest {
                date: None,
                topic: Some("Patience".to_string()),
                speaker: None,
                body: Some("...".to_string()),
            }),
        )
        .await
        .unwrap();

        assert!(devotional.date >= before);
        assert_eq!(devotional.topic.as_deref(), Some("Patience"));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let harness = test_state();
        for topic in ["first", "second"] {
            create_devotional(
                State(harness.state.clone()),
                Json(CreateDevotionalRequest {
                    date: None,
                    topic: Some(topic.to_string()),
                    speaker: None,
                    body: None,
                }),
            )
            .await
            .unwrap();
        }

        let Json(devotionals) = list_devotionals(State(harness.state.clone())).await.unwrap();
        assert_eq!(devotionals.len(), 2);
        assert!(devotionals[0].date >= devotionals[1].date);
    }
}
