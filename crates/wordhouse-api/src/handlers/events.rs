//! Event handlers.

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
use validator::Validate;
use wordhouse_core::{Event, EventId, Patch};

/// Create event request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Event title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Venue description.
    pub venue: Option<String>,
    /// Promotional image URL.
    pub image: Option<String>,
    /// First day of the event.
    pub start_date: DateTime<Utc>,
    /// Last day, for multi-day events.
    pub end_date: Option<DateTime<Utc>>,
    /// Free-text time description.
    pub time: Option<String>,
    /// Event description.
    pub description: Option<String>,
    /// External registration link.
    pub registration_link: Option<String>,
    /// Whether the event is televised.
    pub televised: Option<bool>,
    /// Stream link for televised events.
    pub televised_link: Option<String>,
}

/// Update event request; omitted keys keep the stored value, explicit null
/// clears an optional field.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    /// Event title; cannot be cleared.
    #[serde(default)]
    pub title: Patch<String>,
    /// Venue description.
    #[serde(default)]
    pub venue: Patch<String>,
    /// Promotional image URL.
    #[serde(default)]
    pub image: Patch<String>,
    /// First day of the event; cannot be cleared.
    #[serde(default)]
    pub start_date: Patch<DateTime<Utc>>,
    /// Last day, for multi-day events.
    #[serde(default)]
    pub end_date: Patch<DateTime<Utc>>,
    /// Free-text time description.
    #[serde(default)]
    pub time: Patch<String>,
    /// Event description.
    #[serde(default)]
    pub description: Patch<String>,
    /// External registration link.
    #[serde(default)]
    pub registration_link: Patch<String>,
    /// Whether the event is televised.
    #[serde(default)]
    pub televised: Patch<bool>,
    /// Stream link for televised events.
    #[serde(default)]
    pub televised_link: Patch<String>,
}

/// Creates an event.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<Created<Event>> {
    request.validate()?;

    let event = Event {
        id: EventId::new(),
        title: request.title,
        venue: request.venue,
        image: request.image,
        start_date: request.start_date,
        end_date: request.end_date,
        time: request.time,
        description: request.description,
        registration_link: request.registration_link,
        televised: request.televised,
        televised_link: request.televised_link,
    };

    Ok(Created(state.content.events.insert(event)))
}

/// Lists current and upcoming events, ascending by start date.
///
/// An event qualifies when its start date is today or later, or when it has
/// an end date that is today or later; a finished single-day event drops
/// out. "Today" is the UTC midnight boundary.
pub async fn list_events(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Event>>> {
    let today = start_of_today();
    Ok(Json(state.content.events.filter_sorted(
        |e| e.is_current(today),
        |a, b| a.start_date.cmp(&b.start_date),
    )))
}

/// Updates an event with partial-field semantics.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
    Json(request): Json<UpdateEventRequest>,
) -> ApiResult<Json<Event>> {
    Validator::new()
        .not_cleared("title", &request.title)
        .not_cleared("start_date", &request.start_date)
        .finish()?;

    let updated = state.content.events.update(&id, |event| {
        request.title.apply_to_required(&mut event.title);
        request.venue.apply_to(&mut event.venue);
        request.image.apply_to(&mut event.image);
        request.start_date.apply_to_required(&mut event.start_date);
        request.end_date.apply_to(&mut event.end_date);
        request.time.apply_to(&mut event.time);
        request.description.apply_to(&mut event.description);
        request
            .registration_link
            .apply_to(&mut event.registration_link);
        request.televised.apply_to(&mut event.televised);
        request.televised_link.apply_to(&mut event.televised_link);
    })?;

    Ok(Json(updated))
}

/// Deletes an event.
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
) -> ApiResult<MessageResponse> {
    state.content.events.remove(&id)?;
    Ok(MessageResponse::new("Event deleted successfully"))
}

/// UTC midnight of the current day.
fn start_of_today() -> DateTime<Utc> {
    Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_state;
    use chrono::Duration;

    fn seed(state: &AppState, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Event {
        state.content.events.insert(Event {
            id: EventId::new(),
            title: "Conference".to_string(),
            venue: Some("Main Hall".to_string()),
            image: None,
            start_date: start,
            end_date: end,
            time: None,
            description: None,
            registration_link: None,
            televised: None,
            televised_link: None,
        })
    }

    #[tokio::test]
    async fn window_filter_excludes_finished_events() {
        let harness = test_state();
        let now = Utc::now();

        // Yesterday, no end date: excluded.
        seed(&harness.state, now - Duration::days(1), None);
        // Started yesterday, ends tomorrow: included.
        let running = seed(
            &harness.state,
            now - Duration::days(1),
            Some(now + Duration::days(1)),
        );
        // Next week: included.
        let upcoming = seed(&harness.state, now + Duration::days(7), None);

        let Json(events) = list_events(State(harness.state.clone())).await.unwrap();
        let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![running.id, upcoming.id]);
    }

    #[tokio::test]
    async fn update_applies_partial_fields() {
        let harness = test_state();
        let event = seed(&harness.state, Utc::now() + Duration::days(1), None);

        let request: UpdateEventRequest =
            serde_json::from_str(r#"{"venue": null, "description": "All welcome"}"#).unwrap();
        let Json(updated) = update_event(State(harness.state.clone()), Path(event.id), Json(request))
            .await
            .unwrap();

        // Explicit null clears, provided value sets, omitted keys keep.
        assert_eq!(updated.venue, None);
        assert_eq!(updated.description.as_deref(), Some("All welcome"));
        assert_eq!(updated.title, event.title);
        assert_eq!(updated.start_date, event.start_date);
    }

    #[tokio::test]
    async fn null_title_is_rejected() {
        let harness = test_state();
        let event = seed(&harness.state, Utc::now(), None);

        let request: UpdateEventRequest = serde_json::from_str(r#"{"title": null}"#).unwrap();
        let result = update_event(State(harness.state.clone()), Path(event.id), Json(request)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_unknown_event_is_not_found() {
        let harness = test_state();
        let result = delete_event(State(harness.state.clone()), Path(EventId::new())).await;
        assert!(result.is_err());
    }
}
