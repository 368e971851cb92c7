//! Radio schedule handlers.

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
use wordhouse_core::{Patch, RadioSlot, RadioSlotId};

/// Create schedule slot request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSlotRequest {
    /// Programme name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Programme description.
    pub description: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// When the programme airs.
    pub air_time: DateTime<Utc>,
    /// IANA time zone label the air time was entered in.
    pub time_zone: Option<String>,
}

/// Update schedule slot request.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSlotRequest {
    /// Programme name; cannot be cleared.
    #[serde(default)]
    pub name: Patch<String>,
    /// Programme description.
    #[serde(default)]
    pub description: Patch<String>,
    /// Cover image URL.
    #[serde(default)]
    pub image: Patch<String>,
    /// When the programme airs; cannot be cleared.
    #[serde(default)]
    pub air_time: Patch<DateTime<Utc>>,
    /// IANA time zone label.
    #[serde(default)]
    pub time_zone: Patch<String>,
}

/// Creates a schedule slot.
pub async fn create_slot(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSlotRequest>,
) -> ApiResult<Created<RadioSlot>> {
    request.validate()?;

    let slot = RadioSlot {
        id: RadioSlotId::new(),
        name: request.name,
        description: request.description,
        image: request.image,
        air_time: request.air_time,
        time_zone: request.time_zone,
        created_at: Utc::now(),
    };

    Ok(Created(state.content.radio_slots.insert(slot)))
}

/// Updates a slot with partial-field semantics.
pub async fn update_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RadioSlotId>,
    Json(request): Json<UpdateSlotRequest>,
) -> ApiResult<Json<RadioSlot>> {
    Validator::new()
        .not_cleared("name", &request.name)
        .not_cleared("air_time", &request.air_time)
        .finish()?;

    let updated = state.content.radio_slots.update(&id, |slot| {
        request.name.apply_to_required(&mut slot.name);
        request.description.apply_to(&mut slot.description);
        request.image.apply_to(&mut slot.image);
        request.air_time.apply_to_required(&mut slot.air_time);
        request.time_zone.apply_to(&mut slot.time_zone);
    })?;

    Ok(Json(updated))
}

/// Deletes a slot.
pub async fn delete_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RadioSlotId>,
) -> ApiResult<MessageResponse> {
    state.content.radio_slots.remove(&id)?;
    Ok(MessageResponse::new("Schedule deleted"))
}

/// Lists every slot, latest air time first.
pub async fn list_all(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<RadioSlot>>> {
    Ok(Json(
        state
            .content
            .radio_slots
            .sorted_by(|a, b| b.air_time.cmp(&a.air_time)),
    ))
}

/// Lists slots airing strictly after now, soonest first.
pub async fn list_future(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<RadioSlot>>> {
    let now = Utc::now();
    Ok(Json(state.content.radio_slots.filter_sorted(
        |s| s.air_time > now,
        |a, b| a.air_time.cmp(&b.air_time),
    )))
}

/// Returns the slot currently on air: the latest one whose air time is at or
/// before now, or null when nothing has aired yet.
pub async fn now_playing(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<RadioSlot>>> {
    let now = Utc::now();
    let current = state
        .content
        .radio_slots
        .filter_sorted(|s| s.air_time <= now, |a, b| b.air_time.cmp(&a.air_time))
        .into_iter()
        .next();
    Ok(Json(current))
}

/// Returns the next slot to air: the earliest one strictly after now, or
/// null when the schedule is exhausted.
pub async fn up_next(State(state): State<Arc<AppState>>) -> ApiResult<Json<Option<RadioSlot>>> {
    let now = Utc::now();
    let next = state
        .content
        .radio_slots
        .filter_sorted(|s| s.air_time > now, |a, b| a.air_time.cmp(&b.air_time))
        .into_iter()
        .next();
    Ok(Json(next))
}
