//! Sermon handlers.
//!
//! Sermons are the file-bearing records: upload and edit are multipart
//! endpoints whose file parts flow through the lifecycle manager, and delete
//! cascades over both file slots before removing the record.

use crate::{
    extract::FormData,
    response::{Created, MessageResponse},
    state::AppState,
    validation::{parse_date, Validator},
    ApiResult,
};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use wordhouse_core::{Sermon, SermonId};

/// Multipart field name for the thumbnail image.
const THUMBNAIL_FIELD: &str = "thumbnail";
/// Multipart field name for the audio recording.
const AUDIO_FIELD: &str = "audioFile";

/// Lists sermons, newest first.
pub async fn list_sermons(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Sermon>>> {
    Ok(Json(
        state.assets.sermons.sorted_by(|a, b| b.date.cmp(&a.date)),
    ))
}

/// Fetches one sermon.
pub async fn get_sermon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SermonId>,
) -> ApiResult<Json<Sermon>> {
    Ok(Json(state.assets.sermons.get(&id)?))
}

/// Creates a sermon from a multipart upload.
///
/// File parts are stored before the record is constructed, so the record can
/// only ever carry references whose store succeeded. If the second store
/// fails after the first succeeded, the first object is released best-effort
/// before the error propagates; the record is never created.
pub async fn upload_sermon(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Created<Sermon>> {
    let form = FormData::read(multipart).await?;

    let title = form.text("title").unwrap_or_default();
    let date_raw = form.text("date").unwrap_or_default();
    Validator::new()
        .required("title", title)
        .required("date", date_raw)
        .max_length("title", title, 255)
        .finish()?;
    let date = parse_date("date", date_raw)?;

    let thumbnail = match form.file(THUMBNAIL_FIELD) {
        Some(upload) => Some(state.files.attach(upload.clone()).await?),
        None => None,
    };

    let audio = match form.file(AUDIO_FIELD) {
        Some(upload) => match state.files.attach(upload.clone()).await {
            Ok(reference) => Some(reference),
            Err(err) => {
                if let Some(thumb) = &thumbnail {
                    state.files.release(thumb.as_str()).await;
                }
                return Err(err.into());
            }
        },
        None => None,
    };

    let sermon = Sermon {
        id: SermonId::new(),
        title: title.to_string(),
        date,
        speaker: form.text("speaker").map(String::from),
        series: form.text("series").map(String::from),
        thumbnail: thumbnail.map(|r| r.into_string()),
        audio: audio.map(|r| r.into_string()),
    };

    Ok(Created(state.assets.sermons.insert(sermon)))
}

/// Edits a sermon from a partial multipart body.
///
/// An omitted file part leaves the slot unchanged. A provided part replaces
/// the slot: the new object is stored first and the old one deleted only
/// after that store is confirmed, so a failed re-upload leaves the record
/// pointing at the still-valid old object.
pub async fn edit_sermon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SermonId>,
    multipart: Multipart,
) -> ApiResult<Json<Sermon>> {
    let existing = state.assets.sermons.get(&id)?;
    let form = FormData::read(multipart).await?;

    let date = match form.text("date") {
        Some(raw) if !raw.is_empty() => Some(parse_date("date", raw)?),
        _ => None,
    };

    let new_thumbnail = match form.file(THUMBNAIL_FIELD) {
        Some(upload) => Some(
            state
                .files
                .replace(existing.thumbnail.as_deref(), upload.clone())
                .await?
                .into_string(),
        ),
        None => None,
    };

    let new_audio = match form.file(AUDIO_FIELD) {
        Some(upload) => Some(
            state
                .files
                .replace(existing.audio.as_deref(), upload.clone())
                .await?
                .into_string(),
        ),
        None => None,
    };

    let updated = state.assets.sermons.update(&id, |sermon| {
        if let Some(title) = form.text("title") {
            if !title.is_empty() {
                sermon.title = title.to_string();
            }
        }
        if let Some(date) = date {
            sermon.date = date;
        }
        if let Some(speaker) = form.text("speaker") {
            sermon.speaker = Some(speaker.to_string());
        }
        if let Some(series) = form.text("series") {
            sermon.series = Some(series.to_string());
        }
        if let Some(reference) = new_thumbnail {
            sermon.thumbnail = Some(reference);
        }
        if let Some(reference) = new_audio {
            sermon.audio = Some(reference);
        }
    })?;

    Ok(Json(updated))
}

/// Deletes a sermon and cascades over its file slots.
///
/// Object deletions are best-effort; a failed deletion is recorded by the
/// lifecycle manager and never blocks removal of the record.
pub async fn delete_sermon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SermonId>,
) -> ApiResult<MessageResponse> {
    let sermon = state.assets.sermons.get(&id)?;

    let references: Vec<String> = sermon.file_references().map(String::from).collect();
    state
        .files
        .release_all(references.iter().map(String::as_str))
        .await;

    state.assets.sermons.remove(&id)?;
    Ok(MessageResponse::new("Sermon deleted successfully"))
}

/// Lists the distinct sermon series.
pub async fn list_series(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.assets.sermons.distinct(|s| s.series.clone())))
}

/// Lists the distinct speakers.
pub async fn list_speakers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.assets.sermons.distinct(|s| s.speaker.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_state;
    use chrono::Utc;

    fn seeded_sermon(state: &AppState, title: &str, series: Option<&str>) -> Sermon {
        state.assets.sermons.insert(Sermon {
            id: SermonId::new(),
            title: title.to_string(),
            date: Utc::now(),
            speaker: Some("P. Mensah".to_string()),
            series: series.map(String::from),
            thumbnail: None,
            audio: None,
        })
    }

    #[tokio::test]
    async fn get_unknown_sermon_is_not_found() {
        let harness = test_state();
        let result = get_sermon(State(harness.state.clone()), Path(SermonId::new())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn series_listing_is_distinct() {
        let harness = test_state();
        seeded_sermon(&harness.state, "A", Some("Foundations"));
        seeded_sermon(&harness.state, "B", Some("Foundations"));
        seeded_sermon(&harness.state, "C", None);

        let Json(series) = list_series(State(harness.state.clone())).await.unwrap();
        assert_eq!(series, vec!["Foundations".to_string()]);
    }

    #[tokio::test]
    async fn delete_cascades_over_file_slots() {
        let harness = test_state();
        let thumb = harness
            .state
            .files
            .attach(wordhouse_media::FileUpload::new(
                "t.png",
                "image/png",
                "thumb-bytes",
            ))
            .await
            .unwrap();
        let audio = harness
            .state
            .files
            .attach(wordhouse_media::FileUpload::new(
                "a.mp3",
                "audio/mpeg",
                "audio-bytes",
            ))
            .await
            .unwrap();

        let sermon = harness.state.assets.sermons.insert(Sermon {
            id: SermonId::new(),
            title: "With files".to_string(),
            date: Utc::now(),
            speaker: None,
            series: None,
            thumbnail: Some(thumb.clone().into_string()),
            audio: Some(audio.clone().into_string()),
        });

        delete_sermon(State(harness.state.clone()), Path(sermon.id))
            .await
            .unwrap();

        assert!(!harness.objects.contains(&thumb));
        assert!(!harness.objects.contains(&audio));
        assert!(harness.state.assets.sermons.get(&sermon.id).is_err());
    }
}
