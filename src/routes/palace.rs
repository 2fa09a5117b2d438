//! Palace document routes: read, overwrite, rename, and annotate objects.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use palace::{ModelError, Palace, PalaceObject};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::{ApiError, api_error};
use crate::services::persistence::PersistError;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Deserialize)]
pub struct MemoryBody {
    pub memory: String,
}

#[derive(Deserialize)]
pub struct TopicBody {
    pub topic: String,
}

/// `GET /api/palace`: the stored palace, or `{}` when there is none.
pub async fn get_palace(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    match state.store.load().await {
        Ok(Some(palace)) => serde_json::to_value(palace).map(Json).map_err(|e| {
            error!(error = %e, "palace: serialize failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read palace")
        }),
        Ok(None) => Ok(Json(json!({}))),
        Err(e) => {
            error!(error = %e, "palace: load failed");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read palace"))
        }
    }
}

/// `POST /api/palace`: overwrite the stored palace.
pub async fn save_palace(
    State(state): State<AppState>,
    Json(palace): Json<Palace>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.store.save(&palace).await.map_err(|e| {
        error!(error = %e, "palace: save failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to write palace")
    })?;
    info!(topic = %palace.topic, rooms = palace.rooms.len(), "palace: saved by client");
    Ok(Json(json!({ "ok": true })))
}

/// `PUT /api/palace/topic`: rename the stored palace.
pub async fn set_topic(
    State(state): State<AppState>,
    Json(body): Json<TopicBody>,
) -> Result<Json<Palace>, ApiError> {
    let palace = state
        .store
        .update(|p| -> Result<Palace, PersistError> {
            p.set_topic(body.topic);
            Ok(p.clone())
        })
        .await
        .map_err(|e| match e {
            PersistError::NoPalace => api_error(StatusCode::NOT_FOUND, "No palace"),
            e => {
                error!(error = %e, "palace: topic update failed");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to write palace")
            }
        })?;
    info!(topic = %palace.topic, "palace: topic updated");
    Ok(Json(palace))
}

/// `PUT /api/palace/rooms/:room_id/objects/:object_id/memory`: set one
/// object's memory note.
pub async fn set_memory(
    State(state): State<AppState>,
    Path((room_id, object_id)): Path<(String, String)>,
    Json(body): Json<MemoryBody>,
) -> Result<Json<PalaceObject>, ApiError> {
    let object = state
        .store
        .update(|p| -> Result<PalaceObject, MemoryError> { Ok(p.set_memory(&room_id, &object_id, body.memory)?.clone()) })
        .await
        .map_err(|e| {
            let (status, message) = memory_error_to_status(&e);
            if status.is_server_error() {
                error!(error = %e, %room_id, %object_id, "palace: memory update failed");
            }
            api_error(status, message)
        })?;
    info!(%room_id, %object_id, remembered = object.has_memory(), "palace: memory updated");
    Ok(Json(object))
}

pub(crate) fn memory_error_to_status(err: &MemoryError) -> (StatusCode, String) {
    match err {
        MemoryError::Persist(PersistError::NoPalace) => (StatusCode::NOT_FOUND, "No palace".into()),
        MemoryError::Model(e) => (StatusCode::NOT_FOUND, e.to_string()),
        MemoryError::Persist(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to write palace".into()),
    }
}

#[cfg(test)]
#[path = "palace_test.rs"]
mod tests;
