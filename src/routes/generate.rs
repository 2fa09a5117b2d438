//! Room generation routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use palace::{Palace, Room};
use serde::Deserialize;
use tracing::error;

use super::{ApiError, api_error};
use crate::llm::Provider;
use crate::services::generate::{self, GenerateError};
use crate::services::persistence::PersistError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRoomBody {
    pub topic: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
    pub provider: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct AppendRoomBody {
    pub provider: Option<String>,
}

fn parse_provider(raw: Option<&str>) -> Result<Provider, ApiError> {
    Provider::from_request(raw).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

/// `POST /api/generate-room`: generate a room next to the given rooms.
/// Nothing is persisted.
pub async fn generate_room(
    State(state): State<AppState>,
    Json(body): Json<GenerateRoomBody>,
) -> Result<Json<Room>, ApiError> {
    let provider = parse_provider(body.provider.as_deref())?;
    let palace = Palace { topic: body.topic, rooms: body.rooms };
    generate::generate_room(&state.llm, provider, &palace)
        .await
        .map(Json)
        .map_err(|e| generate_error_response(&e))
}

/// `POST /api/palace/rooms`: generate a room for the stored palace and
/// append it.
pub async fn append_room(
    State(state): State<AppState>,
    Json(body): Json<AppendRoomBody>,
) -> Result<Json<Room>, ApiError> {
    let provider = parse_provider(body.provider.as_deref())?;
    generate::generate_and_append(&state.store, &state.llm, provider)
        .await
        .map(Json)
        .map_err(|e| generate_error_response(&e))
}

fn generate_error_response(err: &GenerateError) -> ApiError {
    let (status, message) = generate_error_to_status(err);
    if status.is_server_error() {
        error!(error = %err, "generate-room error");
    }
    api_error(status, message)
}

pub(crate) fn generate_error_to_status(err: &GenerateError) -> (StatusCode, String) {
    match err {
        GenerateError::ProviderNotConfigured(p) => {
            (StatusCode::SERVICE_UNAVAILABLE, format!("Provider not configured: {p}"))
        }
        GenerateError::Persist(PersistError::NoPalace) => (StatusCode::NOT_FOUND, "No palace".into()),
        GenerateError::Persist(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to write palace".into()),
        GenerateError::Llm(_)
        | GenerateError::InvalidJson(_)
        | GenerateError::Occupied(_)
        | GenerateError::NegativePosition(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate room".into()),
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
