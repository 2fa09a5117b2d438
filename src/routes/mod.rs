//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the palace JSON API, the geometry endpoints and the SVG scene under
//! a single Axum router. Every error body has the shape `{"error": "..."}`;
//! handlers log the underlying cause and return a short message.

pub mod generate;
pub mod layout;
pub mod palace;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Status plus `{"error": message}` body.
pub type ApiError = (StatusCode, Json<serde_json::Value>);

#[must_use]
pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/palace", get(palace::get_palace).post(palace::save_palace))
        .route("/api/palace/topic", put(palace::set_topic))
        .route("/api/generate-room", post(generate::generate_room))
        .route("/api/palace/rooms", post(generate::append_room))
        .route(
            "/api/palace/rooms/{room_id}/objects/{object_id}/memory",
            put(palace::set_memory),
        )
        .route("/api/palace/layout", get(layout::get_layout))
        .route("/api/palace/hit", post(layout::hit))
        .route("/api/palace/svg", get(layout::get_svg))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
