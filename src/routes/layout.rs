//! Geometry routes: computed layout, pointer hit-testing and the SVG scene.
//!
//! All three work on the stored palace and the server's `Layout`; the
//! geometry itself lives in the `palace` crate.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use palace::walls::Wall;
use palace::{Doorways, GridBounds, Hit, Layout, Palace, Point, Rect, Room, Segment, Size};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::{ApiError, api_error};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutView {
    pub canvas: Size,
    pub rooms: Vec<RoomView>,
    pub corridors: Vec<Segment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: String,
    pub name: String,
    pub rect: Rect,
    pub doorways: Doorways,
    pub walls: Vec<Wall>,
    pub objects: Vec<ObjectView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectView {
    pub id: String,
    pub name: String,
    pub center: Point,
    pub remembered: bool,
}

#[derive(Debug, Serialize)]
pub struct HitResponse {
    pub hit: Option<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct SvgQuery {
    pub selected: Option<String>,
}

/// Pixel geometry for every room, object and corridor.
#[must_use]
pub fn layout_view(layout: &Layout, rooms: &[Room]) -> LayoutView {
    let room_views = rooms
        .iter()
        .map(|room| RoomView {
            id: room.id.clone(),
            name: room.name.clone(),
            rect: layout.room_rect(room),
            doorways: Doorways::for_room(room, rooms),
            walls: layout.walls(room, rooms),
            objects: room
                .objects
                .iter()
                .map(|obj| ObjectView {
                    id: obj.id.clone(),
                    name: obj.name.clone(),
                    center: layout.object_to_pixel(room, obj),
                    remembered: obj.has_memory(),
                })
                .collect(),
        })
        .collect();

    LayoutView { canvas: layout.canvas_size(rooms), rooms: room_views, corridors: layout.corridors(rooms) }
}

async fn load_palace(state: &AppState) -> Result<Palace, ApiError> {
    let palace = state
        .store
        .load()
        .await
        .map_err(|e| {
            error!(error = %e, "layout: load failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read palace")
        })?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No palace"))?;

    // Negative cells are drawn off-canvas.
    if GridBounds::of(&palace.rooms).is_some_and(|b| b.has_negative()) {
        warn!(topic = %palace.topic, "layout: palace has rooms at negative grid positions");
    }
    Ok(palace)
}

/// `GET /api/palace/layout`
pub async fn get_layout(State(state): State<AppState>) -> Result<Json<LayoutView>, ApiError> {
    let palace = load_palace(&state).await?;
    Ok(Json(layout_view(&state.layout, &palace.rooms)))
}

/// `POST /api/palace/hit`: the object (preferred) or room under `{x, y}`.
pub async fn hit(State(state): State<AppState>, Json(pt): Json<Point>) -> Result<Json<HitResponse>, ApiError> {
    let palace = load_palace(&state).await?;
    Ok(Json(HitResponse { hit: state.layout.hit_test(pt, &palace.rooms) }))
}

/// `GET /api/palace/svg?selected=<object id>`
pub async fn get_svg(State(state): State<AppState>, Query(query): Query<SvgQuery>) -> Result<Response, ApiError> {
    let palace = load_palace(&state).await?;
    let svg = palace::render::render_svg(&state.layout, &palace, query.selected.as_deref());
    Ok(([(CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
