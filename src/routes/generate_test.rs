use std::sync::Arc;

use palace::{GridPosition, Palace};

use super::*;
use crate::llm::types::LlmError;
use crate::state::test_helpers::{MockLlm, generated_json, sample_room, test_app_state, test_app_state_with_llm};

fn body(topic: &str, rooms: Vec<Room>, provider: Option<&str>) -> Json<GenerateRoomBody> {
    Json(GenerateRoomBody { topic: topic.into(), rooms, provider: provider.map(Into::into) })
}

// =============================================================================
// POST /api/generate-room
// =============================================================================

#[tokio::test]
async fn generate_room_returns_room_with_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLlm::replying(&generated_json(0, 0, &[])));
    let state = test_app_state_with_llm(&dir, mock);

    let Json(room) = generate_room(State(state.clone()), body("Ancient Rome", vec![], None))
        .await
        .unwrap();

    assert!(!room.id.is_empty());
    assert_eq!(room.name, "The Atrium");
    assert_eq!(room.grid_position, GridPosition::new(0, 0));
    assert!(room.objects.iter().all(|o| !o.id.is_empty() && o.memory.is_empty()));
    // Not persisted.
    assert!(state.store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn generate_room_unknown_provider_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLlm::new(vec![]));
    let state = test_app_state_with_llm(&dir, mock.clone());

    let (status, Json(err)) = generate_room(State(state), body("Rome", vec![], Some("gemini")))
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Unknown provider: gemini");
    assert!(mock.last_prompt().is_none());
}

#[tokio::test]
async fn generate_room_unconfigured_provider_is_503() {
    let dir = tempfile::tempdir().unwrap();
    let (status, Json(err)) = generate_room(State(test_app_state(&dir)), body("Rome", vec![], Some("openai")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(err["error"], "Provider not configured: openai");
}

#[tokio::test]
async fn generate_room_bad_reply_is_generic_500() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLlm::replying("I cannot do that."));
    let state = test_app_state_with_llm(&dir, mock);

    let (status, Json(err)) = generate_room(State(state), body("Rome", vec![], None))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "Failed to generate room");
}

#[tokio::test]
async fn generate_room_occupied_reply_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLlm::replying(&generated_json(0, 0, &[])));
    let state = test_app_state_with_llm(&dir, mock);

    let (status, _) = generate_room(State(state), body("Rome", vec![sample_room("r1", 0, 0, &[])], None))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// POST /api/palace/rooms
// =============================================================================

#[tokio::test]
async fn append_room_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLlm::replying(&generated_json(1, 0, &["r1"])));
    let state = test_app_state_with_llm(&dir, mock);
    let mut palace = Palace::new("Rome");
    palace.push_room(sample_room("r1", 0, 0, &[]));
    state.store.save(&palace).await.unwrap();

    let Json(room) = append_room(State(state.clone()), Json(AppendRoomBody::default()))
        .await
        .unwrap();

    let stored = state.store.load().await.unwrap().unwrap();
    assert_eq!(stored.rooms.last(), Some(&room));
}

#[tokio::test]
async fn append_room_without_palace_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLlm::replying(&generated_json(0, 0, &[])));
    let state = test_app_state_with_llm(&dir, mock);

    let (status, Json(err)) = append_room(State(state), Json(AppendRoomBody::default()))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "No palace");
}

// =============================================================================
// generate_error_to_status
// =============================================================================

#[test]
fn llm_failure_maps_to_500() {
    let err = GenerateError::Llm(LlmError::ApiResponse { status: 529, body: "overloaded".into() });
    assert_eq!(generate_error_to_status(&err), (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate room".into()));
}

#[test]
fn negative_position_maps_to_500() {
    let err = GenerateError::NegativePosition(GridPosition::new(-1, 0));
    assert_eq!(generate_error_to_status(&err).0, StatusCode::INTERNAL_SERVER_ERROR);
}
