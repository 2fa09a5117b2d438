use super::*;
use crate::state::test_helpers::{sample_room, test_app_state};

async fn seeded_state(dir: &tempfile::TempDir) -> AppState {
    let state = test_app_state(dir);
    let mut palace = Palace::new("Rome");
    palace.push_room(sample_room("r1", 0, 0, &[]));
    state.store.save(&palace).await.unwrap();
    state
}

// =============================================================================
// GET /api/palace
// =============================================================================

#[tokio::test]
async fn get_palace_empty_returns_empty_object() {
    let dir = tempfile::tempdir().unwrap();
    let Json(body) = get_palace(State(test_app_state(&dir))).await.unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn get_palace_returns_camel_case_document() {
    let dir = tempfile::tempdir().unwrap();
    let Json(body) = get_palace(State(seeded_state(&dir).await)).await.unwrap();
    assert_eq!(body["topic"], "Rome");
    assert_eq!(body["rooms"][0]["gridPosition"], json!({ "x": 0, "y": 0 }));
    assert_eq!(body["rooms"][0]["objects"][0]["relativePosition"]["x"], 0.5);
}

#[tokio::test]
async fn get_palace_corrupt_file_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(&dir);
    std::fs::write(state.store.path(), "{").unwrap();
    let (status, Json(body)) = get_palace(State(state)).await.unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to read palace");
}

// =============================================================================
// POST /api/palace
// =============================================================================

#[tokio::test]
async fn save_palace_returns_ok_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(&dir);
    let Json(body) = save_palace(State(state.clone()), Json(Palace::new("Memory")))
        .await
        .unwrap();
    assert_eq!(body, json!({ "ok": true }));
    assert_eq!(state.store.load().await.unwrap().unwrap().topic, "Memory");
}

#[tokio::test]
async fn save_palace_unwritable_path_is_500() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the parent directory should be.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let state = AppState::new(
        crate::services::persistence::PalaceStore::new(blocker.join("palace.json")),
        crate::llm::LlmRegistry::default(),
    );
    let (status, Json(body)) = save_palace(State(state), Json(Palace::new("x")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to write palace" }));
}

// =============================================================================
// PUT /api/palace/topic
// =============================================================================

#[tokio::test]
async fn set_topic_renames_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let state = seeded_state(&dir).await;
    let Json(palace) = set_topic(State(state.clone()), Json(TopicBody { topic: "Ancient Rome".into() }))
        .await
        .unwrap();
    assert_eq!(palace.topic, "Ancient Rome");
    assert_eq!(palace.rooms.len(), 1);

    let stored = state.store.load().await.unwrap().unwrap();
    assert_eq!(stored.topic, "Ancient Rome");
    assert_eq!(stored.rooms[0].id, "r1");
}

#[tokio::test]
async fn set_topic_without_palace_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let (status, Json(body)) = set_topic(State(test_app_state(&dir)), Json(TopicBody { topic: "Rome".into() }))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No palace");
}

// =============================================================================
// PUT memory
// =============================================================================

#[tokio::test]
async fn set_memory_updates_object() {
    let dir = tempfile::tempdir().unwrap();
    let state = seeded_state(&dir).await;
    let Json(object) = set_memory(
        State(state.clone()),
        Path(("r1".into(), "r1-o1".into())),
        Json(MemoryBody { memory: "Romulus and Remus".into() }),
    )
    .await
    .unwrap();
    assert_eq!(object.memory, "Romulus and Remus");
    let stored = state.store.load().await.unwrap().unwrap();
    assert_eq!(stored.rooms[0].objects[0].memory, "Romulus and Remus");
}

#[tokio::test]
async fn set_memory_unknown_object_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let state = seeded_state(&dir).await;
    let (status, Json(body)) = set_memory(
        State(state),
        Path(("r1".into(), "nope".into())),
        Json(MemoryBody { memory: "x".into() }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "object not found: nope");
}

#[tokio::test]
async fn set_memory_without_palace_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _) = set_memory(
        State(test_app_state(&dir)),
        Path(("r1".into(), "o1".into())),
        Json(MemoryBody { memory: "x".into() }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn memory_error_to_status_maps_io_to_500() {
    let err = MemoryError::Persist(PersistError::Io(std::io::Error::other("disk")));
    assert_eq!(memory_error_to_status(&err).0, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn memory_error_to_status_maps_room_to_404() {
    let err = MemoryError::Model(ModelError::RoomNotFound("r9".into()));
    assert_eq!(memory_error_to_status(&err), (StatusCode::NOT_FOUND, "room not found: r9".into()));
}
