//! Room generation service: topic + existing rooms → one new room via an LLM.
//!
//! DESIGN
//! ======
//! The prompt describes the palace so far and asks for a single room as
//! JSON. The reply is unwrapped from an optional markdown fence, parsed as a
//! `GeneratedRoom`, checked against the grid (the cell must be free and
//! non-negative) and only then given ids. There is no retry; a bad reply is a
//! failed request.

use std::fmt::Write;

use palace::{GeneratedRoom, GridPosition, Palace, Room};
use tracing::{info, warn};

use super::persistence::{PalaceStore, PersistError};
use crate::llm::types::{LlmError, Message};
use crate::llm::{LlmRegistry, Provider};

pub const SYSTEM_PROMPT: &str = "You output ONLY valid JSON with no explanation, markdown, or code blocks.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0} is not configured")]
    ProviderNotConfigured(Provider),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("generated room is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("generated room at ({}, {}) is already occupied", .0.x, .0.y)]
    Occupied(GridPosition),
    #[error("generated room at ({}, {}) has a negative coordinate", .0.x, .0.y)]
    NegativePosition(GridPosition),
    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),
}

// =============================================================================
// PROMPT
// =============================================================================

/// User prompt asking for one new room about `topic` next to `rooms`.
#[must_use]
pub fn build_prompt(topic: &str, rooms: &[Room]) -> String {
    let mut prompt = format!("Generate a room for a mind palace themed around \"{topic}\".\n");

    if rooms.is_empty() {
        prompt.push_str(
            "This is the first room. Place it at gridPosition { \"x\": 0, \"y\": 0 } with an empty connections array.\n",
        );
    } else {
        prompt.push_str("Existing rooms:\n");
        for room in rooms {
            let _ = writeln!(
                prompt,
                "- \"{}\" at grid position ({}, {}) with id \"{}\"",
                room.name, room.grid_position.x, room.grid_position.y, room.id
            );
        }
        let occupied: Vec<String> = rooms
            .iter()
            .map(|r| format!("({},{})", r.grid_position.x, r.grid_position.y))
            .collect();
        let _ = writeln!(prompt, "\nOccupied positions: {}\n", occupied.join(", "));
        prompt.push_str(
            "Place the new room adjacent (up/down/left/right) to an existing room at an unoccupied position. \
             Set connections to the id(s) of directly adjacent rooms.\n",
        );
    }

    prompt.push_str(
        r#"
Requirements:
- 3 to 5 vivid, memorable objects per room
- Each object should be a strong visual anchor for the loci memory method
- relativePosition x and y are 0.0–1.0 within the room (spread objects out, avoid edges)

Return ONLY valid JSON in this exact format, no explanation:
{
  "name": "Room Name",
  "description": "Brief atmospheric description",
  "gridPosition": { "x": <integer>, "y": <integer> },
  "connections": ["<existing room id>"],
  "objects": [
    {
      "name": "Object Name",
      "description": "Vivid sensory description useful as a memory anchor",
      "relativePosition": { "x": <0.0-1.0>, "y": <0.0-1.0> }
    }
  ]
}"#,
    );
    prompt
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

/// Strip a surrounding markdown code fence (with or without a language tag).
#[must_use]
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line, if any.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Reject placements on an occupied or negative cell.
///
/// # Errors
///
/// Returns [`GenerateError::Occupied`] or [`GenerateError::NegativePosition`].
pub fn check_placement(generated: &GeneratedRoom, palace: &Palace) -> Result<(), GenerateError> {
    let pos = generated.grid_position;
    if pos.x < 0 || pos.y < 0 {
        return Err(GenerateError::NegativePosition(pos));
    }
    if palace.is_occupied(pos) {
        return Err(GenerateError::Occupied(pos));
    }
    Ok(())
}

/// Parse and validate an LLM reply into a room with fresh ids.
///
/// # Errors
///
/// Returns an error if the reply is not a generated room or its placement
/// is rejected.
pub fn adopt_reply(text: &str, palace: &Palace) -> Result<Room, GenerateError> {
    let generated: GeneratedRoom = serde_json::from_str(extract_json(text))?;
    check_placement(&generated, palace)?;
    Ok(generated.into_room())
}

// =============================================================================
// GENERATION
// =============================================================================

/// Ask `provider` for a new room for `palace`, next to its existing rooms.
///
/// # Errors
///
/// Returns an error if the provider is not configured, the LLM call fails,
/// or the reply is rejected.
pub async fn generate_room(
    llm: &LlmRegistry,
    provider: Provider,
    palace: &Palace,
) -> Result<Room, GenerateError> {
    let client = llm
        .get(provider)
        .ok_or(GenerateError::ProviderNotConfigured(provider))?;

    info!(%provider, model = client.model(), existing_rooms = palace.rooms.len(), "generate: requesting room");
    let prompt = build_prompt(&palace.topic, &palace.rooms);
    let response = client
        .chat(llm.max_tokens(), SYSTEM_PROMPT, &[Message::user(prompt)])
        .await?;
    info!(
        %provider,
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        stop_reason = %response.stop_reason,
        "generate: reply received"
    );

    let room = adopt_reply(&response.text(), palace).inspect_err(|e| {
        warn!(%provider, error = %e, "generate: reply rejected");
    })?;
    info!(room_id = %room.id, name = %room.name, objects = room.objects.len(), "generate: room adopted");
    Ok(room)
}

/// Generate a room for the stored palace, append it, and save.
///
/// Holds the store's write lock for the whole cycle.
///
/// # Errors
///
/// Returns [`PersistError::NoPalace`] when nothing is stored, plus any
/// generation or persistence error.
pub async fn generate_and_append(
    store: &PalaceStore,
    llm: &LlmRegistry,
    provider: Provider,
) -> Result<Room, GenerateError> {
    let txn = store.begin().await;
    let mut palace = txn.load().await?.ok_or(PersistError::NoPalace)?;

    let room = generate_room(llm, provider, &palace).await?;
    palace.push_room(room.clone());
    txn.save(&palace).await?;
    Ok(room)
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
