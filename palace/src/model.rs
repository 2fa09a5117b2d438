//! Document model: the palace, its rooms, and the objects inside them.
//!
//! A [`Palace`] exclusively owns its rooms in creation order, and each
//! [`Room`] owns its objects. The whole tree is the unit of persistence and
//! travels as camelCase JSON. Rooms arrive from the generation service as a
//! [`GeneratedRoom`] without ids; [`GeneratedRoom::into_room`] adopts one into
//! the palace by assigning fresh ids.
//!
//! After creation only an object's `memory` note (and the palace topic)
//! changes. Rooms are never removed or reordered.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// A room's cell on the unbounded integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i64,
    pub y: i64,
}

impl GridPosition {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The cell `dx`, `dy` steps away, or `None` past the edge of `i64`.
    #[must_use]
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        Some(Self { x: self.x.checked_add(dx)?, y: self.y.checked_add(dy)? })
    }
}

/// An object's location inside its room as a fraction of room width/height.
///
/// `(0, 0)` is the room's top-left corner and `(1, 1)` its bottom-right.
/// Values outside `[0, 1]` are kept as-is and simply land outside the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePosition {
    pub x: f64,
    pub y: f64,
}

/// A memorable object placed inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalaceObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub relative_position: RelativePosition,
    /// The user's note for this object. Empty until annotated.
    #[serde(default)]
    pub memory: String,
}

impl PalaceObject {
    #[must_use]
    pub fn has_memory(&self) -> bool {
        !self.memory.is_empty()
    }
}

/// A themed room at one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub grid_position: GridPosition,
    /// Ids of rooms this room opens onto. Stored on one side only; see
    /// [`crate::walls::rooms_are_connected`].
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default)]
    pub objects: Vec<PalaceObject>,
}

/// A whole mind palace: a topic and its rooms in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palace {
    pub topic: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
    #[error("object not found: {0}")]
    ObjectNotFound(String),
}

impl Palace {
    /// An empty palace about `topic`.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self { topic: topic.into(), rooms: Vec::new() }
    }

    /// True if any room already sits at `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: GridPosition) -> bool {
        self.rooms.iter().any(|r| r.grid_position == pos)
    }

    /// Rename the palace. Rooms keep the theme they were generated with.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    /// Append a room. Rooms are kept in creation order.
    pub fn push_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Replace the memory note on one object and return the updated object.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RoomNotFound`] or [`ModelError::ObjectNotFound`]
    /// when either id does not resolve.
    pub fn set_memory(
        &mut self,
        room_id: &str,
        object_id: &str,
        memory: impl Into<String>,
    ) -> Result<&PalaceObject, ModelError> {
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or_else(|| ModelError::RoomNotFound(room_id.to_owned()))?;
        let obj = room
            .objects
            .iter_mut()
            .find(|o| o.id == object_id)
            .ok_or_else(|| ModelError::ObjectNotFound(object_id.to_owned()))?;
        obj.memory = memory.into();
        Ok(obj)
    }
}

// =============================================================================
// GENERATED PAYLOAD
// =============================================================================

/// An object as returned by the room generator, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedObject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub relative_position: RelativePosition,
}

/// A room as returned by the room generator, before it has ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRoom {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub grid_position: GridPosition,
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default)]
    pub objects: Vec<GeneratedObject>,
}

impl GeneratedRoom {
    /// Adopt the generated room: fresh ids for the room and every object,
    /// and an empty memory note on each object.
    #[must_use]
    pub fn into_room(self) -> Room {
        let objects = self
            .objects
            .into_iter()
            .map(|o| PalaceObject {
                id: generate_id(),
                name: o.name,
                description: o.description,
                relative_position: o.relative_position,
                memory: String::new(),
            })
            .collect();
        Room {
            id: generate_id(),
            name: self.name,
            description: self.description,
            grid_position: self.grid_position,
            connections: self.connections,
            objects,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;

    /// A bare room at `(x, y)` with the given outgoing connections.
    #[must_use]
    pub fn room(id: &str, x: i64, y: i64, connections: &[&str]) -> Room {
        Room {
            id: id.into(),
            name: format!("Room {id}"),
            description: String::new(),
            grid_position: GridPosition::new(x, y),
            connections: connections.iter().map(|c| (*c).to_owned()).collect(),
            objects: Vec::new(),
        }
    }

    /// An unannotated object at relative position `(rx, ry)`.
    #[must_use]
    pub fn object(id: &str, rx: f64, ry: f64) -> PalaceObject {
        PalaceObject {
            id: id.into(),
            name: format!("Object {id}"),
            description: String::new(),
            relative_position: RelativePosition { x: rx, y: ry },
            memory: String::new(),
        }
    }

    /// `room` with `objects` moved in.
    #[must_use]
    pub fn with_objects(mut room: Room, objects: Vec<PalaceObject>) -> Room {
        room.objects = objects;
        room
    }
}
