#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::layout::Layout;
use crate::model::{PalaceObject, Room};

/// What a pointer landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Hit {
    /// An object marker. Carries the owning room so callers can open it.
    #[serde(rename_all = "camelCase")]
    Object { room_id: String, object_id: String },
    /// The body of a room, away from any object marker.
    #[serde(rename_all = "camelCase")]
    Room { room_id: String },
}

impl Layout {
    /// True when `pt` is within `obj_radius` of the object's centre.
    /// A point exactly on the circle counts.
    #[must_use]
    pub fn hit_test_object(&self, pt: Point, room: &Room, obj: &PalaceObject) -> bool {
        pt.distance_to(self.object_to_pixel(room, obj)) <= self.obj_radius
    }

    /// True when `pt` is inside the room rectangle, edges included.
    #[must_use]
    pub fn hit_test_room(&self, pt: Point, room: &Room) -> bool {
        self.room_rect(room).contains(pt)
    }

    /// Resolve a pointer against a whole palace.
    ///
    /// Objects are drawn on top of rooms and are much smaller targets, so every
    /// object in every room is tried before any room body. Within each pass
    /// the first match in room (then object) order wins. `None` means the
    /// pointer hit empty canvas.
    #[must_use]
    pub fn hit_test(&self, pt: Point, rooms: &[Room]) -> Option<Hit> {
        for room in rooms {
            if let Some(obj) = room.objects.iter().find(|o| self.hit_test_object(pt, room, o)) {
                return Some(Hit::Object { room_id: room.id.clone(), object_id: obj.id.clone() });
            }
        }
        rooms
            .iter()
            .find(|r| self.hit_test_room(pt, r))
            .map(|r| Hit::Room { room_id: r.id.clone() })
    }
}
