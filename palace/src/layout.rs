#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_PADDING, DOOR_SIZE, GUTTER, OBJ_RADIUS, ROOM_HEIGHT, ROOM_WIDTH};
use crate::geometry::{Point, Rect, Size};
use crate::model::{PalaceObject, Room};

/// Pixel dimensions used to lay out a palace.
///
/// [`Layout::default`] carries the fixed constants from [`crate::consts`];
/// other values exist only so tests and alternate renderers can scale the
/// scene. A `Layout` is plain immutable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub room_width: f64,
    pub room_height: f64,
    pub gutter: f64,
    pub canvas_padding: f64,
    pub obj_radius: f64,
    pub door_size: f64,
}

impl Layout {
    pub const DEFAULT: Layout = Layout {
        room_width: ROOM_WIDTH,
        room_height: ROOM_HEIGHT,
        gutter: GUTTER,
        canvas_padding: CANVAS_PADDING,
        obj_radius: OBJ_RADIUS,
        door_size: DOOR_SIZE,
    };
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inclusive min/max of the occupied grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl GridBounds {
    /// Compute bounds over `rooms`, or `None` for an empty set.
    #[must_use]
    pub fn of(rooms: &[Room]) -> Option<Self> {
        let first = rooms.first()?.grid_position;
        let init = Self { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        Some(rooms.iter().fold(init, |b, r| {
            let p = r.grid_position;
            Self { min_x: b.min_x.min(p.x), min_y: b.min_y.min(p.y), max_x: b.max_x.max(p.x), max_y: b.max_y.max(p.y) }
        }))
    }

    /// Rooms left of or above the origin fall outside the canvas that
    /// [`Layout::canvas_size`] computes.
    #[must_use]
    pub fn has_negative(&self) -> bool {
        self.min_x < 0 || self.min_y < 0
    }
}

#[allow(clippy::cast_precision_loss)]
impl Layout {
    /// Top-left pixel of the room's rectangle.
    #[must_use]
    pub fn room_to_pixel(&self, room: &Room) -> Point {
        let g = room.grid_position;
        Point {
            x: self.canvas_padding + g.x as f64 * (self.room_width + self.gutter),
            y: self.canvas_padding + g.y as f64 * (self.room_height + self.gutter),
        }
    }

    /// The room's full pixel rectangle.
    #[must_use]
    pub fn room_rect(&self, room: &Room) -> Rect {
        let origin = self.room_to_pixel(room);
        Rect { x: origin.x, y: origin.y, width: self.room_width, height: self.room_height }
    }

    /// Centre pixel of an object's marker.
    #[must_use]
    pub fn object_to_pixel(&self, room: &Room, obj: &PalaceObject) -> Point {
        let origin = self.room_to_pixel(room);
        Point {
            x: origin.x + obj.relative_position.x * self.room_width,
            y: origin.y + obj.relative_position.y * self.room_height,
        }
    }

    /// Canvas extent that bounds every occupied cell from the origin to the
    /// furthest room, plus padding. Empty input gets room for one room.
    ///
    /// Cells between the origin and the maximum are reserved whether or not
    /// they hold a room. Grid coordinates are expected to be non-negative;
    /// see [`GridBounds::has_negative`].
    #[must_use]
    pub fn canvas_size(&self, rooms: &[Room]) -> Size {
        let Some(bounds) = GridBounds::of(rooms) else {
            return Size {
                width: self.canvas_padding * 2.0 + self.room_width,
                height: self.canvas_padding * 2.0 + self.room_height,
            };
        };
        let max_x = bounds.max_x as f64;
        let max_y = bounds.max_y as f64;
        Size {
            width: self.canvas_padding * 2.0 + (max_x + 1.0) * self.room_width + max_x * self.gutter,
            height: self.canvas_padding * 2.0 + (max_y + 1.0) * self.room_height + max_y * self.gutter,
        }
    }
}
