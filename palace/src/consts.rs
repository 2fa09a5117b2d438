//! Fixed layout constants, in pixels.

// ── Rooms ───────────────────────────────────────────────────────

/// Width of every room rectangle.
pub const ROOM_WIDTH: f64 = 180.0;

/// Height of every room rectangle.
pub const ROOM_HEIGHT: f64 = 140.0;

/// Space between neighbouring rooms on the grid.
pub const GUTTER: f64 = 40.0;

/// Margin around the whole palace.
pub const CANVAS_PADDING: f64 = 40.0;

// ── Objects and walls ───────────────────────────────────────────

/// Radius of the circular object markers.
pub const OBJ_RADIUS: f64 = 8.0;

/// Width of the gap left in a wall for a doorway.
pub const DOOR_SIZE: f64 = 30.0;
