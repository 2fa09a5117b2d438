//! Layout and hit-testing engine for the mind palace.
//!
//! A palace is a set of rooms addressed by integer grid cells, each holding a
//! handful of objects placed at fractional positions inside the room. This
//! crate turns that abstract graph into pixel geometry: where each room and
//! object is drawn, how big the canvas must be, which walls carry doorways,
//! and which entity sits under a pointer. Everything here is pure and
//! synchronous; the server and CLI own all I/O.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Palace, room and object types plus the generated-room payload |
//! | [`geometry`] | Pixel-space primitives (`Point`, `Size`, `Rect`, `Segment`) |
//! | [`layout`] | `Layout` configuration and grid-to-pixel transforms |
//! | [`hit`] | Pointer hit-testing against objects and rooms |
//! | [`walls`] | Connectivity, doorway detection, wall and corridor segments |
//! | [`render`] | Standalone SVG scene for a whole palace |
//! | [`id`] | Unique id generation for rooms and objects |
//! | [`consts`] | Fixed layout constants in pixels |

pub mod consts;
pub mod geometry;
pub mod hit;
pub mod id;
pub mod layout;
pub mod model;
pub mod render;
pub mod walls;

pub use geometry::{Point, Rect, Segment, Size};
pub use hit::Hit;
pub use layout::{GridBounds, Layout};
pub use model::{GeneratedObject, GeneratedRoom, GridPosition, ModelError, Palace, PalaceObject, RelativePosition, Room};
pub use walls::{Doorways, Side, rooms_are_connected};
