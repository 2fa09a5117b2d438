//! Connectivity, doorways, and the line work derived from them.
//!
//! Adjacency is geometric (two rooms in neighbouring grid cells); connection
//! is logical (one room lists the other in `connections`). A wall only gets a
//! doorway when both hold. Connections are stored on one side only, usually
//! on the newer room, so every check looks in both directions.

#[cfg(test)]
#[path = "walls_test.rs"]
mod walls_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Segment};
use crate::layout::Layout;
use crate::model::{GridPosition, Room};

/// True if either room lists the other in its connections.
#[must_use]
pub fn rooms_are_connected(a: &Room, b: &Room) -> bool {
    a.connections.iter().any(|id| *id == b.id) || b.connections.iter().any(|id| *id == a.id)
}

/// One of the four walls of a room, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    /// Grid step from a room to its neighbour on this side. North is `y - 1`.
    #[must_use]
    pub fn offset(self) -> (i64, i64) {
        match self {
            Side::North => (0, -1),
            Side::South => (0, 1),
            Side::West => (-1, 0),
            Side::East => (1, 0),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::West => Side::East,
            Side::East => Side::West,
        }
    }

    /// The side of `from` that faces `to`, if the cells are grid neighbours.
    #[must_use]
    pub fn between(from: GridPosition, to: GridPosition) -> Option<Side> {
        Side::ALL.into_iter().find(|s| from.step(*s) == Some(to))
    }
}

impl GridPosition {
    /// The neighbouring cell on `side`. A cell at the edge of the `i64` grid
    /// has no neighbour beyond it.
    #[must_use]
    pub fn step(self, side: Side) -> Option<GridPosition> {
        let (dx, dy) = side.offset();
        self.offset(dx, dy)
    }
}

/// The room on `side` of `room`, provided it is also connected to `room`.
#[must_use]
pub fn connected_neighbor<'a>(room: &Room, side: Side, rooms: &'a [Room]) -> Option<&'a Room> {
    let cell = room.grid_position.step(side)?;
    rooms
        .iter()
        .find(|r| r.grid_position == cell && rooms_are_connected(room, r))
}

/// Which walls of a room carry a doorway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doorways {
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
}

impl Doorways {
    #[must_use]
    pub fn for_room(room: &Room, rooms: &[Room]) -> Self {
        let has = |side| connected_neighbor(room, side, rooms).is_some();
        Self { north: has(Side::North), south: has(Side::South), west: has(Side::West), east: has(Side::East) }
    }

    #[must_use]
    pub fn has(&self, side: Side) -> bool {
        match side {
            Side::North => self.north,
            Side::South => self.south,
            Side::West => self.west,
            Side::East => self.east,
        }
    }
}

/// A wall ready to draw: one segment when solid, two around a doorway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub side: Side,
    pub doorway: bool,
    pub segments: Vec<Segment>,
}

impl Layout {
    /// The four walls of `room` in [`Side::ALL`] order.
    #[must_use]
    pub fn walls(&self, room: &Room, rooms: &[Room]) -> Vec<Wall> {
        let doors = Doorways::for_room(room, rooms);
        Side::ALL
            .into_iter()
            .map(|side| {
                let doorway = doors.has(side);
                let edge = self.wall_edge(room, side);
                let segments = if doorway { self.split_for_door(edge, side) } else { vec![edge] };
                Wall { side, doorway, segments }
            })
            .collect()
    }

    /// All wall segments of `room`, flattened.
    #[must_use]
    pub fn wall_segments(&self, room: &Room, rooms: &[Room]) -> Vec<Segment> {
        self.walls(room, rooms)
            .into_iter()
            .flat_map(|w| w.segments)
            .collect()
    }

    /// Corridor lines between connected grid neighbours, one per pair.
    ///
    /// Each line joins the midpoints of the two facing walls and runs from
    /// the room with the lower id to the other. Connections to ids that do
    /// not exist, or to rooms that are not in a neighbouring cell, are
    /// skipped.
    #[must_use]
    pub fn corridors(&self, rooms: &[Room]) -> Vec<Segment> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut out = Vec::new();
        for room in rooms {
            for conn_id in &room.connections {
                let Some(neighbor) = rooms.iter().find(|r| r.id == *conn_id) else {
                    continue;
                };
                let (first, second) = if room.id <= neighbor.id { (room, neighbor) } else { (neighbor, room) };
                if !seen.insert((first.id.as_str(), second.id.as_str())) {
                    continue;
                }
                let Some(side) = Side::between(first.grid_position, second.grid_position) else {
                    continue;
                };
                out.push(Segment::new(
                    self.wall_midpoint(first, side),
                    self.wall_midpoint(second, side.opposite()),
                ));
            }
        }
        out
    }

    fn wall_edge(&self, room: &Room, side: Side) -> Segment {
        let r = self.room_rect(room);
        let (right, bottom) = (r.x + r.width, r.y + r.height);
        match side {
            Side::North => Segment::new(Point::new(r.x, r.y), Point::new(right, r.y)),
            Side::South => Segment::new(Point::new(r.x, bottom), Point::new(right, bottom)),
            Side::West => Segment::new(Point::new(r.x, r.y), Point::new(r.x, bottom)),
            Side::East => Segment::new(Point::new(right, r.y), Point::new(right, bottom)),
        }
    }

    fn wall_midpoint(&self, room: &Room, side: Side) -> Point {
        self.wall_edge(room, side).midpoint()
    }

    // Edges run left-to-right or top-to-bottom.
    fn split_for_door(&self, edge: Segment, side: Side) -> Vec<Segment> {
        let half = self.door_size / 2.0;
        let mid = edge.midpoint();
        let (gap_start, gap_end) = match side {
            Side::North | Side::South => (Point::new(mid.x - half, mid.y), Point::new(mid.x + half, mid.y)),
            Side::West | Side::East => (Point::new(mid.x, mid.y - half), Point::new(mid.x, mid.y + half)),
        };
        vec![Segment::new(edge.from, gap_start), Segment::new(gap_end, edge.to)]
    }
}
