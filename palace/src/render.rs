//! Rendering: the whole palace as a standalone SVG document.
//!
//! Draw order is corridors first, then per room its floor, walls, and name,
//! then the room's object markers with their labels. The scene reads the
//! palace and never mutates it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use crate::geometry::Segment;
use crate::layout::Layout;
use crate::model::{Palace, PalaceObject, Room};

const FLOOR_FILL: &str = "#f9f6f0";
const WALL_STROKE: &str = "#5a4a3a";
const WALL_WIDTH: f64 = 2.0;
const CORRIDOR_WIDTH: f64 = 1.0;
const CORRIDOR_OPACITY: f64 = 0.7;
const TEXT_FILL: &str = "#3a2a1a";

const OBJECT_FILL: &str = "#8a6a4a";
const OBJECT_FILL_REMEMBERED: &str = "#4a8f4a";
const OBJECT_FILL_SELECTED: &str = "#e06020";
const OBJECT_STROKE: &str = "#5a3a2a";
const OBJECT_STROKE_SELECTED: &str = "#a03000";
const OBJECT_STROKE_WIDTH: f64 = 1.5;

/// Baseline of the room name, measured down from the room's top edge.
const ROOM_NAME_OFFSET: f64 = 18.0;
/// Gap between an object marker and the baseline of its label.
const OBJECT_LABEL_GAP: f64 = 10.0;

/// A palace scene that formats as SVG markup.
pub struct SvgScene<'a> {
    pub layout: &'a Layout,
    pub palace: &'a Palace,
    /// Object drawn with the selection colours, if any.
    pub selected: Option<&'a str>,
}

/// Render `palace` to an SVG document sized by [`Layout::canvas_size`].
#[must_use]
pub fn render_svg(layout: &Layout, palace: &Palace, selected: Option<&str>) -> String {
    SvgScene { layout, palace, selected }.to_string()
}

impl fmt::Display for SvgScene<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.layout.canvas_size(&self.palace.rooms);
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = size.width,
            h = size.height
        )?;
        for corridor in self.layout.corridors(&self.palace.rooms) {
            write_line(f, corridor, CORRIDOR_WIDTH, Some(CORRIDOR_OPACITY))?;
        }
        for room in &self.palace.rooms {
            self.write_room(f, room)?;
        }
        writeln!(f, "</svg>")
    }
}

impl SvgScene<'_> {
    fn write_room(&self, f: &mut fmt::Formatter<'_>, room: &Room) -> fmt::Result {
        let rect = self.layout.room_rect(room);
        writeln!(
            f,
            r#"<g data-room-id="{id}">"#,
            id = Escaped(&room.id)
        )?;
        writeln!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{FLOOR_FILL}" stroke="none"/>"#,
            rect.x, rect.y, rect.width, rect.height
        )?;
        for seg in self.layout.wall_segments(room, &self.palace.rooms) {
            write_line(f, seg, WALL_WIDTH, None)?;
        }
        writeln!(
            f,
            r#"<text x="{}" y="{}" text-anchor="middle" font-weight="bold" font-size="12" fill="{TEXT_FILL}">{}</text>"#,
            rect.center().x,
            rect.y + ROOM_NAME_OFFSET,
            Escaped(&room.name)
        )?;
        for obj in &room.objects {
            self.write_object(f, room, obj)?;
        }
        writeln!(f, "</g>")
    }

    fn write_object(&self, f: &mut fmt::Formatter<'_>, room: &Room, obj: &PalaceObject) -> fmt::Result {
        let center = self.layout.object_to_pixel(room, obj);
        let selected = self.selected == Some(obj.id.as_str());
        let (fill, stroke) = if selected {
            (OBJECT_FILL_SELECTED, OBJECT_STROKE_SELECTED)
        } else if obj.has_memory() {
            (OBJECT_FILL_REMEMBERED, OBJECT_STROKE)
        } else {
            (OBJECT_FILL, OBJECT_STROKE)
        };
        writeln!(
            f,
            r#"<circle data-object-id="{}" cx="{}" cy="{}" r="{}" fill="{fill}" stroke="{stroke}" stroke-width="{OBJECT_STROKE_WIDTH}"/>"#,
            Escaped(&obj.id),
            center.x,
            center.y,
            self.layout.obj_radius
        )?;
        writeln!(
            f,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="9" fill="{TEXT_FILL}">{}</text>"#,
            center.x,
            center.y + self.layout.obj_radius + OBJECT_LABEL_GAP,
            Escaped(&obj.name)
        )
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, seg: Segment, width: f64, opacity: Option<f64>) -> fmt::Result {
    write!(
        f,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{WALL_STROKE}" stroke-width="{width}" stroke-linecap="round""#,
        seg.from.x, seg.from.y, seg.to.x, seg.to.y
    )?;
    if let Some(o) = opacity {
        write!(f, r#" stroke-opacity="{o}""#)?;
    }
    writeln!(f, "/>")
}

/// Formats a string with XML special characters escaped.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
