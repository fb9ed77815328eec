//! Drawing abstraction
//!
//! The renderer only talks to [`Canvas`]. A [`DisplayList`] records the calls
//! so a paint can be retained, inspected, serialized, and replayed onto a
//! real backend (the egui painter in the GUI binary).

use serde::{Deserialize, Serialize};

use super::color::Rgba;
use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgba,
}

impl Stroke {
    pub fn new(width: f64, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// Text is centred on its anchor, then rotated about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Rgba,
    pub size: f64,
    pub bold: bool,
    /// Radians, clockwise on screen
    pub rotation: f64,
}

impl TextStyle {
    pub fn new(color: Rgba, size: f64) -> Self {
        Self {
            color,
            size,
            bold: false,
            rotation: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotated(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }
}

/// 2D drawing surface
pub trait Canvas {
    /// Wipe the whole surface
    fn clear(&mut self, width: f64, height: f64);
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke);
    fn text(&mut self, anchor: Point, text: &str, style: &TextStyle);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Text {
        anchor: Point,
        text: String,
        style: TextStyle,
    },
}

/// Retained list of draw commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Filled circles, i.e. surface markers
    pub fn markers(&self) -> impl Iterator<Item = (&Point, f64, &Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => Some((center, *radius, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Issue every recorded command against another canvas
    pub fn replay(&self, target: &mut dyn Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear { width, height } => target.clear(*width, *height),
                DrawCommand::Line { from, to, stroke } => target.line(*from, *to, *stroke),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(*center, *radius, *color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    stroke,
                } => target.stroke_circle(*center, *radius, *stroke),
                DrawCommand::Text {
                    anchor,
                    text,
                    style,
                } => target.text(*anchor, text, style),
            }
        }
    }
}

impl Canvas for DisplayList {
    /// Clearing drops everything recorded so far
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke,
        });
    }

    fn text(&mut self, anchor: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            anchor,
            text: text.to_string(),
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_recording() {
        let mut list = DisplayList::new();
        list.fill_circle(Point::new(1.0, 1.0), 3.0, Rgba::rgb(1, 2, 3));
        list.clear(100.0, 50.0);

        assert_eq!(list.len(), 1);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_replay_copies_commands() {
        let mut source = DisplayList::new();
        source.clear(10.0, 10.0);
        source.line(Point::new(0.0, 0.0), Point::new(5.0, 5.0), Stroke::new(1.0, Rgba::rgb(0, 0, 0)));
        source.text(Point::new(2.0, 2.0), "Strike", &TextStyle::new(Rgba::rgb(9, 9, 9), 12.0));

        let mut copy = DisplayList::new();
        source.replay(&mut copy);

        assert_eq!(copy, source);
        assert_eq!(copy.texts().collect::<Vec<_>>(), vec!["Strike"]);
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let mut list = DisplayList::new();
        list.clear(4.0, 3.0);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains("\"op\":\"clear\""));
    }
}
