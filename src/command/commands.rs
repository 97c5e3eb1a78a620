use egui::{Color32, Pos2};
use uuid::Uuid;

use crate::surface::Surface;
use crate::tools::ToolState;

/// A sampled pointer position in canvas pixels.
pub type Point = Pos2;

/// Font size stamps are drawn with, in canvas pixels.
pub const STAMP_FONT_SIZE: f32 = 32.0;

/// Stable identity of a command, kept across undo and redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(Uuid);

impl CommandId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Rendering parameters a command copied from the tool that created it.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    Stroke { width: f32, color: Color32 },
    Stamp { glyph: String },
}

/// One drawing operation: frozen parameters plus a growing list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    id: CommandId,
    kind: CommandKind,
    points: Vec<Point>,
}

impl Command {
    /// Start an empty command of the kind `tool` selects.
    pub fn new(tool: &ToolState) -> Self {
        let kind = match tool {
            ToolState::Stroke { width, color } => CommandKind::Stroke {
                width: *width,
                color: *color,
            },
            ToolState::Stamp { glyph } => CommandKind::Stamp {
                glyph: glyph.clone(),
            },
        };
        Self {
            id: CommandId::new(),
            kind,
            points: Vec::new(),
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// Points in the order they were sampled
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn extend(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Draw the command. Reads nothing but the command itself.
    ///
    /// A stroke needs at least two points; a single click leaves no mark.
    /// A stamp is drawn once per recorded point, so dragging a stamp leaves
    /// a trail of copies.
    pub fn render(&self, surface: &mut dyn Surface) {
        match &self.kind {
            CommandKind::Stroke { width, color } => {
                if self.points.len() >= 2 {
                    surface.stroke_path(&self.points, *width, *color);
                }
            }
            CommandKind::Stamp { glyph } => {
                for point in &self.points {
                    surface.fill_text(glyph, *point, STAMP_FONT_SIZE);
                }
            }
        }
    }
}
