use egui::vec2;

use crate::command::{Point, STAMP_FONT_SIZE};
use crate::surface::Surface;
use crate::tools::ToolState;

/// Glyph shown under the pointer while a marker is active.
pub const NIB_GLYPH: &str = "*";

/// Default ratio between the nib glyph's font size and the marker width.
pub const DEFAULT_NIB_SCALE: f32 = 4.0;

/// Transient pointer feedback: what the active tool would draw here.
///
/// Never stored in the history and never exported.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPreview {
    /// Raw pointer position the preview was built for
    position: Point,
    glyph: String,
    center: Point,
    font_size: f32,
}

impl CursorPreview {
    /// Build the preview of `tool` for a pointer at `position`.
    ///
    /// Markers show a nib glyph sized after the stroke width; stamps show the
    /// stamp itself centered on the pointer.
    pub fn new(tool: &ToolState, position: Point, nib_scale: f32) -> Self {
        match tool {
            ToolState::Stroke { width, .. } => {
                let font_size = width * nib_scale;
                // The asterisk sits in the upper part of its em box; shift the
                // box down so the star lands where the stroke would start.
                Self {
                    position,
                    glyph: NIB_GLYPH.to_owned(),
                    center: position + vec2(0.0, font_size * 0.25),
                    font_size,
                }
            }
            ToolState::Stamp { glyph } => Self {
                position,
                glyph: glyph.clone(),
                center: position,
                font_size: STAMP_FONT_SIZE,
            },
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_text(&self.glyph, self.center, self.font_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    #[test]
    fn test_marker_preview_scales_with_width() {
        let marker = |width| ToolState::stroke(width, Color32::BLACK).unwrap();
        let thin = CursorPreview::new(&marker(2.0), pos2(10.0, 10.0), 4.0);
        let thick = CursorPreview::new(&marker(6.0), pos2(10.0, 10.0), 4.0);

        assert_eq!(thin.glyph(), NIB_GLYPH);
        assert_eq!(thin.font_size(), 8.0);
        assert_eq!(thick.font_size(), 24.0);
        assert_eq!(thick.center(), pos2(10.0, 16.0));
    }

    #[test]
    fn test_stamp_preview_is_centered() {
        let stamp = ToolState::stamp("🌮").unwrap();
        let preview = CursorPreview::new(&stamp, pos2(40.0, 50.0), 4.0);
        assert_eq!(preview.glyph(), "🌮");
        assert_eq!(preview.center(), pos2(40.0, 50.0));
        assert_eq!(preview.font_size(), STAMP_FONT_SIZE);
    }
}
