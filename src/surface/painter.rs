use egui::{Color32, Painter, Pos2, Rect, Vec2};

use super::{DrawOp, Surface};

/// The live canvas: draws straight onto an egui painter.
///
/// `rect` is the screen rectangle the canvas occupies; every primitive is
/// translated by its top-left corner so callers work in canvas-local pixels.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    scale: f32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self {
            painter,
            rect,
            scale: 1.0,
        }
    }

    fn paint(&self, op: DrawOp) {
        op.paint(self.painter, self.rect.min.to_vec2());
    }

    fn transform(&self, p: Pos2) -> Pos2 {
        (p.to_vec2() * self.scale).to_pos2()
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size() / self.scale
    }

    fn set_scale(&mut self, factor: f32) {
        self.scale = factor;
    }

    fn clear(&mut self, region: Rect) {
        let region = Rect::from_min_max(self.transform(region.min), self.transform(region.max));
        self.paint(DrawOp::Clear { region });
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        self.paint(DrawOp::Path {
            points: points.iter().map(|p| self.transform(*p)).collect(),
            width: width * self.scale,
            color,
        });
    }

    fn fill_text(&mut self, glyph: &str, center: Pos2, font_size: f32) {
        self.paint(DrawOp::Text {
            glyph: glyph.to_owned(),
            center: self.transform(center),
            font_size: font_size * self.scale,
        });
    }
}
