//! The 2D drawing target.
//!
//! Everything the drawing model renders goes through the [`Surface`] trait,
//! which only exposes a handful of primitives. The live canvas, the export
//! raster and the test recorder all implement it.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

mod painter;
mod raster;

pub use painter::PainterSurface;
pub use raster::{MAX_RASTER_SIDE, RasterSurface};

/// Color a cleared region is filled with.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Color glyphs are drawn with. Emoji fonts ignore most of it.
pub const TEXT_COLOR: Color32 = Color32::BLACK;

/// Primitive draw calls every surface understands.
///
/// Coordinates are surface-local. `set_scale` installs a uniform scale
/// transform that applies to positions, widths and font sizes of every
/// later call.
pub trait Surface {
    /// Logical size of the surface, i.e. its pixel size divided by the scale.
    fn size(&self) -> Vec2;

    fn set_scale(&mut self, factor: f32);

    fn clear(&mut self, region: Rect);

    /// Draw a connected polyline through `points`.
    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Draw `glyph` centered at `center`.
    fn fill_text(&mut self, glyph: &str, center: Pos2, font_size: f32);
}

/// One recorded primitive, already transformed into surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        region: Rect,
    },
    Path {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
    Text {
        glyph: String,
        center: Pos2,
        font_size: f32,
    },
}

impl DrawOp {
    /// Paint this primitive with an egui painter, translated by `offset`.
    pub fn paint(&self, painter: &Painter, offset: Vec2) {
        match self {
            DrawOp::Clear { region } => {
                painter.rect_filled(region.translate(offset), 0.0, BACKGROUND);
            }
            DrawOp::Path {
                points,
                width,
                color,
            } => {
                let points = points.iter().map(|p| *p + offset).collect();
                painter.line(points, Stroke::new(*width, *color));
            }
            DrawOp::Text {
                glyph,
                center,
                font_size,
            } => {
                painter.text(
                    *center + offset,
                    Align2::CENTER_CENTER,
                    glyph,
                    FontId::proportional(*font_size),
                    TEXT_COLOR,
                );
            }
        }
    }
}

/// A surface that records primitives instead of drawing them.
#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    scale: f32,
    ops: Vec<DrawOp>,
}

impl DrawList {
    /// Create an empty recorder with the given pixel size
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            scale: 1.0,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Size in pixels, independent of the scale transform
    pub fn pixel_size(&self) -> Vec2 {
        self.size
    }

    /// Draw the recorded primitives again onto `surface`.
    pub fn replay(&self, surface: &mut dyn Surface) {
        for op in &self.ops {
            match op {
                DrawOp::Clear { region } => surface.clear(*region),
                DrawOp::Path {
                    points,
                    width,
                    color,
                } => surface.stroke_path(points, *width, *color),
                DrawOp::Text {
                    glyph,
                    center,
                    font_size,
                } => surface.fill_text(glyph, *center, *font_size),
            }
        }
    }

    fn transform(&self, p: Pos2) -> Pos2 {
        (p.to_vec2() * self.scale).to_pos2()
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size / self.scale
    }

    fn set_scale(&mut self, factor: f32) {
        self.scale = factor;
    }

    fn clear(&mut self, region: Rect) {
        let region = Rect::from_min_max(self.transform(region.min), self.transform(region.max));
        self.ops.push(DrawOp::Clear { region });
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let points = points.iter().map(|p| self.transform(*p)).collect();
        self.ops.push(DrawOp::Path {
            points,
            width: width * self.scale,
            color,
        });
    }

    fn fill_text(&mut self, glyph: &str, center: Pos2, font_size: f32) {
        self.ops.push(DrawOp::Text {
            glyph: glyph.to_owned(),
            center: self.transform(center),
            font_size: font_size * self.scale,
        });
    }
}
