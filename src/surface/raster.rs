use std::io::Cursor;

use egui::epaint::textures::TexturesDelta;
use egui::epaint::{ClippedPrimitive, ImageData, Primitive, TextureId, Vertex};
use egui::{Color32, LayerId, Pos2, RawInput, Rect, Vec2, pos2, vec2};
use image::{DynamicImage, ImageFormat, RgbaImage};

use super::{BACKGROUND, DrawList, Surface};
use crate::error::{DrawError, DrawResult};

/// Largest side, in pixels, an offscreen surface may have.
pub const MAX_RASTER_SIDE: usize = 8192;

/// An offscreen surface with a fixed pixel size.
///
/// Primitives are recorded into a [`DrawList`]; `to_image` lays them out
/// with a headless egui context, rasterizes the resulting triangle meshes in
/// software and encodes the pixels.
pub struct RasterSurface {
    width: usize,
    height: usize,
    list: DrawList,
}

impl RasterSurface {
    /// Allocate a surface of `size` pixels.
    pub fn new(size: Vec2) -> DrawResult<Self> {
        let unavailable = DrawError::ExportSurfaceUnavailable {
            width: size.x,
            height: size.y,
        };
        if !size.x.is_finite() || !size.y.is_finite() || size.x < 1.0 || size.y < 1.0 {
            return Err(unavailable);
        }
        let (width, height) = (size.x.round() as usize, size.y.round() as usize);
        if width > MAX_RASTER_SIDE || height > MAX_RASTER_SIDE {
            return Err(unavailable);
        }

        Ok(Self {
            width,
            height,
            list: DrawList::new(vec2(width as f32, height as f32)),
        })
    }

    pub fn pixel_size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Primitives recorded so far, in pixel coordinates
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    /// Rasterize the recorded primitives.
    pub fn rasterize(&self) -> RgbaImage {
        let ctx = egui::Context::default();
        let screen_rect = Rect::from_min_size(Pos2::ZERO, self.list.pixel_size());
        let raw_input = RawInput {
            screen_rect: Some(screen_rect),
            ..Default::default()
        };
        let output = ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(LayerId::background());
            for op in self.list.ops() {
                op.paint(&painter, Vec2::ZERO);
            }
        });
        let atlas = Atlas::from_delta(&output.textures_delta);
        let primitives = ctx.tessellate(output.shapes, output.pixels_per_point);

        let mut pixels = vec![BACKGROUND; self.width * self.height];
        for ClippedPrimitive {
            clip_rect,
            primitive,
        } in &primitives
        {
            let Primitive::Mesh(mesh) = primitive else {
                continue;
            };
            let clip = clip_rect.intersect(screen_rect);
            for tri in mesh.indices.chunks_exact(3) {
                let vertex = |i: u32| &mesh.vertices[i as usize];
                self.fill_triangle(
                    &mut pixels,
                    clip,
                    &atlas,
                    [vertex(tri[0]), vertex(tri[1]), vertex(tri[2])],
                );
            }
        }

        RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let color = pixels[y as usize * self.width + x as usize];
            image::Rgba(color.to_srgba_unmultiplied())
        })
    }

    /// Rasterize and encode as the image type named by `mime_type`.
    ///
    /// Unknown mime types fall back to PNG.
    pub fn to_image(&self, mime_type: &str) -> DrawResult<Vec<u8>> {
        let format = ImageFormat::from_mime_type(mime_type).unwrap_or(ImageFormat::Png);
        let mut image = DynamicImage::ImageRgba8(self.rasterize());
        if format == ImageFormat::Jpeg {
            image = DynamicImage::ImageRgb8(image.to_rgb8());
        }

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format)?;
        Ok(bytes)
    }

    fn fill_triangle(
        &self,
        pixels: &mut [Color32],
        clip: Rect,
        atlas: &Atlas,
        [a, b, c]: [&Vertex; 3],
    ) {
        let area = edge(a.pos, b.pos, c.pos);
        if area.abs() < f32::EPSILON {
            return;
        }
        let bounds = Rect::from_points(&[a.pos, b.pos, c.pos]).intersect(clip);
        if !bounds.is_positive() {
            return;
        }

        let x0 = bounds.min.x.floor().max(0.0) as usize;
        let y0 = bounds.min.y.floor().max(0.0) as usize;
        let x1 = (bounds.max.x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (bounds.max.y.ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let p = pos2(x as f32 + 0.5, y as f32 + 0.5);
                let wa = edge(b.pos, c.pos, p) / area;
                let wb = edge(c.pos, a.pos, p) / area;
                let wc = 1.0 - wa - wb;
                if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                    continue;
                }

                let uv = pos2(
                    a.uv.x * wa + b.uv.x * wb + c.uv.x * wc,
                    a.uv.y * wa + b.uv.y * wb + c.uv.y * wc,
                );
                let mix = |ca: u8, cb: u8, cc: u8| {
                    (ca as f32 * wa + cb as f32 * wb + cc as f32 * wc).round() as u8
                };
                let color = Color32::from_rgba_premultiplied(
                    mix(a.color.r(), b.color.r(), c.color.r()),
                    mix(a.color.g(), b.color.g(), c.color.g()),
                    mix(a.color.b(), b.color.b(), c.color.b()),
                    mix(a.color.a(), b.color.a(), c.color.a()),
                );

                let src = modulate(color, atlas.sample(uv));
                let dst = &mut pixels[y * self.width + x];
                *dst = blend(src, *dst);
            }
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        self.list.size()
    }

    fn set_scale(&mut self, factor: f32) {
        self.list.set_scale(factor);
    }

    fn clear(&mut self, region: Rect) {
        self.list.clear(region);
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        self.list.stroke_path(points, width, color);
    }

    fn fill_text(&mut self, glyph: &str, center: Pos2, font_size: f32) {
        self.list.fill_text(glyph, center, font_size);
    }
}

/// The font texture egui samples every mesh from. Untextured shapes use its
/// white texel.
struct Atlas {
    size: [usize; 2],
    pixels: Vec<Color32>,
}

impl Atlas {
    fn from_delta(textures: &TexturesDelta) -> Self {
        let mut atlas = Self {
            size: [1, 1],
            pixels: vec![Color32::WHITE],
        };

        for (id, delta) in &textures.set {
            if *id != TextureId::default() {
                continue;
            }
            let (size, pixels) = match &delta.image {
                ImageData::Color(image) => (image.size, image.pixels.clone()),
                ImageData::Font(font) => (
                    font.size,
                    font.pixels
                        .iter()
                        .map(|coverage| {
                            let a = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                            Color32::from_rgba_premultiplied(a, a, a, a)
                        })
                        .collect(),
                ),
            };

            match delta.pos {
                None => atlas = Self { size, pixels },
                Some([left, top]) => {
                    for row in 0..size[1] {
                        for col in 0..size[0] {
                            let (x, y) = (left + col, top + row);
                            if x < atlas.size[0] && y < atlas.size[1] {
                                atlas.pixels[y * atlas.size[0] + x] = pixels[row * size[0] + col];
                            }
                        }
                    }
                }
            }
        }

        atlas
    }

    fn sample(&self, uv: Pos2) -> Color32 {
        let [w, h] = self.size;
        let x = ((uv.x * w as f32) as usize).min(w - 1);
        let y = ((uv.y * h as f32) as usize).min(h - 1);
        self.pixels[y * w + x]
    }
}

fn edge(a: Pos2, b: Pos2, p: Pos2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn modulate(a: Color32, b: Color32) -> Color32 {
    let mul = |x: u8, y: u8| ((x as u16 * y as u16 + 127) / 255) as u8;
    Color32::from_rgba_premultiplied(
        mul(a.r(), b.r()),
        mul(a.g(), b.g()),
        mul(a.b(), b.b()),
        mul(a.a(), b.a()),
    )
}

/// Premultiplied "source over" compositing.
fn blend(src: Color32, dst: Color32) -> Color32 {
    let keep = 255 - src.a() as u16;
    let over = |s: u8, d: u8| (s as u16 + (d as u16 * keep + 127) / 255).min(255) as u8;
    Color32::from_rgba_premultiplied(
        over(src.r(), dst.r()),
        over(src.g(), dst.g()),
        over(src.b(), dst.b()),
        over(src.a(), dst.a()),
    )
}
