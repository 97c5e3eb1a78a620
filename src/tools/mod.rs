//! Tool state: what kind of command the next pointer press produces.

use egui::Color32;

use crate::error::{DrawError, DrawResult};

mod stamps;

pub use stamps::StampPalette;

/// The active drawing mode and its parameters.
///
/// Exactly one is active at a time. Commands copy what they need out of it
/// when they are created, so replacing it never touches committed commands.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    /// Freehand marker
    Stroke { width: f32, color: Color32 },
    /// Emoji or text sticker placed at every sampled point
    Stamp { glyph: String },
}

impl Default for ToolState {
    fn default() -> Self {
        Self::Stroke {
            width: 2.0,
            color: Color32::BLACK,
        }
    }
}

impl ToolState {
    /// A marker tool. The width must be a positive finite number.
    pub fn stroke(width: f32, color: Color32) -> DrawResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(DrawError::InvalidToolParameter(format!(
                "stroke width must be positive, got {width}"
            )));
        }
        Ok(Self::Stroke { width, color })
    }

    /// A stamp tool. Surrounding whitespace is dropped; nothing may remain empty.
    pub fn stamp(glyph: &str) -> DrawResult<Self> {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            return Err(DrawError::InvalidToolParameter(
                "stamp glyph must not be empty".to_owned(),
            ));
        }
        Ok(Self::Stamp {
            glyph: glyph.to_owned(),
        })
    }

    /// Human readable name of the tool, for the "active tool" label
    pub fn label(&self) -> String {
        match self {
            Self::Stroke { width, color } => {
                format!("Marker {width}px {}", color_to_hex(*color))
            }
            Self::Stamp { glyph } => format!("Stamp {glyph}"),
        }
    }
}

/// Parse a paint descriptor: a CSS color name or a `#rgb`, `#rrggbb` or
/// `#rrggbbaa` hex code.
pub fn parse_color(descriptor: &str) -> DrawResult<Color32> {
    let descriptor = descriptor.trim();
    if let Some(hex) = descriptor.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| {
            DrawError::InvalidToolParameter(format!("invalid hex color '{descriptor}'"))
        });
    }

    let color = match descriptor.to_ascii_lowercase().as_str() {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "lime" => Color32::from_rgb(0, 255, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "pink" => Color32::from_rgb(255, 192, 203),
        "brown" => Color32::from_rgb(165, 42, 42),
        "cyan" | "aqua" => Color32::from_rgb(0, 255, 255),
        "magenta" | "fuchsia" => Color32::from_rgb(255, 0, 255),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        _ => {
            return Err(DrawError::InvalidToolParameter(format!(
                "unknown color '{descriptor}'"
            )));
        }
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize, len: usize| {
        let digits = &hex[i * len..(i + 1) * len];
        let value = u8::from_str_radix(digits, 16).ok()?;
        Some(if len == 1 { value * 17 } else { value })
    };
    match hex.len() {
        3 => Some(Color32::from_rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
        6 => Some(Color32::from_rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
            channel(3, 2)?,
        )),
        _ => None,
    }
}

fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
