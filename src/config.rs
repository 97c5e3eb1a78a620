use std::{fs, path::Path};

use egui::{Vec2, vec2};
use serde::{Deserialize, Serialize};

use crate::error::{DrawError, DrawResult};
use crate::export::DEFAULT_EXPORT_SCALE;
use crate::preview::DEFAULT_NIB_SCALE;
use crate::tools::{ToolState, parse_color};

/// Environment variable naming a JSON config file to load at startup.
pub const CONFIG_ENV: &str = "DRAWING_BOARD_CONFIG";

/// A marker offered as a one-click tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePreset {
    pub name: String,
    pub width: f32,
    /// Paint descriptor, e.g. `"black"` or `"#ff8800"`
    pub color: String,
}

impl StrokePreset {
    pub fn new(name: &str, width: f32, color: &str) -> Self {
        Self {
            name: name.to_owned(),
            width,
            color: color.to_owned(),
        }
    }

    pub fn tool_state(&self) -> DrawResult<ToolState> {
        ToolState::stroke(self.width, parse_color(&self.color)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct Config {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Magnification applied when exporting the drawing
    pub export_scale: f32,
    /// Where exported images are written on native targets
    pub export_file: String,
    /// Marker presets; the first one is the initial tool
    pub markers: Vec<StrokePreset>,
    /// Stamps available before the user adds their own
    pub stamps: Vec<String>,
    /// Nib preview font size per pixel of stroke width
    pub nib_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 256.0,
            canvas_height: 256.0,
            export_scale: DEFAULT_EXPORT_SCALE,
            export_file: "drawing.png".to_owned(),
            markers: vec![
                StrokePreset::new("Thin", 2.0, "black"),
                StrokePreset::new("Thick", 6.0, "black"),
            ],
            stamps: vec!["😀".to_owned(), "🌮".to_owned(), "🎨".to_owned()],
            nib_scale: DEFAULT_NIB_SCALE,
        }
    }
}

impl Config {
    pub fn load<A: AsRef<Path>>(path: A) -> DrawResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Load the file named by [`CONFIG_ENV`], or the defaults if it is unset.
    pub fn from_env() -> DrawResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("Loading config from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> DrawResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the drawing session relies on.
    pub fn validate(&self) -> DrawResult<()> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.canvas_width) || !positive(self.canvas_height) {
            return Err(DrawError::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !positive(self.export_scale) {
            return Err(DrawError::InvalidConfig(format!(
                "export scale must be positive, got {}",
                self.export_scale
            )));
        }
        if !positive(self.nib_scale) {
            return Err(DrawError::InvalidConfig(format!(
                "nib scale must be positive, got {}",
                self.nib_scale
            )));
        }
        for preset in &self.markers {
            preset.tool_state().map_err(|err| {
                DrawError::InvalidConfig(format!("marker '{}': {err}", preset.name))
            })?;
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Vec2 {
        vec2(self.canvas_width, self.canvas_height)
    }

    /// The tool active when a session starts
    pub fn initial_tool(&self) -> ToolState {
        self.markers
            .first()
            .and_then(|preset| preset.tool_state().ok())
            .unwrap_or_default()
    }
}
