use egui::Color32;

use crate::config::Config;
use crate::event::ActiveToolLabel;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::session::DrawingSession;

pub const APP_NAME: &str = "The Drawing board";

/// The eframe application: a tools panel next to a fixed-size canvas.
pub struct DrawingApp {
    pub(crate) config: Config,
    pub(crate) session: DrawingSession,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    pub(crate) tool_label: ActiveToolLabel,
    /// Custom marker controls
    pub(crate) marker_width: f32,
    pub(crate) marker_color: Color32,
    /// Text typed into the custom stamp field
    pub(crate) custom_stamp: String,
    /// Rejection message for the last custom stamp
    pub(crate) stamp_error: Option<String>,
    /// Result of the last export, shown until the next one
    pub(crate) notice: Option<String>,
}

impl DrawingApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        let session = DrawingSession::new(&config);
        let tool_label = ActiveToolLabel::new(session.tool());
        session.subscribe(Box::new(tool_label.clone()));

        Self {
            config,
            session,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            tool_label,
            marker_width: 4.0,
            marker_color: Color32::BLACK,
            custom_stamp: String::new(),
            stamp_error: None,
            notice: None,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub(crate) fn select_custom_marker(&mut self) {
        if let Err(err) = self.session.select_stroke(self.marker_width, self.marker_color) {
            self.notice = Some(err.to_string());
        }
    }

    pub(crate) fn select_stamp(&mut self, glyph: &str) {
        match self.session.select_stamp(glyph) {
            Ok(()) => self.stamp_error = None,
            Err(err) => self.stamp_error = Some(err.to_string()),
        }
    }

    pub(crate) fn register_custom_stamp(&mut self) {
        match self.session.register_stamp(&self.custom_stamp) {
            Ok(_) => {
                self.custom_stamp.clear();
                self.stamp_error = None;
            }
            Err(err) => self.stamp_error = Some(err.to_string()),
        }
    }

    pub(crate) fn export(&mut self) {
        let image = match self.session.export(self.config.export_scale) {
            Ok(image) => image,
            Err(err) => {
                self.notice = Some(format!("Export failed: {err}"));
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        let delivered = image.save(&self.config.export_file);
        #[cfg(target_arch = "wasm32")]
        let delivered = image.download(&self.config.export_file);

        self.notice = Some(match delivered {
            Ok(()) => format!(
                "Saved {}x{} image to {}",
                image.width, image.height, self.config.export_file
            ),
            Err(err) => {
                log::error!("Failed to write {}: {err}", self.config.export_file);
                format!("Export failed: {err}")
            }
        });
    }
}

impl eframe::App for DrawingApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolState;

    #[test]
    fn test_rejected_marker_width_is_reported() {
        let mut app = DrawingApp::with_config(Config::default());
        let before = app.session.tool().clone();
        app.marker_width = 0.0;

        app.select_custom_marker();

        assert_eq!(app.session.tool(), &before);
        assert!(app.notice.as_deref().is_some_and(|n| n.contains("Invalid tool parameter")));
    }

    #[test]
    fn test_stamp_selection_error_is_shown_then_cleared() {
        let mut app = DrawingApp::with_config(Config::default());

        app.select_stamp("   ");
        assert!(app.stamp_error.is_some());

        app.select_stamp("🌮");
        assert!(app.stamp_error.is_none());
        assert_eq!(app.session.tool(), &ToolState::stamp("🌮").unwrap());
    }

    #[test]
    fn test_export_delivers_file_and_reports_it() {
        let path = std::env::temp_dir().join(format!("drawing_board_{}.png", std::process::id()));
        let mut config = Config::default();
        config.export_file = path.to_string_lossy().into_owned();
        let mut app = DrawingApp::with_config(config);

        app.export();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
        assert_eq!(
            app.notice.as_deref(),
            Some(format!("Saved 1024x1024 image to {}", path.display()).as_str())
        );
    }
}
