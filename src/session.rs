use egui::{Color32, Vec2};

use crate::command::History;
use crate::config::Config;
use crate::error::{DrawError, DrawResult};
use crate::event::{DrawingEvent, EventBus, EventHandler};
use crate::export::{self, ExportedImage};
use crate::input::{InputEvent, RouterState, route_event};
use crate::preview::CursorPreview;
use crate::tools::{StampPalette, ToolState};

/// Everything one drawing board owns: the active tool, the history, the
/// cursor preview and the pointer state machine.
///
/// All mutation goes through this type. Each mutation bumps [`version`] and
/// emits a [`DrawingEvent`] to subscribers.
///
/// [`version`]: DrawingSession::version
#[derive(Debug)]
pub struct DrawingSession {
    pub(crate) tool: ToolState,
    pub(crate) history: History,
    pub(crate) preview: Option<CursorPreview>,
    pub(crate) router: RouterState,
    pub(crate) nib_scale: f32,
    stamps: StampPalette,
    events: EventBus,
    canvas_size: Vec2,
    version: u64,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl DrawingSession {
    pub fn new(config: &Config) -> Self {
        Self {
            tool: config.initial_tool(),
            history: History::new(),
            preview: None,
            router: RouterState::Idle,
            nib_scale: config.nib_scale,
            stamps: StampPalette::new(&config.stamps),
            events: EventBus::new(),
            canvas_size: config.canvas_size(),
            version: 0,
        }
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn preview(&self) -> Option<&CursorPreview> {
        self.preview.as_ref()
    }

    pub fn router_state(&self) -> RouterState {
        self.router
    }

    pub fn stamps(&self) -> &StampPalette {
        &self.stamps
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Incremented on every change; compare to detect a stale canvas.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub(crate) fn notify(&mut self, event: DrawingEvent) {
        self.version += 1;
        self.events.emit(event);
    }

    /// Feed one pointer event through the input state machine.
    pub fn handle_input(&mut self, event: &InputEvent) {
        route_event(event, self);
    }

    /// Switch to a marker. Rejected widths leave the current tool in place.
    pub fn select_stroke(&mut self, width: f32, color: Color32) -> DrawResult<()> {
        let tool = ToolState::stroke(width, color).inspect_err(|err| log::warn!("{err}"))?;
        self.select_tool(tool);
        Ok(())
    }

    /// Switch to a stamp.
    pub fn select_stamp(&mut self, glyph: &str) -> DrawResult<()> {
        let tool = ToolState::stamp(glyph).inspect_err(|err| log::warn!("{err}"))?;
        self.select_tool(tool);
        Ok(())
    }

    /// Replace the active tool. Committed commands keep their own copies
    /// of the old parameters; only the preview follows the new tool.
    pub fn select_tool(&mut self, tool: ToolState) {
        log::info!("Selected tool: {}", tool.label());
        self.tool = tool;
        if let Some(position) = self.preview.as_ref().map(CursorPreview::position) {
            self.preview = Some(CursorPreview::new(&self.tool, position, self.nib_scale));
        }
        self.notify(DrawingEvent::ToolChanged {
            tool: self.tool.clone(),
        });
    }

    /// Validate user text and add it to the stamp palette.
    pub fn register_stamp(&mut self, input: &str) -> DrawResult<String> {
        let glyph = self
            .stamps
            .register(input)
            .inspect_err(|err| log::warn!("Rejected custom stamp {input:?}: {err}"))?;
        log::info!("Registered stamp {glyph}");
        self.notify(DrawingEvent::StampRegistered {
            glyph: glyph.clone(),
        });
        Ok(glyph)
    }

    /// Undo the newest command. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.router = RouterState::Idle;
        let changed = self.history.undo();
        if changed {
            self.notify(DrawingEvent::Undone);
        }
        changed
    }

    /// Redo the most recently undone command. Returns `false` if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.router = RouterState::Idle;
        let finished = self.history.is_drawing();
        let changed = self.history.redo();
        if changed {
            self.notify(DrawingEvent::Redone);
        } else if finished {
            self.notify(DrawingEvent::StrokeFinished);
        }
        changed
    }

    /// Empty both stacks. This cannot be undone.
    pub fn clear(&mut self) {
        self.router = RouterState::Idle;
        self.history.clear();
        log::info!("Cleared drawing");
        self.notify(DrawingEvent::Cleared);
    }

    /// Render the committed drawing `scale` times larger and encode it.
    pub fn export(&self, scale: f32) -> DrawResult<ExportedImage> {
        export::export(&self.history, self.canvas_size, scale).inspect_err(|err| {
            if let DrawError::ExportSurfaceUnavailable { .. } = err {
                log::warn!("Export aborted: {err}");
            } else {
                log::error!("Export failed: {err}");
            }
        })
    }
}
