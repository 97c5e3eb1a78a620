use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{DrawingEvent, EventHandler};
use crate::tools::ToolState;

/// Keeps a text description of the active tool up to date.
///
/// Clones share the same label, so the UI keeps one and subscribes another.
#[derive(Debug, Clone)]
pub struct ActiveToolLabel {
    text: Arc<Mutex<String>>,
}

impl ActiveToolLabel {
    pub fn new(tool: &ToolState) -> Self {
        Self {
            text: Arc::new(Mutex::new(tool.label())),
        }
    }

    pub fn text(&self) -> String {
        self.text.lock().clone()
    }
}

impl EventHandler for ActiveToolLabel {
    fn handle_event(&mut self, event: &DrawingEvent) {
        if let DrawingEvent::ToolChanged { tool } = event {
            *self.text.lock() = tool.label();
        }
    }
}
