use egui::{Pos2, Rect, Vec2};

use crate::command::Command;
use crate::session::DrawingSession;
use crate::surface::{DrawList, Surface};

/// Replays the drawing onto a surface.
///
/// Every pass starts from a cleared surface and draws every committed
/// command in history order, then the command being drawn, then the cursor
/// preview on top. The pass is recorded into a frame that is rebuilt only
/// when the session version moves on; unchanged frames are drawn from it.
#[derive(Debug)]
pub struct Renderer {
    rendered_version: Option<u64>,
    frame: DrawList,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            rendered_version: None,
            frame: DrawList::new(Vec2::ZERO),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the session changed since the last pass
    pub fn is_stale(&self, session: &DrawingSession) -> bool {
        self.rendered_version != Some(session.version())
    }

    pub fn render(&mut self, session: &DrawingSession, surface: &mut dyn Surface) {
        if self.is_stale(session) || self.frame.pixel_size() != surface.size() {
            log::trace!("Rebuilding frame for version {}", session.version());
            self.frame = build_frame(session, surface.size());
            self.rendered_version = Some(session.version());
        }
        self.frame.replay(surface);
    }
}

fn build_frame(session: &DrawingSession, size: Vec2) -> DrawList {
    let mut frame = DrawList::new(size);
    frame.clear(Rect::from_min_size(Pos2::ZERO, size));
    replay(session.history().committed(), &mut frame);
    if let Some(current) = session.history().current() {
        current.render(&mut frame);
    }
    if let Some(preview) = session.preview() {
        preview.render(&mut frame);
    }
    frame
}

/// Render `commands` in order, each exactly once.
pub fn replay(commands: &[Command], surface: &mut dyn Surface) {
    for command in commands {
        command.render(surface);
    }
}
