use crate::command::Command;
use crate::event::DrawingEvent;
use crate::preview::CursorPreview;
use crate::session::DrawingSession;

use super::InputEvent;

/// Where the pointer state machine currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouterState {
    #[default]
    Idle,
    /// The primary button is held and a command is being drawn
    Dragging,
}

/// Apply one pointer event to the session.
///
/// Pressing the primary button starts a command from the active tool;
/// moving with it held extends that command; releasing it commits the
/// command. Releasing another button while the primary one is still held
/// does not end the drag. Without a press, pointer motion only moves the cursor preview.
/// Leaving the canvas mid-drag, or moving without the primary button, ends
/// the drag as if the button had been released.
pub fn route_event(event: &InputEvent, session: &mut DrawingSession) {
    match (session.router, *event) {
        (RouterState::Idle, InputEvent::PointerDown { position, buttons }) => {
            if !buttons.is_primary_held() {
                return;
            }
            let mut command = Command::new(&session.tool);
            command.extend(position);
            log::debug!("Starting {:?} at {position:?}", command.kind());
            session.history.begin(command);
            session.preview = None;
            session.router = RouterState::Dragging;
            session.notify(DrawingEvent::StrokeStarted);
        }
        (RouterState::Dragging, InputEvent::PointerMove { position, buttons })
            if buttons.is_primary_held() =>
        {
            if session.history.extend(position) {
                session.notify(DrawingEvent::PointAdded);
            }
        }
        (RouterState::Dragging, InputEvent::PointerMove { position, .. }) => {
            end_drag(session);
            update_preview(session, Some(position));
        }
        (RouterState::Dragging, InputEvent::PointerUp { buttons, .. })
            if !buttons.is_primary_held() =>
        {
            end_drag(session);
        }
        (RouterState::Dragging, InputEvent::PointerLeave { .. }) => {
            end_drag(session);
            update_preview(session, None);
        }
        (
            RouterState::Idle,
            InputEvent::PointerMove { position, .. } | InputEvent::PointerEnter { position, .. },
        ) => {
            update_preview(session, Some(position));
        }
        (RouterState::Idle, InputEvent::PointerLeave { .. }) => {
            update_preview(session, None);
        }
        (RouterState::Idle, InputEvent::PointerUp { .. })
        | (
            RouterState::Dragging,
            InputEvent::PointerUp { .. }
            | InputEvent::PointerDown { .. }
            | InputEvent::PointerEnter { .. },
        ) => {}
    }
}

fn end_drag(session: &mut DrawingSession) {
    session.router = RouterState::Idle;
    if session.history.finish() {
        log::debug!("Committed command #{}", session.history.committed().len());
        session.notify(DrawingEvent::StrokeFinished);
    }
}

fn update_preview(session: &mut DrawingSession, position: Option<egui::Pos2>) {
    session.preview =
        position.map(|position| CursorPreview::new(&session.tool, position, session.nib_scale));
    session.notify(DrawingEvent::PreviewMoved);
}
