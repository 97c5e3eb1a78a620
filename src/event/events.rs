use crate::tools::ToolState;

/// Emitted after every mutation of the drawing session. The variant tells
/// subscribers what changed; all of them mean the canvas needs a redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingEvent {
    /// A pointer press created a new command
    StrokeStarted,
    /// A point was appended to the command being drawn
    PointAdded,
    /// The pointer was released and the command committed
    StrokeFinished,
    ToolChanged {
        tool: ToolState,
    },
    /// The cursor preview moved, appeared or disappeared
    PreviewMoved,
    Undone,
    Redone,
    Cleared,
    StampRegistered {
        glyph: String,
    },
}
