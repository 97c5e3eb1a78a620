//! Draw commands and the undo/redo history they live in.

mod commands;
mod history;

pub use commands::{Command, CommandId, CommandKind, Point, STAMP_FONT_SIZE};
pub use history::History;
