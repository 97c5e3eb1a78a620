use super::{Command, Point};

/// Linear undo/redo over whole commands.
///
/// The command being drawn is kept apart from `committed` until the pointer
/// is released. Undo and redo only move commands between the two stacks;
/// they never edit them.
#[derive(Debug, Default)]
pub struct History {
    /// Finished commands, oldest first
    committed: Vec<Command>,
    /// Undone commands, most recently undone last
    undone: Vec<Command>,
    /// The command the pointer is currently drawing
    current: Option<Command>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished command and drop the redo branch.
    pub fn push(&mut self, command: Command) {
        self.committed.push(command);
        self.undone.clear();
    }

    /// Start drawing `command`. Diverging from the undone commands discards
    /// them. A command still in progress is committed first.
    pub fn begin(&mut self, command: Command) {
        self.finish();
        self.undone.clear();
        self.current = Some(command);
    }

    /// Add a point to the command in progress. Returns `false` if there is none.
    pub fn extend(&mut self, point: Point) -> bool {
        match &mut self.current {
            Some(command) => {
                command.extend(point);
                true
            }
            None => false,
        }
    }

    /// Commit the command in progress. Returns `false` if there is none.
    pub fn finish(&mut self) -> bool {
        match self.current.take() {
            Some(command) => {
                self.push(command);
                true
            }
            None => false,
        }
    }

    /// Move the newest committed command onto the redo stack.
    ///
    /// Returns whether anything moved; an empty history is not an error.
    pub fn undo(&mut self) -> bool {
        self.finish();
        match self.committed.pop() {
            Some(command) => {
                self.undone.push(command);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone command back onto the committed stack.
    pub fn redo(&mut self) -> bool {
        self.finish();
        match self.undone.pop() {
            Some(command) => {
                self.committed.push(command);
                true
            }
            None => false,
        }
    }

    /// Forget everything, including a command in progress. Clearing is not
    /// itself undoable.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
        self.current = None;
    }

    pub fn committed(&self) -> &[Command] {
        &self.committed
    }

    pub fn undone(&self) -> &[Command] {
        &self.undone
    }

    pub fn current(&self) -> Option<&Command> {
        self.current.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty() || self.current.is_some()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
