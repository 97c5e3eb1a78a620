use egui::{Context, PointerButton, Pos2, Rect};

mod router;
pub use router::{RouterState, route_event};

/// Pointer buttons held during an event, as a bit mask. Bit 0 is the
/// primary button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons(pub u8);

impl Buttons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(1 << 1);
    pub const MIDDLE: Self = Self(1 << 2);

    pub fn is_primary_held(self) -> bool {
        self.0 & Self::PRIMARY.0 != 0
    }

    fn from_button(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::PRIMARY,
            PointerButton::Secondary => Self::SECONDARY,
            PointerButton::Middle => Self::MIDDLE,
            _ => Self::NONE,
        }
    }
}

impl std::ops::BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Pointer events in canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed
    PointerDown { position: Pos2, buttons: Buttons },
    /// The pointer moved, with or without buttons held
    PointerMove { position: Pos2, buttons: Buttons },
    /// A button was released
    PointerUp { position: Pos2, buttons: Buttons },
    /// The pointer entered the canvas
    PointerEnter { position: Pos2, buttons: Buttons },
    /// The pointer left the canvas
    PointerLeave { position: Pos2, buttons: Buttons },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. }
            | Self::PointerEnter { position, .. }
            | Self::PointerLeave { position, .. } => *position,
        }
    }

    pub fn buttons(&self) -> Buttons {
        match self {
            Self::PointerDown { buttons, .. }
            | Self::PointerMove { buttons, .. }
            | Self::PointerUp { buttons, .. }
            | Self::PointerEnter { buttons, .. }
            | Self::PointerLeave { buttons, .. } => *buttons,
        }
    }
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Turns raw egui pointer state into canvas [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last canvas-local position while the pointer was over the canvas
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's input for a canvas occupying `canvas_rect`.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = |pos: Pos2| (pos - canvas_rect.min).to_pos2();

        ctx.input(|input| {
            let buttons = BUTTONS
                .iter()
                .filter(|b| input.pointer.button_down(**b))
                .fold(Buttons::NONE, |mask, b| mask | Buttons::from_button(*b));
            let hover = input
                .pointer
                .hover_pos()
                .filter(|pos| canvas_rect.contains(*pos))
                .map(local);

            if let Some(position) = hover {
                if self.last_pointer_pos.is_none() {
                    events.push(InputEvent::PointerEnter { position, buttons });
                }
                if Some(position) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { position, buttons });
                }
                self.last_pointer_pos = Some(position);
            } else if let Some(position) = self.last_pointer_pos.take() {
                events.push(InputEvent::PointerLeave { position, buttons });
            }

            for button in BUTTONS {
                if input.pointer.button_pressed(button) {
                    if let Some(position) = hover {
                        events.push(InputEvent::PointerDown {
                            position,
                            buttons: buttons | Buttons::from_button(button),
                        });
                    }
                }
                if input.pointer.button_released(button) {
                    let released_at = input.pointer.interact_pos().map(local);
                    if let Some(position) = released_at.or(self.last_pointer_pos) {
                        events.push(InputEvent::PointerUp { position, buttons });
                    }
                }
            }
        });

        events
    }
}
