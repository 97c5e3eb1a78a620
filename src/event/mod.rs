//! The "state changed" notification channel.

mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::DrawingEvent;
pub use handlers::ActiveToolLabel;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &DrawingEvent);
}
