use parking_lot::Mutex;

use crate::event::{DrawingEvent, EventHandler};

/// Broadcasts drawing events to registered handlers, synchronously and in
/// subscription order.
pub struct EventBus {
    handlers: Mutex<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.handlers.try_lock().map(|h| h.len());
        f.debug_struct("EventBus")
            .field("handlers", &count)
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.lock().push(handler);
    }

    /// Emit an event to all registered handlers.
    ///
    /// An event emitted while handlers are already running is dropped.
    pub fn emit(&self, event: DrawingEvent) {
        match self.handlers.try_lock() {
            Some(mut handlers) => {
                for handler in handlers.iter_mut() {
                    handler.handle_event(&event);
                }
            }
            None => log::warn!("Dropping re-entrant event {event:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Recorder(Arc<Mutex<Vec<DrawingEvent>>>);

    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &DrawingEvent) {
            self.0.lock().push(event.clone());
        }
    }

    #[test]
    fn test_emit_reaches_every_handler_in_order() {
        let bus = EventBus::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(Box::new(Recorder(first.clone())));
        bus.subscribe(Box::new(Recorder(second.clone())));

        bus.emit(DrawingEvent::StrokeStarted);
        bus.emit(DrawingEvent::Cleared);

        let expected = vec![DrawingEvent::StrokeStarted, DrawingEvent::Cleared];
        assert_eq!(*first.lock(), expected);
        assert_eq!(*second.lock(), expected);
    }

    #[test]
    fn test_reentrant_emit_is_dropped() {
        struct Echo(Arc<EventBus>, Arc<Mutex<usize>>);

        impl EventHandler for Echo {
            fn handle_event(&mut self, event: &DrawingEvent) {
                *self.1.lock() += 1;
                self.0.emit(event.clone());
            }
        }

        let bus = Arc::new(EventBus::new());
        let calls = Arc::new(Mutex::new(0));
        bus.subscribe(Box::new(Echo(bus.clone(), calls.clone())));

        bus.emit(DrawingEvent::Undone);
        assert_eq!(*calls.lock(), 1);
    }
}
