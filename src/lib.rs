#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod input;
pub mod panels;
pub mod preview;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod tools;

pub use app::DrawingApp;
pub use command::{Command, CommandKind, History, Point};
pub use config::Config;
pub use error::{DrawError, DrawResult};
pub use event::{DrawingEvent, EventBus, EventHandler};
pub use export::ExportedImage;
pub use input::{Buttons, InputEvent, InputHandler};
pub use preview::CursorPreview;
pub use renderer::Renderer;
pub use session::DrawingSession;
pub use surface::{DrawList, DrawOp, Surface};
pub use tools::{StampPalette, ToolState};
