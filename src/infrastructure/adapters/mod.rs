//! Surface adapters - where the conversation is rendered

pub mod console;
pub mod transcript;

pub use console::ConsoleAdapter;
pub use transcript::{Entry, SurfaceEvent, TranscriptSurface};
