//! Domain traits - Abstractions for infrastructure implementations

pub mod surface;
pub mod backend;

pub use surface::Surface;
pub use backend::{ChatBackend, ChatRequest};
