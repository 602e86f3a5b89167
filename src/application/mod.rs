//! Application layer - Use cases and orchestration
//!
//! This layer contains:
//! - Services: the chat widget controller and console commands
//! - Errors: Widget, command and config errors
//! - Messaging: Console input parsing

pub mod errors;
pub mod services;
pub mod messaging;
