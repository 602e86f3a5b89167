//! Domain layer - Conversation model and the seams the widget is built on
//!
//! This layer contains:
//! - Entities: Message, typing indicator handles, server history
//! - Traits: Abstractions for infrastructure (Surface, ChatBackend)

pub mod entities;
pub mod traits;
