//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Backend: HTTP client for the chat server
//! - Adapters: Surfaces the conversation is rendered on (console, transcript)

pub mod config;
pub mod backend;
pub mod adapters;
