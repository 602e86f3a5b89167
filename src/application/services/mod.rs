//! Application services

pub mod widget;
pub mod command_service;


pub use widget::{ChatWidget, SubmitOutcome, TypingGuard, WidgetState};
pub use command_service::{CommandReply, CommandService};
