//! A minimal chat widget: renders a welcome message, relays each user
//! message to a chat server over HTTP and renders the reply, with a typing
//! indicator while the request is in flight.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::errors::{CommandError, ConfigError, WidgetError};
pub use application::services::{ChatWidget, SubmitOutcome, WidgetState};
pub use domain::entities::{Author, Message};
pub use domain::traits::{ChatBackend, ChatRequest, Surface};
pub use infrastructure::config::Config;
