//! Domain entities - Conversation objects rendered by the widget

pub mod message;
pub mod history;
pub mod catalog;

pub use message::{Author, IndicatorId, Message};
pub use history::HistoryEntry;
pub use catalog::{Product, ProductFilters};
