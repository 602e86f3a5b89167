//! Console input handling

pub mod parser;

pub use parser::{Input, InputParser};
