use crate::domain::entities::{IndicatorId, Message};

/// Surface trait - abstraction over the rendering target
///
/// A surface owns three regions: a scrollable message list, a single-line
/// input and a send trigger. The widget drives it but never creates or
/// validates those regions. Methods take `&self` so a surface can be shared
/// between the controller and in-flight typing guards.
pub trait Surface: Send + Sync {
    /// Append a message to the end of the list
    fn append_message(&self, message: &Message);

    /// Append a typing indicator and return its handle
    fn show_typing(&self) -> IndicatorId;

    /// Remove a previously shown indicator. Unknown ids are ignored.
    fn remove_typing(&self, id: IndicatorId);

    /// Force the list's scroll position to its maximum
    fn scroll_to_bottom(&self);

    /// Empty the input field
    fn clear_input(&self);

    /// Give the input field focus
    fn focus_input(&self);

    /// Out-of-band status line, not part of the conversation
    fn notice(&self, text: &str);
}
