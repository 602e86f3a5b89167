//! In-memory surface that records everything rendered on it

use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{IndicatorId, Message};
use crate::domain::traits::Surface;

/// One node in the message list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Message(Message),
    Typing(IndicatorId),
}

/// Everything done to the surface, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Appended(Entry),
    Removed(IndicatorId),
    Scrolled,
    InputCleared,
    Focused,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<Entry>,
    events: Vec<SurfaceEvent>,
    input: String,
    focused: bool,
    /// List length at the last scroll
    scrolled_to: usize,
    next_indicator: u64,
    notices: Vec<String>,
}

/// Surface backed by an ordered list of entries
#[derive(Debug, Default)]
pub struct TranscriptSurface {
    state: Mutex<State>,
}

impl TranscriptSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.state().entries.clone()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.state().events.clone()
    }

    /// Rendered messages, indicators skipped
    pub fn messages(&self) -> Vec<Message> {
        self.state()
            .entries
            .iter()
            .filter_map(|e| match e {
                Entry::Message(m) => Some(m.clone()),
                Entry::Typing(_) => None,
            })
            .collect()
    }

    pub fn typing_count(&self) -> usize {
        self.state()
            .entries
            .iter()
            .filter(|e| matches!(e, Entry::Typing(_)))
            .count()
    }

    /// Simulate the user typing into the input field
    pub fn set_input(&self, text: impl Into<String>) {
        self.state().input = text.into();
    }

    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    pub fn is_focused(&self) -> bool {
        self.state().focused
    }

    /// True when the newest entry was visible after the last append
    pub fn is_scrolled_to_bottom(&self) -> bool {
        let state = self.state();
        state.scrolled_to >= state.entries.len()
    }

    pub fn notices(&self) -> Vec<String> {
        self.state().notices.clone()
    }
}

impl Surface for TranscriptSurface {
    fn append_message(&self, message: &Message) {
        let mut state = self.state();
        let entry = Entry::Message(message.clone());
        state.entries.push(entry.clone());
        state.events.push(SurfaceEvent::Appended(entry));
    }

    fn show_typing(&self) -> IndicatorId {
        let mut state = self.state();
        state.next_indicator += 1;
        let id = IndicatorId(state.next_indicator);
        state.entries.push(Entry::Typing(id));
        state.events.push(SurfaceEvent::Appended(Entry::Typing(id)));
        id
    }

    fn remove_typing(&self, id: IndicatorId) {
        let mut state = self.state();
        state.entries.retain(|e| *e != Entry::Typing(id));
        state.events.push(SurfaceEvent::Removed(id));
        // Removal never hides the newest entry
        state.scrolled_to = state.scrolled_to.min(state.entries.len());
    }

    fn scroll_to_bottom(&self) {
        let mut state = self.state();
        state.scrolled_to = state.entries.len();
        state.events.push(SurfaceEvent::Scrolled);
    }

    fn clear_input(&self) {
        let mut state = self.state();
        state.input.clear();
        state.events.push(SurfaceEvent::InputCleared);
    }

    fn focus_input(&self) {
        let mut state = self.state();
        state.focused = true;
        state.events.push(SurfaceEvent::Focused);
    }

    fn notice(&self, text: &str) {
        self.state().notices.push(text.to_string());
    }
}
