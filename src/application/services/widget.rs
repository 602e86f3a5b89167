//! Chat widget controller - renders the conversation and relays submissions

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::entities::{IndicatorId, Message};
use crate::domain::traits::{ChatBackend, ChatRequest, Surface};
use crate::infrastructure::config::{BusyPolicy, WidgetConfig};

/// Controller state, per submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Sending,
}

/// What a call to [`ChatWidget::submit`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; nothing happened
    Ignored,
    /// Another submission was in flight and the busy policy dropped this one
    Busy,
    /// The server's reply was rendered
    Replied,
    /// The apology was rendered
    Failed,
}

/// Typing indicator tied to a scope; removed from the surface on drop
pub struct TypingGuard<'a, S: Surface + ?Sized> {
    surface: &'a S,
    id: Option<IndicatorId>,
}

impl<'a, S: Surface + ?Sized> TypingGuard<'a, S> {
    pub fn show(surface: &'a S) -> Self {
        let id = surface.show_typing();
        surface.scroll_to_bottom();
        Self { surface, id: Some(id) }
    }

    /// Remove the indicator now rather than at end of scope
    pub fn dismiss(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if let Some(id) = self.id.take() {
            self.surface.remove_typing(id);
        }
    }
}

impl<S: Surface + ?Sized> Drop for TypingGuard<'_, S> {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Marks one submission as in flight until dropped
struct SendingSlot<'a> {
    in_flight: &'a AtomicUsize,
}

impl Drop for SendingSlot<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

/// The chat widget: one surface, one backend
pub struct ChatWidget<S: Surface, B: ChatBackend> {
    surface: Arc<S>,
    backend: B,
    config: WidgetConfig,
    in_flight: AtomicUsize,
}

impl<S: Surface, B: ChatBackend> ChatWidget<S, B> {
    pub fn new(surface: Arc<S>, backend: B, config: WidgetConfig) -> Self {
        Self {
            surface,
            backend,
            config,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> WidgetState {
        if self.in_flight.load(Ordering::Acquire) == 0 {
            WidgetState::Idle
        } else {
            WidgetState::Sending
        }
    }

    /// Render the welcome message and focus the input
    pub fn initialize(&self) {
        self.append(Message::assistant(self.config.welcome_message.clone()));
        self.surface.focus_input();
        tracing::debug!("Chat widget initialized");
    }

    /// Handle a send click or an Enter keypress
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        self.submit_with_context(text, None).await
    }

    pub async fn submit_with_context(
        &self,
        text: &str,
        context: Option<serde_json::Value>,
    ) -> SubmitOutcome {
        let content = text.trim();
        if content.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let Some(_slot) = self.acquire_slot() else {
            tracing::debug!("Submission dropped, previous one still sending");
            return SubmitOutcome::Busy;
        };

        self.append(Message::user(content));
        self.surface.clear_input();

        let typing = TypingGuard::show(self.surface.as_ref());

        let mut request = ChatRequest::new(content);
        if let Some(context) = context {
            request = request.with_context(context);
        }
        let result = self.backend.send(request).await;

        typing.dismiss();

        match result {
            Ok(reply) => {
                self.append(Message::assistant(reply));
                SubmitOutcome::Replied
            }
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                self.append(Message::assistant(self.config.apology_message.clone()));
                SubmitOutcome::Failed
            }
        }
    }

    fn acquire_slot(&self) -> Option<SendingSlot<'_>> {
        match self.config.busy_policy {
            BusyPolicy::Ignore => {
                self.in_flight
                    .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                    .ok()?;
            }
            BusyPolicy::Allow => {
                self.in_flight.fetch_add(1, Ordering::AcqRel);
            }
        }
        Some(SendingSlot { in_flight: &self.in_flight })
    }

    fn append(&self, message: Message) {
        self.surface.append_message(&message);
        self.surface.scroll_to_bottom();
    }
}
