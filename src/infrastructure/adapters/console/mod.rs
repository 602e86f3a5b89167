//! Console adapter - renders the conversation on a terminal

use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{IndicatorId, Message};
use crate::domain::traits::Surface;

const TYPING_TEXT: &str = "[BOT] ...";
const ERASE_LINE: &str = "\r\x1b[2K";

#[derive(Debug, Default)]
struct State {
    live: Vec<IndicatorId>,
    /// An indicator line is the last thing printed, without a newline
    indicator_drawn: bool,
    next_indicator: u64,
}

/// Terminal surface for local use
///
/// A terminal always shows its newest line, so scrolling is implicit. The
/// input field is the terminal line itself and is consumed by `read_line`.
pub struct ConsoleAdapter {
    state: Mutex<State>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();

        let mut input = String::new();
        let read = tokio::task::spawn_blocking(move || {
            std::io::stdin().read_line(&mut input).map(|n| (n, input))
        })
        .await
        .ok()?;

        match read {
            Ok((0, _)) => None,
            Ok((_, line)) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                None
            }
        }
    }

    /// Print a full line, keeping a live indicator at the bottom
    fn print_line(&self, line: &str) {
        let mut state = self.state();
        let mut out = std::io::stdout().lock();
        if state.indicator_drawn {
            let _ = write!(out, "{}", ERASE_LINE);
        }
        let _ = writeln!(out, "{}", line);
        if !state.live.is_empty() {
            let _ = write!(out, "{}", TYPING_TEXT);
            state.indicator_drawn = true;
        } else {
            state.indicator_drawn = false;
        }
        let _ = out.flush();
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for ConsoleAdapter {
    fn append_message(&self, message: &Message) {
        let tag = if message.is_user() { "[YOU]" } else { "[BOT]" };
        self.print_line(&format!("{} {}", tag, message.content));
    }

    fn show_typing(&self) -> IndicatorId {
        let mut state = self.state();
        state.next_indicator += 1;
        let id = IndicatorId(state.next_indicator);
        state.live.push(id);
        if !state.indicator_drawn {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "{}", TYPING_TEXT);
            let _ = out.flush();
            state.indicator_drawn = true;
        }
        id
    }

    fn remove_typing(&self, id: IndicatorId) {
        let mut state = self.state();
        state.live.retain(|live| *live != id);
        if state.live.is_empty() && state.indicator_drawn {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "{}", ERASE_LINE);
            let _ = out.flush();
            state.indicator_drawn = false;
        }
    }

    fn scroll_to_bottom(&self) {}

    fn clear_input(&self) {}

    fn focus_input(&self) {
        tracing::trace!("Console input ready");
    }

    fn notice(&self, text: &str) {
        self.print_line(&format!("[--] {}", text));
    }
}
