//! Help-widget state machine.
//!
//! DESIGN
//! ======
//! The widget owns one conversation for its lifetime. Panel visibility and
//! the draft input are plain fields; "thinking" lives in the scheduler so
//! the reply task can clear it. Observable states:
//!
//! ```text
//!            toggle / open               submit (non-blank)
//!   Closed ───────────────▶ Open-Idle ─────────────────────▶ Open-Thinking
//!          ◀───────────────           ◀─────────────────────
//!            toggle / close              reply delivered
//! ```
//!
//! Closing the panel only hides it: a pending reply still lands in the
//! history, and submissions are accepted whether or not the panel is open.
//! Blank submissions and submissions while thinking are silent no-ops.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::config::{AssistantConfig, DelayWindow};
use crate::conversation::{ConversationStore, Message};
use crate::knowledge::KnowledgeBase;
use crate::matcher::Matcher;
use crate::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::scheduler::{PendingReply, ResponseScheduler, ScheduleError};

/// Placeholder rendered while a reply is pending.
pub const THINKING_INDICATOR: &str = "Pensando...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    OpenIdle,
    OpenThinking,
}

#[derive(Debug)]
pub struct Widget {
    store: ConversationStore,
    scheduler: ResponseScheduler,
    panel_open: bool,
    draft: String,
}

impl Widget {
    /// Mount a widget: panel closed, history seeded with the welcome message.
    #[must_use]
    pub fn new(matcher: Matcher, delay: DelayWindow) -> Self {
        let store = ConversationStore::new();
        store.append(Message::assistant(matcher.knowledge().welcome()));
        Self { store, scheduler: ResponseScheduler::new(matcher, delay), panel_open: false, draft: String::new() }
    }

    /// Widget over the built-in knowledge base, configured delay and seed.
    #[must_use]
    pub fn from_config(config: &AssistantConfig) -> Self {
        let random: Arc<dyn RandomSource> = match config.rng_seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        let matcher = Matcher::new(Arc::new(KnowledgeBase::builtin()), random);
        Self::new(matcher, config.delay)
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> WidgetState {
        match (self.panel_open, self.scheduler.is_thinking()) {
            (false, _) => WidgetState::Closed,
            (true, false) => WidgetState::OpenIdle,
            (true, true) => WidgetState::OpenThinking,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn is_thinking(&self) -> bool {
        self.scheduler.is_thinking()
    }

    #[must_use]
    pub fn thinking_indicator(&self) -> Option<&'static str> {
        self.is_thinking().then_some(THINKING_INDICATOR)
    }

    /// Chronological messages for rendering.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.store.ordered_view()
    }

    #[must_use]
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether the send button is enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Quick prompts to render as chips.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        self.scheduler.matcher().knowledge().suggestions()
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    pub fn toggle(&mut self) {
        self.panel_open = !self.panel_open;
        debug!(open = self.panel_open, "assistant: panel toggled");
    }

    pub fn open(&mut self) {
        self.panel_open = true;
    }

    pub fn close(&mut self) {
        self.panel_open = false;
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the current draft, as the form's send button does.
    pub fn submit_draft(&mut self) -> Option<PendingReply> {
        let draft = self.draft.clone();
        self.submit(&draft)
    }

    /// Submit a quick prompt chip. Same rules as `submit`.
    pub fn pick_suggestion(&mut self, prompt: &str) -> Option<PendingReply> {
        self.submit(prompt)
    }

    /// Append the user's message now and schedule the assistant's reply.
    ///
    /// Returns `None` (and changes nothing) for blank text, while a reply
    /// is pending, or when no Tokio runtime is available to defer the reply.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            debug!("assistant: blank submission ignored");
            return None;
        }
        if self.scheduler.is_thinking() {
            debug!("assistant: submission ignored while thinking");
            return None;
        }
        if Handle::try_current().is_err() {
            warn!(error = %ScheduleError::NoRuntime, "assistant: submission ignored");
            return None;
        }

        self.store.append(Message::user(text));
        self.draft.clear();

        let store = self.store.clone();
        match self.scheduler.schedule(text, move |answer| store.append(Message::assistant(answer))) {
            Ok(pending) => Some(pending),
            Err(ScheduleError::Busy | ScheduleError::BlankPrompt) => None,
            Err(e @ ScheduleError::NoRuntime) => {
                warn!(error = %e, "assistant: reply not scheduled");
                None
            }
        }
    }
}

impl Default for Widget {
    fn default() -> Self {
        Self::new(Matcher::default(), DelayWindow::default())
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
