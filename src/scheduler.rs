//! Simulated-latency reply delivery.
//!
//! DESIGN
//! ======
//! `schedule` flips the shared `thinking` flag, spawns a Tokio task that
//! sleeps for a delay drawn from the configured window, runs the matcher,
//! hands the answer to the caller's callback, then clears the flag. Only
//! one reply may be outstanding: the flag is claimed with a compare-and-swap
//! so a second `schedule` while thinking fails with `Busy` instead of
//! interleaving replies.
//!
//! The task is detached. Dropping the returned `PendingReply` does not
//! cancel the reply; it only gives up the ability to await it.
//!
//! ERROR HANDLING
//! ==============
//! The flag is cleared by a drop guard inside the task, so a panicking
//! callback or a runtime shutdown cannot leave the widget stuck thinking.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};
use tracing::info;

use crate::config::DelayWindow;
use crate::matcher::{MatchOutcome, Matcher};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("prompt is blank")]
    BlankPrompt,
    #[error("a reply is already pending")]
    Busy,
    #[error("no async runtime available to defer the reply")]
    NoRuntime,
}

/// Handle to a reply that has been scheduled but maybe not delivered.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<()>,
}

impl PendingReply {
    /// Wait until the answer has been delivered and `thinking` cleared.
    ///
    /// # Errors
    ///
    /// Returns the join error if the delivery callback panicked.
    pub async fn settled(self) -> Result<(), JoinError> {
        self.handle.await
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[derive(Debug, Clone)]
pub struct ResponseScheduler {
    matcher: Matcher,
    delay: DelayWindow,
    thinking: Arc<AtomicBool>,
}

impl ResponseScheduler {
    #[must_use]
    pub fn new(matcher: Matcher, delay: DelayWindow) -> Self {
        Self { matcher, delay, thinking: Arc::new(AtomicBool::new(false)) }
    }

    #[must_use]
    pub fn is_thinking(&self) -> bool {
        self.thinking.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    #[must_use]
    pub fn delay_window(&self) -> DelayWindow {
        self.delay
    }

    /// Defer answering `prompt`; `on_ready` receives the answer after the delay.
    ///
    /// # Errors
    ///
    /// `BlankPrompt` for empty or whitespace-only prompts, `Busy` while a
    /// previous reply is still pending, `NoRuntime` outside a Tokio runtime.
    /// In every error case nothing is scheduled and `thinking` is unchanged.
    pub fn schedule<F>(&self, prompt: &str, on_ready: F) -> Result<PendingReply, ScheduleError>
    where
        F: FnOnce(String) + Send + 'static,
    {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ScheduleError::BlankPrompt);
        }
        let runtime = Handle::try_current().map_err(|_| ScheduleError::NoRuntime)?;
        if self
            .thinking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ScheduleError::Busy);
        }

        let delay = self.sample_delay();
        let guard = ThinkingGuard(Arc::clone(&self.thinking));
        let matcher = self.matcher.clone();
        let prompt = prompt.to_string();

        info!(prompt_len = prompt.len(), delay_ms = delay.as_millis(), "assistant: reply scheduled");

        let handle = runtime.spawn(async move {
            let _guard = guard;
            tokio::time::sleep(delay).await;

            let outcome = matcher.classify(&prompt);
            let topic = match outcome {
                MatchOutcome::Topic { name, .. } => Some(name),
                _ => None,
            };
            info!(kind = outcome.kind(), topic, "assistant: reply ready");
            on_ready(outcome.to_string());
        });

        Ok(PendingReply { handle })
    }

    fn sample_delay(&self) -> Duration {
        let span = usize::try_from(self.delay.span()).unwrap_or(usize::MAX);
        let offset = self.matcher.random().below(span);
        self.delay.delay_at(u64::try_from(offset).unwrap_or(u64::MAX))
    }
}

/// Clears the thinking flag when the reply task ends, however it ends.
struct ThinkingGuard(Arc<AtomicBool>);

impl Drop for ThinkingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
