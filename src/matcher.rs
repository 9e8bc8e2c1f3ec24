//! Cue-based answer selection.
//!
//! DESIGN
//! ======
//! Resolution runs in three stages over the normalized input:
//! 1. first topic (declaration order) with any cue contained in the text;
//! 2. otherwise the greeting answer if any `GREETING_CUES` entry is present;
//! 3. otherwise a random fallback sentence plus a random suggested prompt.
//!
//! Containment is plain substring search with no word boundaries, so a
//! short cue can fire inside an unrelated longer word. Stages 1 and 2 are
//! deterministic; only stage 3 consults the injected `RandomSource`.

use std::fmt;
use std::sync::Arc;

use crate::knowledge::{GREETING_CUES, KnowledgeBase};
use crate::normalize::normalize;
use crate::random::{RandomSource, ThreadRandom};

/// Which stage produced an answer, borrowing text from the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    Topic { name: &'a str, answer: &'a str },
    Greeting { answer: &'a str },
    Fallback { fallback: &'a str, suggestion: &'a str },
}

impl MatchOutcome<'_> {
    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Topic { .. } => "topic",
            Self::Greeting { .. } => "greeting",
            Self::Fallback { .. } => "fallback",
        }
    }
}

impl fmt::Display for MatchOutcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic { answer, .. } | Self::Greeting { answer } => f.write_str(answer),
            Self::Fallback { fallback, suggestion } => write!(f, "{fallback}\n\nEjemplo: {suggestion}"),
        }
    }
}

#[derive(Clone)]
pub struct Matcher {
    knowledge: Arc<KnowledgeBase>,
    random: Arc<dyn RandomSource>,
}

impl Matcher {
    #[must_use]
    pub fn new(knowledge: Arc<KnowledgeBase>, random: Arc<dyn RandomSource>) -> Self {
        Self { knowledge, random }
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Shared handle to the random source, for components that draw from
    /// the same stream (reply delays).
    #[must_use]
    pub fn random(&self) -> Arc<dyn RandomSource> {
        Arc::clone(&self.random)
    }

    /// Resolve `raw_text` to the stage that answers it.
    #[must_use]
    pub fn classify(&self, raw_text: &str) -> MatchOutcome<'_> {
        let normalized = normalize(raw_text);
        let kb = &*self.knowledge;

        let topic = kb
            .topics()
            .iter()
            .find(|topic| topic.cues.iter().any(|cue| normalized.contains(cue.as_str())));
        if let Some(topic) = topic {
            return MatchOutcome::Topic { name: &topic.name, answer: &topic.answer };
        }

        if GREETING_CUES.iter().any(|cue| normalized.contains(*cue)) {
            return MatchOutcome::Greeting { answer: kb.greeting() };
        }

        let fallbacks = kb.fallbacks();
        let suggestions = kb.suggestions();
        MatchOutcome::Fallback {
            fallback: &fallbacks[self.random.below(fallbacks.len()).min(fallbacks.len() - 1)],
            suggestion: &suggestions[self.random.below(suggestions.len()).min(suggestions.len() - 1)],
        }
    }

    /// Final answer text for `raw_text`. Never empty.
    #[must_use]
    pub fn answer(&self, raw_text: &str) -> String {
        self.classify(raw_text).to_string()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Arc::new(KnowledgeBase::builtin()), Arc::new(ThreadRandom))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("topics", &self.knowledge.topics().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
