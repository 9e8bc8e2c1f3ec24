//! # knowledge-assistant
//!
//! Matching and conversation-state engine for the Knowledge platform's
//! embedded help widget. Free-text questions are folded (`normalize`),
//! matched against a static topic list (`knowledge`, `matcher`), and
//! answered after a simulated thinking delay (`scheduler`). The `widget`
//! module ties these together with panel visibility and the draft input;
//! `conversation` holds the append-only message history it renders.

pub mod config;
pub mod conversation;
pub mod knowledge;
pub mod matcher;
pub mod normalize;
pub mod random;
pub mod scheduler;
pub mod widget;
