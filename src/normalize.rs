//! Text normalization for cue matching.
//!
//! DESIGN
//! ======
//! Input is lowercased, decomposed to NFD, and stripped of combining marks,
//! so "SEÑAL", "Señal" and "senal" all compare equal. Cues in the knowledge
//! base are written in this folded form.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold `text` to the form cues are written in. Total: never fails.
///
/// Strips every combining mark (Unicode Mn, Mc, Me) after decomposition,
/// not only Latin diacritics: Devanagari vowel signs, for example, are
/// removed as well.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
