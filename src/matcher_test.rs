use super::*;
use crate::knowledge::Topic;
use std::sync::Mutex;

// =============================================================================
// ScriptedRandom
// =============================================================================

/// Returns queued indices in order, then zeros.
struct ScriptedRandom {
    picks: Mutex<Vec<usize>>,
}

impl ScriptedRandom {
    fn new(picks: Vec<usize>) -> Arc<Self> {
        Arc::new(Self { picks: Mutex::new(picks) })
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&self, _upper: usize) -> usize {
        let mut picks = self.picks.lock().unwrap();
        if picks.is_empty() { 0 } else { picks.remove(0) }
    }
}

fn builtin_matcher(picks: Vec<usize>) -> Matcher {
    Matcher::new(Arc::new(KnowledgeBase::builtin()), ScriptedRandom::new(picks))
}

fn topic_name(matcher: &Matcher, text: &str) -> Option<String> {
    match matcher.classify(text) {
        MatchOutcome::Topic { name, .. } => Some(name.to_string()),
        _ => None,
    }
}

// =============================================================================
// topic matching
// =============================================================================

#[test]
fn registration_question_matches_registro() {
    let matcher = builtin_matcher(vec![]);
    assert_eq!(topic_name(&matcher, "¿Cómo me registro?").as_deref(), Some("registro"));
    assert_eq!(matcher.answer("¿Cómo me registro?"), matcher.knowledge().topics()[0].answer);
}

#[test]
fn cue_matches_inside_larger_word() {
    let matcher = builtin_matcher(vec![]);
    assert_eq!(topic_name(&matcher, "registrooo").as_deref(), Some("registro"));
}

#[test]
fn matching_ignores_case_and_accents() {
    let matcher = builtin_matcher(vec![]);
    assert_eq!(topic_name(&matcher, "AUTENTICACIÓN").as_deref(), Some("seguridad"));
    assert_eq!(topic_name(&matcher, "Iniciar Sesión").as_deref(), Some("login"));
}

#[test]
fn earlier_topic_wins_when_two_match() {
    let matcher = builtin_matcher(vec![]);
    // "registr" (registro) and "profesor" (rol profesor) both present.
    assert_eq!(topic_name(&matcher, "quiero registrarme como profesor").as_deref(), Some("registro"));
}

#[test]
fn earlier_topic_wins_in_custom_base() {
    let kb = KnowledgeBase::new(
        vec![Topic::new("first", &["beta"], "A"), Topic::new("second", &["alpha"], "B")],
        vec!["f".into()],
        vec!["s".into()],
    )
    .unwrap();
    let matcher = Matcher::new(Arc::new(kb), ScriptedRandom::new(vec![]));
    assert_eq!(matcher.answer("alpha beta"), "A");
    assert_eq!(matcher.answer("alpha"), "B");
}

#[test]
fn every_suggested_prompt_hits_a_topic() {
    let matcher = builtin_matcher(vec![]);
    let expected = ["registro", "rol profesor", "soporte", "rol estudiante"];
    for (prompt, topic) in matcher.knowledge().suggestions().iter().zip(expected) {
        assert_eq!(topic_name(&matcher, prompt).as_deref(), Some(topic), "prompt {prompt}");
    }
}

// =============================================================================
// greeting
// =============================================================================

#[test]
fn greeting_without_topic_returns_greeting() {
    let matcher = builtin_matcher(vec![]);
    assert_eq!(matcher.classify("hola!"), MatchOutcome::Greeting { answer: matcher.knowledge().greeting() });
    assert_eq!(matcher.answer("Buenas tardes"), matcher.knowledge().greeting());
    assert_eq!(matcher.answer("hey"), matcher.knowledge().greeting());
}

#[test]
fn topic_beats_greeting() {
    let matcher = builtin_matcher(vec![]);
    assert_eq!(topic_name(&matcher, "hola, necesito ayuda").as_deref(), Some("soporte"));
}

// =============================================================================
// fallback
// =============================================================================

#[test]
fn fallback_uses_scripted_indices() {
    let matcher = builtin_matcher(vec![2, 1]);
    let kb = matcher.knowledge();
    let expected = format!("{}\n\nEjemplo: {}", kb.fallbacks()[2], kb.suggestions()[1]);
    assert_eq!(matcher.answer("qwerty"), expected);
}

#[test]
fn fallback_always_composed_from_fixed_sets() {
    let matcher = Matcher::default();
    let kb = matcher.knowledge();
    for _ in 0..50 {
        let answer = matcher.answer("xyz");
        let (fallback, suggestion) = answer.split_once("\n\nEjemplo: ").unwrap();
        assert!(kb.fallbacks().iter().any(|f| f == fallback));
        assert!(kb.suggestions().iter().any(|s| s == suggestion));
    }
}

#[test]
fn empty_input_still_answers() {
    let matcher = builtin_matcher(vec![]);
    assert_eq!(matcher.classify("").kind(), "fallback");
    assert!(!matcher.answer("").is_empty());
}

#[test]
fn out_of_range_pick_is_clamped() {
    let matcher = builtin_matcher(vec![99, 99]);
    let kb = matcher.knowledge();
    let expected = format!("{}\n\nEjemplo: {}", kb.fallbacks()[2], kb.suggestions()[3]);
    assert_eq!(matcher.answer("zzz"), expected);
}
