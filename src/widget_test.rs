use super::*;
use crate::conversation::Role;

fn widget() -> Widget {
    let matcher = Matcher::new(Arc::new(KnowledgeBase::builtin()), Arc::new(SeededRandom::new(3)));
    Widget::new(matcher, DelayWindow::immediate())
}

fn open_widget() -> Widget {
    let mut w = widget();
    w.open();
    w
}

// =============================================================================
// mount
// =============================================================================

#[test]
fn mounts_closed_with_seeded_welcome() {
    let w = widget();
    assert_eq!(w.state(), WidgetState::Closed);
    let messages = w.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Assistant);
    assert_eq!(messages[0].text, KnowledgeBase::builtin().welcome());
    assert!(w.draft().is_empty());
    assert_eq!(w.thinking_indicator(), None);
}

#[test]
fn from_config_uses_builtin_suggestions() {
    let w = Widget::from_config(&AssistantConfig { delay: DelayWindow::immediate(), rng_seed: Some(1) });
    assert_eq!(w.suggestions().len(), 4);
}

// =============================================================================
// panel
// =============================================================================

#[test]
fn toggle_flips_visibility_only() {
    let mut w = widget();
    w.toggle();
    assert_eq!(w.state(), WidgetState::OpenIdle);
    w.toggle();
    assert_eq!(w.state(), WidgetState::Closed);
    assert_eq!(w.messages().len(), 1);
    assert!(!w.is_thinking());
}

#[test]
fn open_and_close_are_idempotent() {
    let mut w = widget();
    w.open();
    w.open();
    assert!(w.is_open());
    w.close();
    w.close();
    assert!(!w.is_open());
}

// =============================================================================
// draft
// =============================================================================

#[test]
fn can_send_tracks_non_blank_draft() {
    let mut w = open_widget();
    assert!(!w.can_send());
    w.edit_draft("   ");
    assert!(!w.can_send());
    w.edit_draft("hola");
    assert!(w.can_send());
    assert_eq!(w.draft(), "hola");
}

// =============================================================================
// submit
// =============================================================================

#[tokio::test]
async fn blank_submissions_are_noops() {
    let mut w = open_widget();
    w.edit_draft("   ");
    assert!(w.submit("").is_none());
    assert!(w.submit("   ").is_none());
    assert!(w.submit_draft().is_none());
    assert_eq!(w.messages().len(), 1);
    assert!(!w.is_thinking());
    assert_eq!(w.draft(), "   ");
}

#[tokio::test]
async fn submit_appends_user_message_then_reply() {
    let mut w = open_widget();
    let pending = w.submit("  ¿Cómo me registro?  ").unwrap();

    assert_eq!(w.state(), WidgetState::OpenThinking);
    assert_eq!(w.thinking_indicator(), Some(THINKING_INDICATOR));
    let messages = w.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].text, "¿Cómo me registro?");

    pending.settled().await.unwrap();
    assert_eq!(w.state(), WidgetState::OpenIdle);
    let messages = w.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].text, KnowledgeBase::builtin().topics()[0].answer);
}

#[tokio::test]
async fn submit_while_thinking_is_ignored() {
    let mut w = open_widget();
    let pending = w.submit("login").unwrap();
    w.edit_draft("profesor");

    assert!(w.submit("profesor").is_none());
    assert!(w.submit_draft().is_none());
    assert_eq!(w.messages().len(), 2);
    assert_eq!(w.draft(), "profesor");
    assert!(w.is_thinking());

    pending.settled().await.unwrap();
    let messages = w.messages();
    assert_eq!(messages.len(), 3);
    let kb = KnowledgeBase::builtin();
    let login = kb.topics().iter().find(|t| t.name == "login").unwrap();
    assert_eq!(messages[2].text, login.answer);
}

#[tokio::test]
async fn submit_draft_clears_draft() {
    let mut w = open_widget();
    w.edit_draft("hola");
    let pending = w.submit_draft().unwrap();
    assert!(w.draft().is_empty());
    assert!(!w.can_send());

    pending.settled().await.unwrap();
    assert_eq!(w.messages()[2].text, KnowledgeBase::builtin().greeting());
}

#[tokio::test]
async fn pick_suggestion_submits_prompt_and_clears_draft() {
    let mut w = open_widget();
    w.edit_draft("half typed");
    let prompt = w.suggestions()[3].clone();

    let pending = w.pick_suggestion(&prompt).unwrap();
    assert!(w.draft().is_empty());
    assert_eq!(w.messages()[1].text, prompt);

    pending.settled().await.unwrap();
    let kb = KnowledgeBase::builtin();
    let student = kb.topics().iter().find(|t| t.name == "rol estudiante").unwrap();
    assert_eq!(w.messages()[2].text, student.answer);
}

#[tokio::test]
async fn reply_lands_even_if_panel_closed() {
    let mut w = open_widget();
    let pending = w.submit("token").unwrap();
    w.close();
    assert_eq!(w.state(), WidgetState::Closed);
    assert!(w.is_thinking());

    pending.settled().await.unwrap();
    assert_eq!(w.messages().len(), 3);
    assert!(!w.is_thinking());
}

#[tokio::test]
async fn cycles_back_to_idle_for_next_question() {
    let mut w = open_widget();
    w.submit("registro").unwrap().settled().await.unwrap();
    w.submit("login").unwrap().settled().await.unwrap();

    let roles: Vec<Role> = w.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::Assistant, Role::User, Role::Assistant, Role::User, Role::Assistant]);
}

#[test]
fn submit_outside_runtime_changes_nothing() {
    let mut w = open_widget();
    w.edit_draft("login");
    assert!(w.submit_draft().is_none());
    assert!(w.submit("login").is_none());
    assert_eq!(w.messages().len(), 1);
    assert_eq!(w.draft(), "login");
    assert_eq!(w.state(), WidgetState::OpenIdle);
}
