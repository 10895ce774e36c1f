//! Integration tests that exercise App key handling via send_key()

mod helpers;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use dockhand_engine::test_support::MockCall;
use dockhand_tui::{App, Event, Focus};
use helpers::{loaded_app, sample_engine};

fn press(app: &mut App, code: KeyCode) {
    app.send_key(code, KeyModifiers::NONE);
}

// ---------------------------------------------------------------------------
// Navigation tests
// ---------------------------------------------------------------------------

/// Pressing 'j' twice moves the selection down by two
#[tokio::test]
async fn test_j_moves_selection_down() {
    let mut app = loaded_app(sample_engine()).await;
    assert_eq!(app.view.selected_index(), Some(0));

    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Down);
    assert_eq!(app.view.selected_index(), Some(2));
}

/// Pressing 'k' at the top wraps selection to the last item
#[tokio::test]
async fn test_k_wraps_selection_up() {
    let mut app = loaded_app(sample_engine()).await;

    press(&mut app, KeyCode::Char('k'));
    assert_eq!(
        app.view.selected_index(),
        Some(6),
        "k at position 0 should wrap to last item"
    );
    press(&mut app, KeyCode::Up);
    assert_eq!(app.view.selected_index(), Some(5));
}

#[tokio::test]
async fn test_jump_to_first_and_last() {
    let mut app = loaded_app(sample_engine()).await;

    press(&mut app, KeyCode::Char('G'));
    assert_eq!(app.view.selected_index(), Some(6));
    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.view.selected_index(), Some(0));
    press(&mut app, KeyCode::End);
    assert_eq!(app.view.selected_index(), Some(6));
    press(&mut app, KeyCode::Home);
    assert_eq!(app.view.selected_index(), Some(0));
}

/// Moving the cursor describes the new selection in the status line
#[tokio::test]
async fn test_navigation_updates_status() {
    let mut app = loaded_app(sample_engine()).await;

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.status, "Container: scratch [created]");

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.status, "Project: app [1/2 running]");
}

#[tokio::test]
async fn test_navigation_on_empty_list_keeps_status() {
    let mut app = App::new_for_testing(sample_engine());
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.view.selected_index(), None);
    assert_eq!(app.status, "Ready (auto-refresh: 5s)");
}

// ---------------------------------------------------------------------------
// Focus and buttons
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_tab_cycles_focus() {
    let mut app = App::new_for_testing(sample_engine());

    let mut seen = vec![app.focus];
    for _ in 0..4 {
        press(&mut app, KeyCode::Tab);
        seen.push(app.focus);
    }
    assert_eq!(
        seen,
        vec![
            Focus::List,
            Focus::RestartStart,
            Focus::Stop,
            Focus::Exit,
            Focus::List
        ]
    );

    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, Focus::Exit);
}

#[tokio::test]
async fn test_enter_on_exit_button_quits() {
    let mut app = App::new_for_testing(sample_engine());
    app.focus = Focus::Exit;
    press(&mut app, KeyCode::Enter);
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_enter_on_list_does_nothing() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    press(&mut app, KeyCode::Enter);
    assert!(!app.should_quit);
    assert!(!app.is_busy());
    assert!(engine.lifecycle_calls().is_empty());
}

#[tokio::test]
async fn test_enter_on_stop_button_stops_selection() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    press(&mut app, KeyCode::End);
    app.focus = Focus::Stop;

    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert!(engine.was_called(&MockCall::Stop { id: "m1".into() }));
    assert_eq!(app.status, "Container metrics stopped successfully");
}

// ---------------------------------------------------------------------------
// Command shortcuts
// ---------------------------------------------------------------------------

/// 'r' on a project with nothing running starts every member
#[tokio::test]
async fn test_r_starts_stopped_project() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    assert_eq!(app.status, "Loaded 4 containers in 3 projects");

    // Standalone project: scratch is only created
    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.status, "Starting project Standalone...");
    app.settle().await;

    assert_eq!(
        engine.lifecycle_calls(),
        vec![MockCall::Start { id: "s1".into() }]
    );
}

/// 'r' on a partly running project restarts every member
#[tokio::test]
async fn test_r_restarts_running_project() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('j'));

    press(&mut app, KeyCode::Char('r'));
    app.settle().await;

    let calls = engine.lifecycle_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| matches!(c, MockCall::Restart { .. })));
    assert_eq!(app.status, "Project app restarted successfully");
}

#[tokio::test]
async fn test_s_stops_container() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(4));

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.status, "Stopping container web...");
    app.settle().await;

    assert_eq!(
        engine.lifecycle_calls(),
        vec![MockCall::Stop { id: "w1".into() }]
    );
}

#[tokio::test]
async fn test_f5_refreshes() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;

    press(&mut app, KeyCode::F(5));
    assert_eq!(app.status, "Loading...");
    app.settle().await;

    assert_eq!(engine.list_count(), 2);
}

// ---------------------------------------------------------------------------
// Quitting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_quit_keys() {
    for code in [KeyCode::Char('e'), KeyCode::Char('q'), KeyCode::Esc] {
        let mut app = App::new_for_testing(sample_engine());
        press(&mut app, code);
        assert!(app.should_quit, "{:?} should quit", code);
    }

    let mut app = App::new_for_testing(sample_engine());
    app.send_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
}

/// Key releases are ignored, only presses act
#[tokio::test]
async fn test_key_release_is_ignored() {
    let mut app = App::new_for_testing(sample_engine());
    let release = KeyEvent {
        code: KeyCode::Char('e'),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    app.handle_event(Event::Key(release));
    assert!(!app.should_quit);

    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('e'),
        KeyModifiers::NONE,
    )));
    assert!(app.should_quit);
}
