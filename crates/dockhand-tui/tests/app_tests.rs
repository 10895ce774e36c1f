//! App state transitions driven through posted background events

mod helpers;

use dockhand_core::{RefreshTrigger, LOADING_STATUS};
use dockhand_engine::test_support::{record, MockCall, MockEngine};
use dockhand_engine::EngineError;
use dockhand_tui::{App, Event, Focus, Selection};
use helpers::{loaded_app, sample_engine};
use std::sync::Arc;

// ==================== Startup ====================

#[tokio::test]
async fn test_initial_state() {
    let app = App::new_for_testing(sample_engine());
    assert_eq!(app.status, "Ready (auto-refresh: 5s)");
    assert_eq!(app.focus, Focus::List);
    assert!(app.view.entries().is_empty());
    assert!(app.last_refresh.is_none());
    assert_eq!(app.engine_info.endpoint, "mock://engine");
}

#[tokio::test]
async fn test_user_refresh_shows_loading_then_summary() {
    let mut app = App::new_for_testing(sample_engine());

    app.request_refresh(RefreshTrigger::User);
    assert_eq!(app.status, LOADING_STATUS);

    app.settle().await;
    assert_eq!(app.status, "Loaded 4 containers in 3 projects");
    assert_eq!(app.view.entries().len(), 7);
    assert_eq!(app.view.selected_index(), Some(0));
    assert!(app.last_refresh.is_some());
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let engine = Arc::new(MockEngine::with_containers(vec![
        record("1", "web", "running", Some("app"), Some("web")),
        record("2", "db", "exited", Some("app"), Some("db")),
    ]));
    let app = loaded_app(engine).await;

    assert_eq!(app.view.projects().len(), 1);
    assert_eq!(app.view.projects()[0].running_count(), 1);
    assert_eq!(app.view.projects()[0].total_count(), 2);
    assert_eq!(app.view.entries().len(), 3);
    assert_eq!(app.status, "Loaded 2 containers in 1 projects");
}

// ==================== Refresh ====================

#[tokio::test]
async fn test_refresh_twice_gives_same_rows_and_status() {
    let mut app = loaded_app(sample_engine()).await;
    let rows: Vec<String> = app.view.lines().iter().map(|s| s.to_string()).collect();
    let status = app.status.clone();

    app.request_refresh(RefreshTrigger::User);
    app.settle().await;

    assert_eq!(app.view.lines(), rows);
    assert_eq!(app.status, status);
}

#[tokio::test]
async fn test_auto_refresh_status() {
    let mut app = loaded_app(sample_engine()).await;

    app.handle_event(Event::AutoRefresh);
    // Auto refreshes never show the loading text
    assert_eq!(app.status, "Loaded 4 containers in 3 projects");
    app.settle().await;

    assert_eq!(app.status, "Auto-refreshed: 4 containers in 3 projects");
}

#[tokio::test]
async fn test_failed_refresh_keeps_the_list() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.send_key(
        crossterm::event::KeyCode::Char('j'),
        crossterm::event::KeyModifiers::NONE,
    );

    engine.fail_list(EngineError::Query("daemon hiccup".into()));
    app.request_refresh(RefreshTrigger::User);
    app.settle().await;
    assert_eq!(app.status, "Error: Engine query failed: daemon hiccup");
    assert_eq!(app.view.entries().len(), 7);
    assert_eq!(app.view.selected_index(), Some(1));

    app.handle_event(Event::AutoRefresh);
    app.settle().await;
    assert_eq!(app.status, "Auto-refresh error: Engine query failed: daemon hiccup");
    assert_eq!(app.view.entries().len(), 7);
}

#[tokio::test]
async fn test_auto_tick_during_user_fetch_is_dropped() {
    let engine = sample_engine();
    let gate = engine.hold_list();
    let mut app = App::new_for_testing(engine.clone());

    app.request_refresh(RefreshTrigger::User);
    tokio::task::yield_now().await;
    app.handle_event(Event::AutoRefresh);

    gate.release();
    app.settle().await;

    assert_eq!(engine.list_count(), 1);
    assert_eq!(app.status, "Loaded 4 containers in 3 projects");
}

#[tokio::test]
async fn test_user_refresh_during_fetch_runs_afterwards() {
    let engine = sample_engine();
    let gate = engine.hold_list();
    let mut app = App::new_for_testing(engine.clone());

    app.request_refresh(RefreshTrigger::Auto);
    tokio::task::yield_now().await;
    app.request_refresh(RefreshTrigger::User);
    app.request_refresh(RefreshTrigger::User);

    gate.release();
    app.settle().await;

    // Two queued user requests collapse into one follow-up cycle
    assert_eq!(engine.list_count(), 2);
    assert_eq!(app.status, "Loaded 4 containers in 3 projects");
}

#[tokio::test]
async fn test_refresh_picks_up_engine_changes() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;

    engine.set_containers(vec![record("w1", "web", "exited", Some("app"), None)]);
    app.handle_event(Event::AutoRefresh);
    app.settle().await;

    assert_eq!(app.view.lines(), vec!["--> APP (0/1 running)", "    ○ web [exited]"]);
    assert_eq!(app.status, "Auto-refreshed: 1 containers in 1 projects");
}

// ==================== Commands ====================

#[tokio::test]
async fn test_command_result_survives_follow_up_refresh() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(4)); // web, running

    app.activate(Focus::RestartStart);
    assert_eq!(app.status, "Restarting container web...");
    app.settle().await;

    assert!(engine.was_called(&MockCall::Restart { id: "w1".into() }));
    assert_eq!(engine.list_count(), 2);
    assert_eq!(app.status, "Container web restarted successfully");
    assert_eq!(app.view.selected_index(), Some(4));
}

#[tokio::test]
async fn test_command_result_survives_auto_refresh_in_flight() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(4)); // web, running

    let gate = engine.hold_list();
    app.handle_event(Event::AutoRefresh);
    app.send_key(
        crossterm::event::KeyCode::Char('s'),
        crossterm::event::KeyModifiers::NONE,
    );
    app.view.select_first();

    // The stop finishes while the auto-refresh is still fetching
    assert!(app.step().await);
    assert_eq!(app.status, "Container web stopped successfully");

    gate.release();
    app.settle().await;

    // Initial load, the auto tick, then the follow-up refresh
    assert_eq!(engine.list_count(), 3);
    assert_eq!(app.status, "Container web stopped successfully");
    assert_eq!(app.view.selected_index(), Some(4));
}

#[tokio::test]
async fn test_follow_up_refresh_error_replaces_command_result() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(4));

    engine.fail_list(EngineError::Query("daemon hiccup".into()));
    app.activate(Focus::Stop);
    app.settle().await;

    assert_eq!(app.status, "Error: Engine query failed: daemon hiccup");
    assert_eq!(app.view.entries().len(), 7);
}

#[tokio::test]
async fn test_failed_command_status() {
    let engine = sample_engine();
    engine.fail_container("d1");
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(2)); // app project

    app.activate(Focus::Stop);
    assert_eq!(app.status, "Stopping project app...");
    app.settle().await;

    assert!(engine.was_called(&MockCall::Stop { id: "w1".into() }));
    assert!(engine.was_called(&MockCall::Stop { id: "d1".into() }));
    assert_eq!(app.status, "Failed to stop project app");
}

#[tokio::test]
async fn test_selection_restored_after_command() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(6)); // metrics

    // Another row gets selected while the command runs
    app.activate(Focus::Stop);
    app.view.select_first();
    app.settle().await;

    assert_eq!(app.view.selected_index(), Some(6));
    assert!(matches!(
        app.view.current_selection(),
        Some(Selection::Container(c)) if c.name == "metrics"
    ));
}

#[tokio::test]
async fn test_selection_clamped_when_list_shrinks_after_command() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(6));

    engine.set_containers(vec![record("w1", "web", "running", Some("app"), None)]);
    app.activate(Focus::Stop);
    app.settle().await;

    assert_eq!(app.view.selected_index(), Some(1));
}

#[tokio::test]
async fn test_second_command_ignored_while_first_runs() {
    let engine = sample_engine();
    let mut app = loaded_app(engine.clone()).await;
    app.view.restore_selection(Some(4));

    app.activate(Focus::Stop);
    assert!(app.command_in_flight());
    app.activate(Focus::RestartStart);
    assert_eq!(app.status, "Another command is still running");

    app.settle().await;
    assert_eq!(
        engine.lifecycle_calls(),
        vec![MockCall::Stop { id: "w1".into() }]
    );
}

#[tokio::test]
async fn test_command_without_selection_is_noop() {
    let engine = Arc::new(MockEngine::new());
    let mut app = loaded_app(engine.clone()).await;

    app.activate(Focus::RestartStart);
    app.activate(Focus::Stop);

    assert!(!app.is_busy());
    assert!(engine.lifecycle_calls().is_empty());
    assert_eq!(app.status, "Loaded 0 containers in 0 projects");
}

// ==================== Shutdown ====================

#[tokio::test]
async fn test_shutdown_aborts_outstanding_work() {
    let engine = sample_engine();
    let _gate = engine.hold_list();
    let mut app = App::new_for_testing(engine.clone());

    app.request_refresh(RefreshTrigger::User);
    tokio::task::yield_now().await;
    app.shutdown();
    drop(app);

    // Only the test's own handle remains once the aborted task is gone
    for _ in 0..100 {
        if Arc::strong_count(&engine) == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(Arc::strong_count(&engine), 1);
}
