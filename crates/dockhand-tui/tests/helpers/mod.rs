use dockhand_engine::test_support::{record, MockEngine};
use dockhand_tui::App;
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;

/// Render the app to a TestBackend and capture output as a string
#[allow(dead_code)]
pub fn render_app(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| dockhand_tui::ui::draw(frame, app))
        .unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer_to_string(&buffer)
}

/// Convert a ratatui buffer to a string representation, one line per row
#[allow(dead_code)]
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        let mut line = String::new();
        for x in 0..buffer.area.width {
            line.push_str(buffer.get(x, y).symbol());
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

/// Mock engine serving two compose projects and a standalone container
#[allow(dead_code)]
pub fn sample_engine() -> Arc<MockEngine> {
    Arc::new(MockEngine::with_containers(vec![
        record("w1", "web", "running", Some("app"), Some("web")),
        record("d1", "db", "exited", Some("app"), Some("db")),
        record("m1", "metrics", "running", Some("monitoring"), Some("prom")),
        record("s1", "scratch", "created", None, None),
    ]))
}

/// App over `engine` with the first refresh already applied
#[allow(dead_code)]
pub async fn loaded_app(engine: Arc<MockEngine>) -> App {
    let mut app = App::new_for_testing(engine);
    app.request_refresh(dockhand_core::RefreshTrigger::User);
    app.settle().await;
    app
}
