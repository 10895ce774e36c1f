//! UI rendering for the dashboard

mod containers;
mod header_footer;

use crate::app::{App, Focus};
use crate::view_model::{Selection, ViewEntry};
use dockhand_core::ContainerState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use containers::*;
use header_footer::*;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Projects and containers
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Buttons
        ])
        .split(frame.size());

    draw_header(frame, app, chunks[0]);
    draw_projects(frame, app, chunks[1]);
    draw_status(frame, app, chunks[2]);
    draw_buttons(frame, app, chunks[3]);
}

/// Colour for a container state glyph and text
fn state_color(state: ContainerState) -> Color {
    match state {
        ContainerState::Running => Color::Green,
        ContainerState::Paused => Color::Yellow,
        ContainerState::Restarting => Color::Cyan,
        ContainerState::Exited | ContainerState::Created => Color::DarkGray,
        ContainerState::Dead => Color::Red,
        ContainerState::Unknown => Color::Magenta,
    }
}
