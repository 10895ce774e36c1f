use super::*;

pub(super) fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let refreshed = app
        .last_refresh
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let line = Line::from(vec![
        Span::styled("Engine: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.engine_info.endpoint.clone()),
        Span::styled(
            format!(" (API {})", app.engine_info.api_version),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("  │  Last refresh: ", Style::default().fg(Color::DarkGray)),
        Span::raw(refreshed),
        Span::styled(
            format!("  │  {} containers", app.view.total_containers()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .title(" dockhand - Docker Compose Dashboard ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

pub(super) fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let failed = app.status.starts_with("Error")
        || app.status.starts_with("Failed")
        || app.status.starts_with("Auto-refresh error");
    let style = if failed {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    };

    frame.render_widget(Paragraph::new(app.status.as_str()).style(style), area);
}

pub(super) fn draw_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (i, button) in Focus::buttons().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if app.focus == *button {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[ {} ]", button.label()), style));
    }
    spans.push(Span::styled(
        "   r: Restart/Start  s: Stop  e: Exit  F5: Refresh  Tab: Focus",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
