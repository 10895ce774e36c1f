use super::*;

pub(super) fn draw_projects(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Compose Projects ")
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::List {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if app.view.is_empty() {
        let empty = Paragraph::new("No containers found.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .view
        .entries()
        .iter()
        .map(|entry| {
            let style = match (entry, app.view.resolve(entry)) {
                (ViewEntry::Project { .. }, Some(Selection::Project(p))) => {
                    let color = if p.all_running() {
                        Color::Green
                    } else if p.any_running() {
                        Color::Yellow
                    } else {
                        Color::DarkGray
                    };
                    let style = Style::default().fg(color).bold();
                    if p.is_standalone() {
                        style.italic()
                    } else {
                        style
                    }
                }
                (_, Some(Selection::Container(c))) => Style::default().fg(state_color(c.state)),
                _ => Style::default(),
            };
            ListItem::new(entry.text().to_string()).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, app.view.list_state_mut());
}
