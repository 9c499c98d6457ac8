mod document_view;
mod status_bar;

use crate::app::App;
use ratatui::{prelude::*, widgets::Block};

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let base = Block::default().style(Style::default().bg(app.theme.bg).fg(app.theme.fg));
    frame.render_widget(base, area);

    // Main layout: document, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Document
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    document_view::draw(frame, app, chunks[0]);
    status_bar::draw(frame, app, chunks[1]);
}
