use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Draw the document pane and remember its inner area for mouse mapping
pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match &app.document {
        Some(doc) => format!(
            " {} ",
            doc.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| doc.path.display().to_string())
        ),
        None => " No document ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(title)
        .style(Style::default().bg(app.theme.page_bg).fg(app.theme.page_fg));

    let inner = block.inner(area);
    app.document_area = Some(inner);

    let label = Style::default().fg(app.theme.muted);
    let mut lines = Vec::new();

    match &app.document {
        Some(doc) => {
            lines.push(Line::from(vec![
                Span::styled("Kind      ", label),
                Span::raw(doc.kind.display_name()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Part      ", label),
                Span::raw(format!(
                    "{} {} of {}",
                    doc.kind.part_name(),
                    app.current_part + 1,
                    doc.parts
                )),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Open a document from the command line, or press Ctrl+N for a new one",
                label,
            )));
        }
    }

    let dpi = app.shell.get_dpi(&*app);
    lines.push(Line::from(vec![
        Span::styled("Viewport  ", label),
        Span::raw(format!(
            "{:.0},{:.0} @ {:.0}%  ({dpi:.0} dpi)",
            app.viewport.position.x,
            app.viewport.position.y,
            app.viewport.zoom * 100.0
        )),
    ]));

    if !app.thumbnails.is_empty() {
        let parts: Vec<String> = app
            .thumbnails
            .iter()
            .map(|t| format!("#{} {}x{}", t.part + 1, t.width, t.height))
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Thumbnails ", label),
            Span::raw(parts.join(", ")),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Sent to engine", label)));
    for entry in &app.recent {
        lines.push(Line::from(format!("  {entry}")));
    }

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(body, area);
}
