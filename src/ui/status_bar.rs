use crate::app::{App, StatusMessage};
use docshell::display::get_memory_class;
use ratatui::{prelude::*, widgets::Paragraph};

/// Draw the status bar at the bottom of the screen
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.statusbar_fg)
        .bg(app.theme.statusbar_bg);

    let (message, message_style) = match &app.message {
        Some(StatusMessage::Info(text)) => (text.as_str(), style),
        Some(StatusMessage::Error(text)) => (text.as_str(), style.fg(app.theme.error)),
        None => ("", style),
    };

    let mode = if app.shell.is_editing_enabled() {
        "EDIT"
    } else {
        "VIEW"
    };
    let memory_mb = get_memory_class(&app.memory) / (1024 * 1024);
    let right_status = format!(
        " queue: {} | mem: {}MB | {} ",
        app.shell.dispatcher().pending(),
        memory_mb,
        mode
    );

    let left = Line::from(vec![
        Span::styled(format!(" {} ", app.spinner.glyph()), style.fg(app.theme.spinner)),
        Span::styled(message.to_string(), message_style),
    ]);
    let right = Span::styled(right_status, style);
    let gap = padding(area.width, &left, &right);

    let mut spans = left.spans;
    spans.push(Span::styled(" ".repeat(gap as usize), style));
    spans.push(right);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
}

/// Blank columns between the left and right halves, measured in display width
fn padding(width: u16, left: &Line, right: &Span) -> u16 {
    let used = left.width().saturating_add(right.width());
    width.saturating_sub(u16::try_from(used).unwrap_or(u16::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_uses_display_width() {
        let left = Line::from(vec![Span::raw(" ⠋ "), Span::raw("日本.odt")]);
        let right = Span::raw(" VIEW ");
        // spinner 3 + message 8 + right 6
        assert_eq!(padding(40, &left, &right), 40 - 17);
        assert!(" ⠋ 日本.odt".len() > 11);
    }

    #[test]
    fn test_padding_saturates() {
        let left = Line::from("a very long status message");
        let right = Span::raw(" queue: 0 ");
        assert_eq!(padding(10, &left, &right), 0);
    }
}
