use super::{PanDirection, ViewerCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Maps keyboard events to viewer commands
pub fn map_key_event(key: KeyEvent, editing: bool) -> Option<ViewerCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        // Quit: Ctrl+Q
        KeyCode::Char('q') if ctrl => Some(ViewerCommand::Quit),

        // Document lifecycle
        KeyCode::Char('n') if ctrl => Some(ViewerCommand::NewDocument),
        KeyCode::Char('e') if ctrl => Some(ViewerCommand::ExportPdf),
        KeyCode::Char('r') if ctrl => Some(ViewerCommand::Reload),
        KeyCode::Char('w') if ctrl => Some(ViewerCommand::CloseDocument),

        // Parts
        KeyCode::PageDown => Some(ViewerCommand::NextPart),
        KeyCode::PageUp => Some(ViewerCommand::PreviousPart),
        KeyCode::Char(c @ '1'..='9') if alt => c
            .to_digit(10)
            .map(|d| ViewerCommand::GoToPart(d as u8)),
        KeyCode::Char('t') if ctrl => Some(ViewerCommand::Thumbnail),

        // Viewport
        KeyCode::Up => Some(ViewerCommand::Pan(PanDirection::Up)),
        KeyCode::Down => Some(ViewerCommand::Pan(PanDirection::Down)),
        KeyCode::Left => Some(ViewerCommand::Pan(PanDirection::Left)),
        KeyCode::Right => Some(ViewerCommand::Pan(PanDirection::Right)),
        KeyCode::Char('+') | KeyCode::Char('=') if ctrl => Some(ViewerCommand::ZoomIn),
        KeyCode::Char('-') if ctrl => Some(ViewerCommand::ZoomOut),
        KeyCode::Char('0') if ctrl => Some(ViewerCommand::ZoomReset),
        KeyCode::Char('l') if ctrl => Some(ViewerCommand::Refresh),

        KeyCode::Esc => Some(ViewerCommand::NavigationClick),

        // Plain text input goes to the document
        KeyCode::Char(_) | KeyCode::Enter | KeyCode::Backspace | KeyCode::Tab
            if editing && !ctrl && !alt =>
        {
            Some(ViewerCommand::ForwardKey(key))
        }

        _ => None,
    }
}
