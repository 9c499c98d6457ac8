use super::{InputHandler, PanDirection, ViewerCommand};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use docshell::event::{HandleType, TouchType};

/// Maps a raw mouse event to a viewer command
pub fn map_mouse_event(
    handler: &mut InputHandler,
    event: MouseEvent,
    editing: bool,
) -> Option<ViewerCommand> {
    let col = event.column;
    let row = event.row;

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Double click selects, like a long press on a touch screen
            let touch_type = match handler.record_click(col, row) {
                1 => TouchType::SingleTap,
                _ => TouchType::LongPress,
            };
            Some(ViewerCommand::Touch {
                touch_type,
                col,
                row,
            })
        }
        MouseEventKind::Down(MouseButton::Right) => Some(ViewerCommand::Touch {
            touch_type: TouchType::LongPress,
            col,
            row,
        }),
        MouseEventKind::Drag(MouseButton::Left) if editing => Some(ViewerCommand::MoveHandle {
            handle: HandleType::End,
            col,
            row,
        }),
        MouseEventKind::Drag(MouseButton::Middle) if editing => Some(ViewerCommand::MoveHandle {
            handle: HandleType::Middle,
            col,
            row,
        }),
        MouseEventKind::ScrollUp => Some(ViewerCommand::Pan(PanDirection::Up)),
        MouseEventKind::ScrollDown => Some(ViewerCommand::Pan(PanDirection::Down)),
        MouseEventKind::ScrollLeft => Some(ViewerCommand::Pan(PanDirection::Left)),
        MouseEventKind::ScrollRight => Some(ViewerCommand::Pan(PanDirection::Right)),
        _ => None,
    }
}
