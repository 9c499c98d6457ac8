use crossterm::event::KeyEvent;
use docshell::event::{HandleType, TouchType};

/// Direction of a viewport pan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Viewer-level commands produced from raw terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommand {
    // App control
    Quit,

    // Document lifecycle
    NewDocument,
    ExportPdf,
    Reload,
    CloseDocument,

    // Parts
    NextPart,
    PreviousPart,
    GoToPart(u8),
    Thumbnail,

    // Viewport
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
    ZoomReset,
    Refresh,

    NavigationClick,

    // Pointer, in terminal cells
    Touch { touch_type: TouchType, col: u16, row: u16 },
    MoveHandle { handle: HandleType, col: u16, row: u16 },

    /// Text input forwarded to the engine when editing is enabled
    ForwardKey(KeyEvent),
}
