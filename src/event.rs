//! Events consumed by the engine worker thread.
//!
//! Every UI-origin signal becomes one [`LoEvent`]. Each variant carries exactly
//! the payload its kind needs and nothing else.

use crate::geometry::{PointF, RectF};
use crossterm::event::KeyEvent;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Kind of touch gesture reported by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchType {
    SingleTap,
    LongPress,
    GraphicSelectionStart,
    GraphicSelectionEnd,
}

impl TouchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TouchType::SingleTap => "SingleTap",
            TouchType::LongPress => "LongPress",
            TouchType::GraphicSelectionStart => "GraphicSelectionStart",
            TouchType::GraphicSelectionEnd => "GraphicSelectionEnd",
        }
    }
}

impl fmt::Display for TouchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a touch type name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown touch type: {0}")]
pub struct UnknownTouchType(pub String);

impl FromStr for TouchType {
    type Err = UnknownTouchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SingleTap" => Ok(TouchType::SingleTap),
            "LongPress" => Ok(TouchType::LongPress),
            "GraphicSelectionStart" => Ok(TouchType::GraphicSelectionStart),
            "GraphicSelectionEnd" => Ok(TouchType::GraphicSelectionEnd),
            other => Err(UnknownTouchType(other.to_string())),
        }
    }
}

/// Which selection handle is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleType {
    Start,
    Middle,
    End,
}

/// Tile layer that should re-evaluate which tiles it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileLayer {
    /// Tiles at the current zoom level, follows the viewport
    Dynamic,
    /// Low-resolution tiles covering the whole document
    FixedZoom,
}

/// Request to render a thumbnail of one document part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailTask {
    pub part: i32,
    pub width: u32,
    pub height: u32,
}

/// Event queued for the engine worker thread
#[derive(Debug, Clone, PartialEq)]
pub enum LoEvent {
    /// Open an existing document
    Load { path: PathBuf },
    /// Create a new document of the given type at `path`
    LoadNew { path: PathBuf, document_type: String },
    /// Export the current document
    SaveAs { path: PathBuf, format: String },
    /// Reopen a document and jump to a part
    Resume { path: PathBuf, part: i32 },
    Close,
    Touch { touch_type: TouchType, point: PointF },
    Key(KeyEvent),
    SizeChanged { width: u16, height: u16 },
    SwipeLeft,
    SwipeRight,
    ChangePart { part: i32 },
    Thumbnail(ThumbnailTask),
    TileReevaluation(TileLayer),
    TileInvalidation(RectF),
    ChangeHandlePosition { handle: HandleType, point: PointF },
    NavigationClick,
}

impl LoEvent {
    /// Short name of the event kind, used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            LoEvent::Load { .. } => "load",
            LoEvent::LoadNew { .. } => "load-new",
            LoEvent::SaveAs { .. } => "save-as",
            LoEvent::Resume { .. } => "resume",
            LoEvent::Close => "close",
            LoEvent::Touch { .. } => "touch",
            LoEvent::Key(_) => "key",
            LoEvent::SizeChanged { .. } => "size-changed",
            LoEvent::SwipeLeft => "swipe-left",
            LoEvent::SwipeRight => "swipe-right",
            LoEvent::ChangePart { .. } => "change-part",
            LoEvent::Thumbnail(_) => "thumbnail",
            LoEvent::TileReevaluation(_) => "tile-reevaluation",
            LoEvent::TileInvalidation(_) => "tile-invalidation",
            LoEvent::ChangeHandlePosition { .. } => "change-handle-position",
            LoEvent::NavigationClick => "navigation-click",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_type_names() {
        for touch in [
            TouchType::SingleTap,
            TouchType::LongPress,
            TouchType::GraphicSelectionStart,
            TouchType::GraphicSelectionEnd,
        ] {
            assert_eq!(touch.to_string().parse::<TouchType>(), Ok(touch));
        }
    }

    #[test]
    fn test_unknown_touch_type() {
        let err = "DoubleTap".parse::<TouchType>().unwrap_err();
        assert_eq!(err, UnknownTouchType("DoubleTap".to_string()));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(LoEvent::Close.name(), "close");
        assert_eq!(LoEvent::ChangePart { part: 2 }.name(), "change-part");
        assert_eq!(
            LoEvent::TileReevaluation(TileLayer::Dynamic).name(),
            "tile-reevaluation"
        );
    }
}
