//! The document engine seam driven by the worker thread.

mod memory;

pub use memory::MemoryEngine;

use crate::error::EngineError;
use crate::event::{HandleType, ThumbnailTask, TileLayer, TouchType};
use crate::geometry::{PointF, RectF};
use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};

/// Broad document family, decides part semantics and DPI handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Text,
    Spreadsheet,
    Presentation,
    Drawing,
}

impl DocumentKind {
    /// Infer the kind from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "odt" | "ott" | "fodt" | "doc" | "docx" | "rtf" | "txt" => Some(DocumentKind::Text),
            "ods" | "ots" | "fods" | "xls" | "xlsx" | "csv" => Some(DocumentKind::Spreadsheet),
            "odp" | "otp" | "fodp" | "ppt" | "pptx" => Some(DocumentKind::Presentation),
            "odg" | "otg" | "fodg" | "vsd" => Some(DocumentKind::Drawing),
            _ => None,
        }
    }

    /// Map a new-document type name to a kind
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(DocumentKind::Text),
            "spreadsheet" => Some(DocumentKind::Spreadsheet),
            "presentation" => Some(DocumentKind::Presentation),
            "drawing" => Some(DocumentKind::Drawing),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Text => "Text",
            DocumentKind::Spreadsheet => "Spreadsheet",
            DocumentKind::Presentation => "Presentation",
            DocumentKind::Drawing => "Drawing",
        }
    }

    /// What a single part is called for this kind
    pub fn part_name(&self) -> &'static str {
        match self {
            DocumentKind::Text => "page",
            DocumentKind::Spreadsheet => "sheet",
            DocumentKind::Presentation => "slide",
            DocumentKind::Drawing => "page",
        }
    }
}

/// What the engine reports about a freshly loaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub parts: i32,
}

/// An RGBA thumbnail of one document part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub part: i32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Operations the worker thread applies to the document engine.
///
/// Every call happens on the worker thread, one at a time.
pub trait DocumentEngine: Send {
    fn load(&mut self, path: &Path) -> Result<DocumentInfo, EngineError>;

    /// Create a new document of `document_type` that will be stored at `path`
    fn load_new(&mut self, path: &Path, document_type: &str) -> Result<DocumentInfo, EngineError>;

    fn save_as(&mut self, path: &Path, format: &str) -> Result<(), EngineError>;

    fn close(&mut self);

    /// The loaded document, if any
    fn document(&self) -> Option<&DocumentInfo>;

    fn current_part(&self) -> i32;

    fn change_part(&mut self, part: i32) -> Result<(), EngineError>;

    fn touch(&mut self, touch_type: TouchType, point: PointF) -> Result<(), EngineError>;

    fn key(&mut self, key: KeyEvent) -> Result<(), EngineError>;

    fn size_changed(&mut self, width: u16, height: u16);

    fn reevaluate_tiles(&mut self, layer: TileLayer);

    fn invalidate_tiles(&mut self, rect: RectF);

    fn set_handle_position(&mut self, handle: HandleType, point: PointF) -> Result<(), EngineError>;

    fn render_thumbnail(&mut self, task: &ThumbnailTask) -> Result<Thumbnail, EngineError>;

    fn navigation_click(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            DocumentKind::from_path(Path::new("a/b/Budget.XLSX")),
            Some(DocumentKind::Spreadsheet)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("talk.odp")),
            Some(DocumentKind::Presentation)
        );
        assert_eq!(DocumentKind::from_path(Path::new("notes")), None);
        assert_eq!(DocumentKind::from_path(Path::new("image.png")), None);
    }

    #[test]
    fn test_kind_from_type_name() {
        assert_eq!(
            DocumentKind::from_type_name("drawing"),
            Some(DocumentKind::Drawing)
        );
        assert_eq!(DocumentKind::from_type_name("database"), None);
    }
}
