use super::{DocumentEngine, DocumentInfo, DocumentKind, Thumbnail};
use crate::error::EngineError;
use crate::event::{HandleType, ThumbnailTask, TileLayer, TouchType};
use crate::geometry::{PointF, RectF};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};

/// Largest thumbnail the engine will render, in pixels
pub const MAX_THUMBNAIL_PIXELS: usize = 4096 * 4096;

/// In-memory engine that records every request it receives.
///
/// It stands in for a native rendering engine: documents are never parsed,
/// only checked for existence and classified by extension.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    document: Option<DocumentInfo>,
    current_part: i32,
    parts_override: Option<i32>,
    pub viewport_size: Option<(u16, u16)>,
    pub invalidations: Vec<RectF>,
    pub reevaluations: Vec<TileLayer>,
    pub typed_text: String,
    pub touches: Vec<(TouchType, PointF)>,
    pub handle_positions: Vec<(HandleType, PointF)>,
    pub navigation_clicks: usize,
    pub saved: Vec<(PathBuf, String)>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `parts` parts for every document regardless of kind
    pub fn with_parts(mut self, parts: i32) -> Self {
        self.parts_override = Some(parts.max(1));
        self
    }

    fn parts_for(&self, kind: DocumentKind) -> i32 {
        self.parts_override.unwrap_or(match kind {
            DocumentKind::Text => 1,
            DocumentKind::Spreadsheet => 3,
            DocumentKind::Presentation => 5,
            DocumentKind::Drawing => 2,
        })
    }

    fn open(&mut self, path: &Path, kind: DocumentKind) -> DocumentInfo {
        let info = DocumentInfo {
            path: path.to_path_buf(),
            kind,
            parts: self.parts_for(kind),
        };
        log::info!(
            "opened {} ({}, {} parts)",
            path.display(),
            kind.display_name(),
            info.parts
        );
        self.document = Some(info.clone());
        self.current_part = 0;
        self.typed_text.clear();
        info
    }

    fn require_document(&self) -> Result<&DocumentInfo, EngineError> {
        self.document.as_ref().ok_or(EngineError::NoDocument)
    }

    fn check_part(&self, part: i32) -> Result<(), EngineError> {
        let parts = self.require_document()?.parts;
        if part < 0 || part >= parts {
            return Err(EngineError::PartOutOfRange { part, parts });
        }
        Ok(())
    }
}

impl DocumentEngine for MemoryEngine {
    fn load(&mut self, path: &Path) -> Result<DocumentInfo, EngineError> {
        if !path.exists() {
            return Err(EngineError::NotFound(path.to_path_buf()));
        }
        let kind = DocumentKind::from_path(path).ok_or_else(|| {
            EngineError::UnsupportedFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })?;
        Ok(self.open(path, kind))
    }

    fn load_new(&mut self, path: &Path, document_type: &str) -> Result<DocumentInfo, EngineError> {
        let kind = DocumentKind::from_type_name(document_type)
            .ok_or_else(|| EngineError::UnsupportedFormat(document_type.to_string()))?;
        Ok(self.open(path, kind))
    }

    fn save_as(&mut self, path: &Path, format: &str) -> Result<(), EngineError> {
        self.require_document()?;
        if format.is_empty() {
            return Err(EngineError::UnsupportedFormat(String::new()));
        }
        self.saved.push((path.to_path_buf(), format.to_string()));
        Ok(())
    }

    fn close(&mut self) {
        if let Some(doc) = self.document.take() {
            log::info!("closed {}", doc.path.display());
        }
        self.current_part = 0;
    }

    fn document(&self) -> Option<&DocumentInfo> {
        self.document.as_ref()
    }

    fn current_part(&self) -> i32 {
        self.current_part
    }

    fn change_part(&mut self, part: i32) -> Result<(), EngineError> {
        self.check_part(part)?;
        self.current_part = part;
        Ok(())
    }

    fn touch(&mut self, touch_type: TouchType, point: PointF) -> Result<(), EngineError> {
        self.require_document()?;
        self.touches.push((touch_type, point));
        Ok(())
    }

    fn key(&mut self, key: KeyEvent) -> Result<(), EngineError> {
        self.require_document()?;
        match key.code {
            KeyCode::Char(c) => self.typed_text.push(c),
            KeyCode::Enter => self.typed_text.push('\n'),
            KeyCode::Tab => self.typed_text.push('\t'),
            KeyCode::Backspace => {
                self.typed_text.pop();
            }
            _ => {}
        }
        Ok(())
    }

    fn size_changed(&mut self, width: u16, height: u16) {
        self.viewport_size = Some((width, height));
    }

    fn reevaluate_tiles(&mut self, layer: TileLayer) {
        self.reevaluations.push(layer);
    }

    fn invalidate_tiles(&mut self, rect: RectF) {
        self.invalidations.push(rect);
    }

    fn set_handle_position(&mut self, handle: HandleType, point: PointF) -> Result<(), EngineError> {
        self.require_document()?;
        self.handle_positions.push((handle, point));
        Ok(())
    }

    fn render_thumbnail(&mut self, task: &ThumbnailTask) -> Result<Thumbnail, EngineError> {
        self.check_part(task.part)?;
        // One flat shade per part so thumbnails are distinguishable
        let shade = 255u8.saturating_sub((task.part as u8).wrapping_mul(40));
        let too_large = EngineError::ThumbnailTooLarge {
            width: task.width,
            height: task.height,
        };
        let len = (task.width as usize)
            .checked_mul(task.height as usize)
            .filter(|&len| len <= MAX_THUMBNAIL_PIXELS)
            .ok_or(too_large)?;
        let mut pixels = Vec::with_capacity(len * 4);
        for _ in 0..len {
            pixels.extend_from_slice(&[shade, shade, shade, 255]);
        }
        Ok(Thumbnail {
            part: task.part,
            width: task.width,
            height: task.height,
            pixels,
        })
    }

    fn navigation_click(&mut self) {
        self.navigation_clicks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn temp_doc(name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, b"content").unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_classifies_by_extension() {
        let (_dir, path) = temp_doc("budget.ods");
        let mut engine = MemoryEngine::new();

        let info = engine.load(&path).unwrap();
        assert_eq!(info.kind, DocumentKind::Spreadsheet);
        assert_eq!(info.parts, 3);
        assert_eq!(engine.document(), Some(&info));
    }

    #[test]
    fn test_load_missing_file() {
        let mut engine = MemoryEngine::new();
        let err = engine.load(Path::new("/definitely/not/here.odt")).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
        assert!(engine.document().is_none());
    }

    #[test]
    fn test_load_unsupported_extension() {
        let (_dir, path) = temp_doc("photo.png");
        let mut engine = MemoryEngine::new();
        let err = engine.load(&path).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedFormat(ext) if ext == "png"));
    }

    #[test]
    fn test_load_new_by_type_name() {
        let mut engine = MemoryEngine::new();
        let info = engine
            .load_new(Path::new("/tmp/untitled.odp"), "presentation")
            .unwrap();
        assert_eq!(info.kind, DocumentKind::Presentation);
        assert_eq!(info.parts, 5);

        assert!(engine.load_new(Path::new("x"), "database").is_err());
    }

    #[test]
    fn test_change_part_bounds() {
        let mut engine = MemoryEngine::new().with_parts(2);
        assert!(matches!(engine.change_part(0), Err(EngineError::NoDocument)));

        engine.load_new(Path::new("a.odt"), "text").unwrap();
        engine.change_part(1).unwrap();
        assert_eq!(engine.current_part(), 1);
        assert!(matches!(
            engine.change_part(2),
            Err(EngineError::PartOutOfRange { part: 2, parts: 2 })
        ));
        assert_eq!(engine.current_part(), 1);
    }

    #[test]
    fn test_key_editing() {
        let mut engine = MemoryEngine::new();
        engine.load_new(Path::new("a.odt"), "text").unwrap();
        for code in [
            KeyCode::Char('h'),
            KeyCode::Char('i'),
            KeyCode::Char('x'),
            KeyCode::Backspace,
            KeyCode::Enter,
        ] {
            engine.key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        }
        assert_eq!(engine.typed_text, "hi\n");
    }

    #[test]
    fn test_thumbnail_size() {
        let mut engine = MemoryEngine::new();
        engine.load_new(Path::new("a.ods"), "spreadsheet").unwrap();
        let thumb = engine
            .render_thumbnail(&ThumbnailTask {
                part: 2,
                width: 4,
                height: 3,
            })
            .unwrap();
        assert_eq!(thumb.pixels.len(), 4 * 3 * 4);
        assert_eq!(thumb.part, 2);
    }

    #[test]
    fn test_oversized_thumbnail_is_rejected() {
        let mut engine = MemoryEngine::new();
        engine.load_new(Path::new("a.odt"), "text").unwrap();
        for (width, height) in [(u32::MAX, u32::MAX), (4097, 4096)] {
            let err = engine
                .render_thumbnail(&ThumbnailTask {
                    part: 0,
                    width,
                    height,
                })
                .unwrap_err();
            assert!(matches!(
                err,
                EngineError::ThumbnailTooLarge { width: w, height: h } if w == width && h == height
            ));
        }
    }

    #[test]
    fn test_close_resets() {
        let mut engine = MemoryEngine::new();
        engine.load_new(Path::new("a.ods"), "spreadsheet").unwrap();
        engine.change_part(2).unwrap();
        engine.close();
        assert!(engine.document().is_none());
        assert_eq!(engine.current_part(), 0);
        assert!(engine.save_as(Path::new("a.pdf"), "pdf").is_err());
    }
}
