use std::path::PathBuf;

/// Failures reported by a document engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("no document is loaded")]
    NoDocument,

    #[error("part {part} out of range (document has {parts} parts)")]
    PartOutOfRange { part: i32, parts: i32 },

    #[error("thumbnail {width}x{height} is too large")]
    ThumbnailTooLarge { width: u32, height: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
