//! Display density and memory budget queries.

use crate::config::{EditingConfig, MemoryConfig};
use crate::poster::UiContext;

/// DPI reported for spreadsheets regardless of the screen
pub const SPREADSHEET_DPI: f32 = 96.0;

/// DPI corresponding to a density factor of 1.0
pub const BASELINE_DPI: f32 = 160.0;

/// Display metrics as reported by the OS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Logical density factor
    pub density: f32,
}

impl DisplayMetrics {
    pub fn new(density: f32) -> Self {
        Self { density }
    }
}

/// OS service reporting the per-application memory class
pub trait MemoryService {
    /// Memory class in megabytes
    fn memory_class(&self) -> u32;
}

/// Memory service answering with a fixed memory class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticMemoryService(pub u32);

impl From<&MemoryConfig> for StaticMemoryService {
    fn from(config: &MemoryConfig) -> Self {
        Self(config.memory_class_mb)
    }
}

impl MemoryService for StaticMemoryService {
    fn memory_class(&self) -> u32 {
        self.0
    }
}

/// Rendering DPI for the current document
pub fn get_dpi(ctx: &impl UiContext, metrics: &DisplayMetrics) -> f32 {
    if ctx.is_spreadsheet() {
        return SPREADSHEET_DPI;
    }
    metrics.density * BASELINE_DPI
}

/// Memory budget in bytes
pub fn get_memory_class(service: &impl MemoryService) -> u64 {
    u64::from(service.memory_class()) * 1024 * 1024
}

/// Whether editing input is forwarded to the engine
pub fn is_editing_enabled(config: &EditingConfig) -> bool {
    config.experimental
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::tests::RecordingContext;

    #[test]
    fn test_dpi_from_density() {
        let ctx = RecordingContext::default();
        assert_eq!(get_dpi(&ctx, &DisplayMetrics::new(1.0)), 160.0);
        assert_eq!(get_dpi(&ctx, &DisplayMetrics::new(2.75)), 440.0);
    }

    #[test]
    fn test_dpi_fixed_for_spreadsheets() {
        let ctx = RecordingContext {
            spreadsheet: true,
            ..Default::default()
        };
        assert_eq!(get_dpi(&ctx, &DisplayMetrics::new(3.0)), SPREADSHEET_DPI);
    }

    #[test]
    fn test_memory_class_in_bytes() {
        assert_eq!(get_memory_class(&StaticMemoryService(256)), 268_435_456);
        assert_eq!(get_memory_class(&StaticMemoryService(0)), 0);
        // Would overflow a 32-bit result
        assert_eq!(
            get_memory_class(&StaticMemoryService(4096)),
            4096 * 1024 * 1024
        );
    }

    #[test]
    fn test_memory_service_from_config() {
        let config = MemoryConfig {
            memory_class_mb: 192,
        };
        assert_eq!(StaticMemoryService::from(&config).memory_class(), 192);
    }

    #[test]
    fn test_editing_flag() {
        assert!(!is_editing_enabled(&EditingConfig::default()));
        assert!(is_editing_enabled(&EditingConfig { experimental: true }));
    }
}
