use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shell configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub editing: EditingConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Logical density factor of the display (1.0 = 160 dpi)
    #[serde(default = "default_density")]
    pub density: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Per-application memory class in megabytes, as the OS reports it
    #[serde(default = "default_memory_class")]
    pub memory_class_mb: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditingConfig {
    /// Forward key input and selection handle moves to the engine
    #[serde(default)]
    pub experimental: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Pending-event count above which the dispatcher logs a warning
    #[serde(default = "default_warn_depth")]
    pub warn_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Zoom applied when a document is loaded or the part changes
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: f32,
    /// UI loop poll interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

// Default value helpers
fn default_density() -> f32 {
    2.0
}
fn default_memory_class() -> u32 {
    256
}
fn default_warn_depth() -> usize {
    1024
}
fn default_initial_zoom() -> f32 {
    1.0
}
fn default_tick_ms() -> u64 {
    16
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            memory_class_mb: default_memory_class(),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            warn_depth: default_warn_depth(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_zoom: default_initial_zoom(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed config {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("could not read config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("docshell").join("config.toml"))
    }

    /// Save configuration to the default config file location
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
