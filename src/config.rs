//! Application configuration
//!
//! Settings are read from an optional JSON file and then overridden by
//! command-line flags. Every field has a default, so an empty `{}` file is a
//! valid configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::carousel::{CarouselConfig, DEFAULT_DRAG_THRESHOLD_PX, DEFAULT_SNAP_DURATION};

/// Default number of pixels one terminal column stands for
pub const DEFAULT_CELL_WIDTH_PX: f32 = 8.0;

/// Runtime configuration for the quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `questions.json` and `products.json`
    pub data_dir: PathBuf,
    /// Directory for the data cache; in-memory cache when unset
    pub cache_dir: Option<PathBuf>,
    /// Consult and populate the cache
    pub use_cache: bool,
    /// Drag distance that commits a slide change
    pub drag_threshold_px: f32,
    /// Snap animation length
    pub snap_duration_ms: u64,
    /// Pixel width of one terminal column
    pub cell_width_px: f32,
    /// Log file for the interactive UI
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cache_dir: None,
            use_cache: true,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            snap_duration_ms: DEFAULT_SNAP_DURATION.as_millis() as u64,
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            anyhow::bail!("Data directory must be specified");
        }
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px > 0.0) {
            anyhow::bail!("Drag threshold must be a positive number of pixels");
        }
        if self.snap_duration_ms == 0 {
            anyhow::bail!("Snap duration must be at least 1 ms");
        }
        if !(self.cell_width_px.is_finite() && self.cell_width_px > 0.0) {
            anyhow::bail!("Cell width must be a positive number of pixels");
        }
        Ok(())
    }

    /// Gesture settings for the carousel
    pub fn carousel(&self) -> CarouselConfig {
        CarouselConfig {
            drag_threshold_px: self.drag_threshold_px,
            snap_duration: Duration::from_millis(self.snap_duration_ms),
        }
    }
}
