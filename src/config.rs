//! User configuration: layout tuning and effect settings, persisted as JSON
//! in the OS config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.json";
/// Upper bound on decorative images loaded from `image_dir`.
const MAX_IMAGE_POOL: usize = 64;

/// How lively the entrance animation is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectTier {
    Subtle,
    #[default]
    Standard,
    Lively,
}

impl EffectTier {
    pub const ALL: [EffectTier; 3] = [EffectTier::Subtle, EffectTier::Standard, EffectTier::Lively];

    /// Per-frame entrance progress increment.
    pub fn entrance_speed(self) -> f32 {
        match self {
            Self::Subtle => 0.01,
            Self::Standard => 0.02,
            Self::Lively => 0.04,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Subtle => "Subtle",
            Self::Standard => "Standard",
            Self::Lively => "Lively",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Card width before responsive scaling.
    pub item_width: f32,
    /// Fixed pixels added to the scaled width to get the column stride.
    pub width_offset: f32,
    pub minimap_width: f32,
    pub minimap_margin: f32,
    pub minimap_height: f32,
    /// Scales card height on the Tamil (upper) track.
    pub tamil_track_height_factor: f32,
    /// Scales card height on the world (lower) track.
    pub world_track_height_factor: f32,
    pub effects: EffectTier,
    /// Fraction of the remaining distance covered per frame when scrolling.
    pub scroll_smoothing: f32,
    /// Distance in pixels at which smoothed scrolling snaps to its target.
    pub scroll_snap: f32,
    /// Directory holding the decorative card images.
    pub image_dir: Option<PathBuf>,
    pub image_pool_size: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            item_width: 200.0,
            width_offset: 2.0,
            minimap_width: 300.0,
            minimap_margin: 0.0,
            minimap_height: 75.0,
            tamil_track_height_factor: 1.0,
            world_track_height_factor: 1.0,
            effects: EffectTier::Standard,
            scroll_smoothing: 0.1,
            scroll_snap: 0.5,
            image_dir: None,
            image_pool_size: 5,
        }
    }
}

impl TimelineConfig {
    /// Default location, `None` when the platform has no config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "tamil-timeline", "Tamil Timeline")
            .map(|dirs| dirs.config_dir().join(FILENAME))
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Load from `path` (or the default location), falling back to defaults
    /// with a warning on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Self::default(),
        };
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Replace out-of-range tuning values with defaults.
    fn sanitized(mut self) -> Self {
        let d = Self::default();
        if !(self.item_width.is_finite() && self.item_width > 0.0) {
            self.item_width = d.item_width;
        }
        if !(self.width_offset.is_finite() && self.width_offset >= 0.0) {
            self.width_offset = d.width_offset;
        }
        if !(self.minimap_width.is_finite() && self.minimap_width > 0.0) {
            self.minimap_width = d.minimap_width;
        }
        if !(self.minimap_height.is_finite() && self.minimap_height > 0.0) {
            self.minimap_height = d.minimap_height;
        }
        // Both margins together must leave room for the indicator.
        if !(self.minimap_margin.is_finite()
            && self.minimap_margin >= 0.0
            && 2.0 * self.minimap_margin < self.minimap_width)
        {
            self.minimap_margin = d.minimap_margin;
        }
        if !(self.scroll_snap.is_finite() && self.scroll_snap >= 0.0) {
            self.scroll_snap = d.scroll_snap;
        }
        self.image_pool_size = self.image_pool_size.min(MAX_IMAGE_POOL);
        if !(self.scroll_smoothing > 0.0 && self.scroll_smoothing <= 1.0) {
            self.scroll_smoothing = d.scroll_smoothing;
        }
        for factor in [
            &mut self.tamil_track_height_factor,
            &mut self.world_track_height_factor,
        ] {
            if !(factor.is_finite() && *factor > 0.0) {
                *factor = 1.0;
            }
        }
        self
    }
}
