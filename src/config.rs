//! Configuration file loading.
//!
//! Both tools read the same optional TOML file. CLI flags take precedence over
//! anything set here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV_VAR: &str = "PROFILE_KIT_CONFIG";

/// Config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "profile-kit.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Content validator settings.
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Banner annotator settings.
    #[serde(default)]
    pub banner: BannerConfig,
}

/// Content validator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Path of the content document.
    pub content_path: PathBuf,
    /// Feed probe timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with feed probes.
    pub user_agent: String,
    /// Skip feed probes entirely.
    pub skip_feeds: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("content.json"),
            timeout_secs: 5,
            user_agent: "profile-kit-validator/1.0".to_string(),
            skip_feeds: false,
        }
    }
}

impl ValidatorConfig {
    /// Feed probe timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Banner annotator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Vector source rasterized when `png` is absent.
    pub svg: PathBuf,
    /// Raster source that gets annotated.
    pub png: PathBuf,
    /// Annotated output.
    pub output: PathBuf,
    /// Caption drawn on the banner.
    pub caption: String,
    /// TrueType font used for the caption.
    pub font: PathBuf,
    /// Font size in pixels.
    pub font_size: f32,
    /// Rasterized width in pixels.
    pub width: u32,
    /// Rasterized height in pixels.
    pub height: u32,
    /// Density passed to ImageMagick when rasterizing.
    pub density: u32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            svg: PathBuf::from("img/banner-combined.svg"),
            png: PathBuf::from("img/banner-final.png"),
            output: PathBuf::from("img/banner-final-text.png"),
            caption: "Open to engineering leadership — Austin / Remote".to_string(),
            font: PathBuf::from("/Library/Fonts/Arial.ttf"),
            font_size: 26.0,
            width: 1584,
            height: 396,
            density: 300,
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `PROFILE_KIT_CONFIG` environment variable
/// 3. `profile-kit.toml` in the working directory
#[must_use]
pub fn discover_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(p);
    }

    PathBuf::from(DEFAULT_CONFIG_FILE)
}
