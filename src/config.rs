//! Tool configuration module.
//!
//! Handles loading and validating `config.toml`. User files are sparse:
//! stock defaults form the base layer and the file's values are merged on
//! top, so a config only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [detection]
//! black_threshold = 30      # Channel value (0-255) at or below which a pixel reads as black
//!
//! [crop]
//! edge_slack = 2            # Detected trims this small (total px) are ignored as noise
//! jpeg_quality = 90         # Re-encode quality for JPEG outputs (1-100)
//!
//! [output]
//! suffix = "_corrected"     # Inserted before the extension of corrected copies
//! fallback_extension = "jpg" # Used when the source has no extension
//!
//! [library]
//! # dir = "/home/me/Pictures/Corrected"  # Copy corrected files here (omit to disable)
//! # album = "Borders"                    # Optional subdirectory inside the library
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixConfig {
    /// Border detection settings (black threshold).
    pub detection: DetectionConfig,
    /// Crop decision and re-encode settings.
    pub crop: CropConfig,
    /// Output naming settings.
    pub output: OutputConfig,
    /// Photo library settings (disabled unless a directory is set).
    pub library: LibraryConfig,
}

impl FixConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crop.jpeg_quality == 0 || self.crop.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "crop.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.output.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "output.suffix must not be empty".into(),
            ));
        }
        if self.output.fallback_extension.is_empty() || self.output.fallback_extension.contains('.')
        {
            return Err(ConfigError::Validation(
                "output.fallback_extension must be a bare extension like \"jpg\"".into(),
            ));
        }
        Ok(())
    }
}

/// Border detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Channel value (0-255 scale) at or below which a pixel channel reads
    /// as black. The tolerance absorbs lossy-compression noise around true
    /// black without misclassifying dark-but-real content.
    pub black_threshold: u8,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            black_threshold: crate::detect::DEFAULT_BLACK_THRESHOLD,
        }
    }
}

/// Crop decision and re-encode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Total detected trim (in pixels) at or below which the crop is
    /// skipped as scan noise.
    pub edge_slack: u32,
    /// Re-encode quality for JPEG outputs (1-100).
    pub jpeg_quality: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            edge_slack: 2,
            jpeg_quality: 90,
        }
    }
}

/// Output naming settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Inserted before the extension of corrected copies.
    pub suffix: String,
    /// Extension used when the source has none.
    pub fallback_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_corrected".to_string(),
            fallback_extension: "jpg".to_string(),
        }
    }
}

/// Photo library settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Library root directory. When absent, corrected files are not copied
    /// anywhere beyond the source directory.
    pub dir: Option<PathBuf>,
    /// Optional album (subdirectory) inside the library root.
    pub album: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FixConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FixConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FixConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<FixConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# unpillar Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# unpillar looks for config.toml in the directory given by --config-dir
# (the current directory by default). Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Border detection
# ---------------------------------------------------------------------------
[detection]
# Channel value (0-255) at or below which a pixel channel reads as black.
# Raise it for heavily compressed sources whose bars are not quite black;
# lower it if dark photographs are being mistaken for borders.
black_threshold = 30

# ---------------------------------------------------------------------------
# Crop decision and re-encoding
# ---------------------------------------------------------------------------
[crop]
# Detected trims this small (total pixels across both edges) are treated
# as scan noise and skipped.
edge_slack = 2

# Re-encode quality for JPEG outputs (1 = worst, 100 = best).
# Lossless formats (PNG, TIFF, WebP) ignore this.
jpeg_quality = 90

# ---------------------------------------------------------------------------
# Output naming
# ---------------------------------------------------------------------------
[output]
# Inserted before the extension: IMG_0042.jpg -> IMG_0042_corrected.jpg
suffix = "_corrected"

# Extension given to corrected copies of sources that have none.
fallback_extension = "jpg"

# ---------------------------------------------------------------------------
# Photo library
# ---------------------------------------------------------------------------
[library]
# When set, every corrected file is also copied into this directory.
# Omit (or comment out) to disable the copy entirely.
# dir = "/home/me/Pictures/Corrected"

# Optional subdirectory inside the library root.
# album = "Borders"
"##
}
