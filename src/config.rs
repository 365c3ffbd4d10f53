//! Extraction configuration.
//!
//! All the knobs the pipeline reads — max canvas dimension, WebP quality,
//! the layer-name role sets, the document→folder table, the placeholder
//! size threshold — live in [`ExtractConfig`]. Defaults are compiled in; an
//! optional `atlasgen.toml` next to the inputs overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! max_dimension = 4000          # Longest canvas side before downscaling
//! quality = 85                  # WebP quality (1-100)
//! placeholder_threshold = 1024  # Files below this many bytes are skipped
//!
//! skip_names = ["bg", "background", "bakgrund"]
//! overlay_names = ["overlay"]
//! map_names = ["karta", "map"]
//!
//! [folders]
//! "Sydamerika 3" = "sydamerika"
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
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

/// Extraction settings loaded from `atlasgen.toml`.
///
/// All fields have defaults matching the shipped quiz assets. User config
/// files need only specify the values they want to override. Unknown keys
/// are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Max pixels on the longest canvas side; larger documents are scaled
    /// down uniformly so exports stay web-sized.
    pub max_dimension: u32,
    /// Lossy WebP encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Input files smaller than this many bytes are treated as unfetched
    /// remote-storage pointers and skipped with a warning.
    pub placeholder_threshold: u64,
    /// Layer names discarded outright (case-insensitive): solid background
    /// fills that must not become regions.
    pub skip_names: Vec<String>,
    /// Layer names recognized as the contour-line overlay (case-insensitive).
    pub overlay_names: Vec<String>,
    /// Layer names recognized as the base map (case-insensitive).
    pub map_names: Vec<String>,
    /// Document name → output folder overrides. Unlisted documents fall back
    /// to the sanitized document name.
    pub folders: BTreeMap<String, String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_dimension: 4000,
            quality: 85,
            placeholder_threshold: 1024,
            skip_names: strings(&["bg", "background", "bakgrund"]),
            overlay_names: strings(&["overlay"]),
            map_names: strings(&["karta", "map"]),
            folders: default_folders(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_folders() -> BTreeMap<String, String> {
    [
        ("Afrika", "afrika"),
        ("Asien", "asien"),
        ("Europa", "europa"),
        ("Nordamerika", "nordamerika"),
        ("Oceanien", "oceanien"),
        ("Sverige", "sverige"),
        ("USA", "usa"),
        ("Västindien", "vastindien"),
        ("Sydamerika 3", "sydamerika"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl ExtractConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if self.max_dimension == 0 {
            return Err(ConfigError::Validation(
                "max_dimension must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from the given `atlasgen.toml` path.
///
/// A missing file yields the compiled-in defaults. A present file is parsed
/// on top of the defaults, rejects unknown keys, and is validated.
pub fn load_config(path: &Path) -> Result<ExtractConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        ExtractConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `atlasgen.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# atlasgen configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Max pixels on the longest canvas side. Documents whose canvas exceeds this
# are scaled down uniformly (images and manifest coordinates alike) so the
# exports stay web-sized.
max_dimension = 4000

# Lossy WebP encoding quality (1 = worst, 100 = best).
# 80-90 is a good balance between quality and file size.
quality = 85

# Input files smaller than this many bytes are treated as unfetched
# remote-storage pointers (e.g. Git LFS) and skipped with a warning.
placeholder_threshold = 1024

# Layer names to discard outright (case-insensitive): solid background fills.
skip_names = ["bg", "background", "bakgrund"]

# Layer names recognized as the contour-line overlay (case-insensitive).
overlay_names = ["overlay"]

# Layer names recognized as the base map (case-insensitive).
map_names = ["karta", "map"]

# Document name -> output folder. Documents not listed here fall back to the
# sanitized document name.
[folders]
"Afrika" = "afrika"
"Asien" = "asien"
"Europa" = "europa"
"Nordamerika" = "nordamerika"
"Oceanien" = "oceanien"
"Sverige" = "sverige"
"USA" = "usa"
"Västindien" = "vastindien"
"Sydamerika 3" = "sydamerika"
"##
}
