//! Layer role classification.
//!
//! Every leaf layer gets exactly one role, decided by its display name
//! alone. Matching is an exact set-membership test on the trimmed,
//! lowercased name — no partial or fuzzy matching. Internal characters are
//! never touched, so "Bakgrund 2" is a region, not a background.

use crate::config::ExtractConfig;

/// The role a layer plays in the extracted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    /// Solid background fill; discarded.
    Skip,
    /// Contour-line overlay rendered on top of the map.
    Overlay,
    /// The base map image.
    Map,
    /// A selectable country/region, exported individually.
    Region,
}

impl LayerRole {
    /// Short lowercase label for console output.
    pub fn label(self) -> &'static str {
        match self {
            LayerRole::Skip => "skip",
            LayerRole::Overlay => "overlay",
            LayerRole::Map => "map",
            LayerRole::Region => "region",
        }
    }
}

/// Classify a layer by its display name.
///
/// Case and surrounding whitespace are ignored; the name must otherwise
/// match a configured set entry exactly. Anything unmatched is a region.
pub fn classify_name(name: &str, config: &ExtractConfig) -> LayerRole {
    let name = name.trim().to_lowercase();
    let matches = |set: &[String]| set.iter().any(|entry| entry.to_lowercase() == name);

    if matches(&config.skip_names) {
        LayerRole::Skip
    } else if matches(&config.overlay_names) {
        LayerRole::Overlay
    } else if matches(&config.map_names) {
        LayerRole::Map
    } else {
        LayerRole::Region
    }
}
