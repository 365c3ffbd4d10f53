//! Manifest types serialized to `config.json`.
//!
//! One manifest per document, consumed by the quiz game's loader. Field
//! names are camelCase on the wire. All dimensions and coordinates are in
//! the *scaled* space — the post-scaling integer values actually used to
//! render the images, so manifest and image files always agree.

use serde::{Deserialize, Serialize};

/// Placement metadata for one extracted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Document name (input file stem).
    pub name: String,
    /// Canvas width after scaling.
    pub canvas_width: u32,
    /// Canvas height after scaling.
    pub canvas_height: u32,
    /// Rendered base map width; absent when no map layer was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_width: Option<u32>,
    /// Rendered base map height; absent when no map layer was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_height: Option<u32>,
    /// Base map position on the scaled canvas; absent when no map layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_offset: Option<MapOffset>,
    /// Region entries in layer encounter order.
    pub countries: Vec<RegionEntry>,
}

/// Base map position on the scaled canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapOffset {
    pub left: i32,
    pub top: i32,
}

/// One selectable region: display name, image path, and placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionEntry {
    /// Display name shown in the game (original layer name, trimmed).
    pub name: String,
    /// Output path relative to the document's asset folder.
    pub file: String,
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}
