//! Per-document extraction.
//!
//! Orchestrates one document through the pipeline: flatten and classify the
//! layer tree, fall back to map auto-detection, render the map, overlay, and
//! every region through the backend, and write the assembled `config.json`.
//!
//! ## Output Structure
//!
//! ```text
//! assets/europa/
//! ├── config.json                # Placement manifest
//! ├── map.webp                   # Base map (optional)
//! ├── overlay.webp               # Contour overlay (optional)
//! └── countries/
//!     ├── sverige.webp           # One WebP per region layer
//!     └── norge.webp
//! ```
//!
//! ## Error Policy
//!
//! Strictly sequential, no retries. Any render failure aborts the *whole
//! document* and propagates to the batch loop; files already written stay on
//! disk (no rollback). Missing map or overlay layers are warnings carried in
//! the outcome, not errors.

use crate::classify::{LayerRole, classify_name};
use crate::config::ExtractConfig;
use crate::detect::auto_detect_map;
use crate::document::{Document, Layer};
use crate::imaging::{
    BackendError, Dimensions, Quality, RenderBackend, RenderParams, scale_factor,
    scaled_dimensions, scaled_point,
};
use crate::manifest::{Manifest, MapOffset, RegionEntry};
use crate::naming::safe_stem;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rendering layer '{layer}' failed: {source}")]
    Render {
        layer: String,
        #[source]
        source: BackendError,
    },
}

/// Classified leaves of a document, references in encounter order.
///
/// When several leaves share the map (or overlay) name, the last one wins;
/// a layer is only ever attributed to one role.
pub struct ClassifiedLayers<'a> {
    pub map: Option<&'a Layer>,
    pub overlay: Option<&'a Layer>,
    pub regions: Vec<&'a Layer>,
    pub skipped: Vec<&'a Layer>,
}

/// Flatten a document's layer tree and classify every leaf.
pub fn classify_document<'a>(doc: &'a Document, config: &ExtractConfig) -> ClassifiedLayers<'a> {
    let mut classified = ClassifiedLayers {
        map: None,
        overlay: None,
        regions: Vec::new(),
        skipped: Vec::new(),
    };

    for layer in doc.leaves() {
        match classify_name(&layer.name, config) {
            LayerRole::Skip => classified.skipped.push(layer),
            LayerRole::Overlay => classified.overlay = Some(layer),
            LayerRole::Map => classified.map = Some(layer),
            LayerRole::Region => classified.regions.push(layer),
        }
    }

    classified
}

/// Everything the batch loop needs to report about one extracted document.
#[derive(Debug)]
pub struct ExtractOutcome {
    pub manifest: Manifest,
    /// Name of the region layer promoted to base map, when auto-detection
    /// kicked in.
    pub auto_map: Option<String>,
    /// No explicit or auto-detected map layer; document has no map.
    pub missing_map: bool,
    /// No overlay layer was found.
    pub missing_overlay: bool,
}

/// Extract one document into `output_dir`.
///
/// Renders map, overlay, and regions in that order, then writes
/// `config.json`. Manifest coordinates and dimensions are the post-scale
/// values returned by the backend, so they always agree with the files on
/// disk.
pub fn extract_document(
    backend: &impl RenderBackend,
    doc: &Document,
    output_dir: &Path,
    config: &ExtractConfig,
) -> Result<ExtractOutcome, ExtractError> {
    let scale = scale_factor(doc.width, doc.height, config.max_dimension);
    let quality = Quality::new(config.quality);

    fs::create_dir_all(output_dir.join("countries"))?;

    let mut classified = classify_document(doc, config);

    let mut auto_map = None;
    if classified.map.is_none()
        && let Some(index) = auto_detect_map(&classified.regions, doc.width, doc.height)
    {
        let promoted = classified.regions.remove(index);
        auto_map = Some(promoted.name.trim().to_string());
        classified.map = Some(promoted);
    }

    let (canvas_width, canvas_height) = scaled_dimensions(doc.width, doc.height, scale);
    let mut manifest = Manifest {
        name: doc.name.clone(),
        canvas_width,
        canvas_height,
        map_width: None,
        map_height: None,
        map_offset: None,
        countries: Vec::new(),
    };

    if let Some(map_layer) = classified.map {
        let dims = render_layer(backend, map_layer, output_dir.join("map.webp"), scale, quality)?;
        let (left, top) = scaled_point(map_layer.left, map_layer.top, scale);
        manifest.map_width = Some(dims.width);
        manifest.map_height = Some(dims.height);
        manifest.map_offset = Some(MapOffset { left, top });
    }

    if let Some(overlay_layer) = classified.overlay {
        render_layer(
            backend,
            overlay_layer,
            output_dir.join("overlay.webp"),
            scale,
            quality,
        )?;
    }

    for &layer in &classified.regions {
        let file = format!("countries/{}.webp", safe_stem(&layer.name));
        let dims = render_layer(backend, layer, output_dir.join(&file), scale, quality)?;
        let (left, top) = scaled_point(layer.left, layer.top, scale);
        manifest.countries.push(RegionEntry {
            name: layer.name.trim().to_string(),
            file,
            left,
            top,
            width: dims.width,
            height: dims.height,
        });
    }

    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(output_dir.join("config.json"), json)?;

    Ok(ExtractOutcome {
        missing_map: classified.map.is_none(),
        missing_overlay: classified.overlay.is_none(),
        auto_map,
        manifest,
    })
}

fn render_layer(
    backend: &impl RenderBackend,
    layer: &Layer,
    output: PathBuf,
    scale: f64,
    quality: Quality,
) -> Result<Dimensions, ExtractError> {
    backend
        .render(layer, &RenderParams { output, scale, quality })
        .map_err(|source| ExtractError::Render {
            layer: layer.name.trim().to_string(),
            source,
        })
}
