//! Shared test utilities for the atlasgen test suite.
//!
//! Synthetic documents and layers for exercising classification, extraction,
//! and batch logic without PSD fixtures, plus a [`MockReader`] standing in
//! for the PSD reader in batch tests.

use crate::document::{Document, Layer, LayerNode};
use crate::reader::{DocumentReader, ReadError};
use std::collections::HashMap;
use std::path::Path;

/// A layer with a transparent (all-zero) pixel buffer of the right size.
pub fn layer(name: &str, left: i32, top: i32, width: u32, height: u32) -> Layer {
    Layer {
        name: name.to_string(),
        left,
        top,
        width,
        height,
        pixels: vec![0u8; width as usize * height as usize * 4],
    }
}

/// A layer filled with a deterministic opaque gradient, for tests that
/// actually encode pixels.
pub fn layer_with_pixels(name: &str, left: i32, top: i32, width: u32, height: u32) -> Layer {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
        }
    }
    Layer {
        name: name.to_string(),
        left,
        top,
        width,
        height,
        pixels,
    }
}

/// Leaf node wrapper around [`layer`].
pub fn leaf(name: &str, left: i32, top: i32, width: u32, height: u32) -> LayerNode {
    LayerNode::Layer(layer(name, left, top, width, height))
}

/// Group node with the given children.
pub fn group(name: &str, children: Vec<LayerNode>) -> LayerNode {
    LayerNode::Group {
        name: name.to_string(),
        children,
    }
}

/// Document with the given canvas and layer tree.
pub fn doc(name: &str, width: u32, height: u32, layers: Vec<LayerNode>) -> Document {
    Document {
        name: name.to_string(),
        width,
        height,
        layers,
    }
}

/// Reader serving pre-built documents keyed by file stem.
///
/// Opening a path whose stem has no document behaves like a corrupt input
/// (a parse error), which is exactly what batch failure tests want.
pub struct MockReader {
    documents: HashMap<String, Document>,
}

impl MockReader {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: documents.into_iter().map(|d| (d.name.clone(), d)).collect(),
        }
    }
}

impl DocumentReader for MockReader {
    fn open(&self, path: &Path) -> Result<Document, ReadError> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.documents
            .get(&stem)
            .cloned()
            .ok_or_else(|| ReadError::Parse {
                path: path.to_path_buf(),
                detail: "no such mock document".to_string(),
            })
    }
}
