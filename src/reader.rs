//! Document opening.
//!
//! [`DocumentReader`] is the seam between batch logic and the PSD container
//! format: the batch loop and the extractor only ever see the in-memory
//! [`Document`] model, so they are tested with synthetic documents instead
//! of binary fixtures.
//!
//! [`PsdReader`] is the production implementation over the `psd` crate. Two
//! format details are absorbed here:
//!
//! - the crate returns each layer's RGBA buffer sized to the whole document
//!   canvas; we crop it to the layer's own bounding box, since the renderer
//!   composites layers standalone;
//! - groups arrive as a flat id→group table with parent links; we rebuild
//!   the nesting so the extractor's depth-first flatten sees the document's
//!   own layer order.

use crate::document::{Document, Layer, LayerNode};
use psd::Psd;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
}

/// Trait for opening a design document from disk.
pub trait DocumentReader {
    fn open(&self, path: &Path) -> Result<Document, ReadError>;
}

/// Production reader for Photoshop PSD files.
#[derive(Default)]
pub struct PsdReader;

impl PsdReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for PsdReader {
    fn open(&self, path: &Path) -> Result<Document, ReadError> {
        let bytes = std::fs::read(path)?;
        let psd = Psd::from_bytes(&bytes).map_err(|e| ReadError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Document {
            name,
            width: psd.width(),
            height: psd.height(),
            layers: build_layer_tree(&psd),
        })
    }
}

// ---------------------------------------------------------------------------
// Tree reconstruction
// ---------------------------------------------------------------------------

/// A group being assembled, children in encounter order.
struct GroupSlot {
    name: String,
    children: Vec<Slot>,
}

enum Slot {
    Leaf(Layer),
    Group(usize),
}

/// Rebuild the nested layer tree from the crate's flat layer list and
/// id→group table. Each group node is created at the position of its first
/// descendant, so a depth-first flatten reproduces the file's layer order.
fn build_layer_tree(psd: &Psd) -> Vec<LayerNode> {
    let mut root: Vec<Slot> = Vec::new();
    let mut arena: Vec<GroupSlot> = Vec::new();
    let mut slot_by_group_id: HashMap<u32, usize> = HashMap::new();

    for psd_layer in psd.layers() {
        // Parent chain, outermost group first.
        let mut chain = Vec::new();
        let mut group_id = psd_layer.parent_id();
        while let Some(id) = group_id {
            chain.push(id);
            group_id = psd.groups().get(&id).and_then(|g| g.parent_id());
        }
        chain.reverse();

        let mut parent: Option<usize> = None;
        for id in chain {
            let slot = match slot_by_group_id.get(&id) {
                Some(&slot) => slot,
                None => {
                    let group_name = psd
                        .groups()
                        .get(&id)
                        .map(|g| g.name().to_string())
                        .unwrap_or_default();
                    let slot = arena.len();
                    arena.push(GroupSlot {
                        name: group_name,
                        children: Vec::new(),
                    });
                    push_slot(&mut root, &mut arena, parent, Slot::Group(slot));
                    slot_by_group_id.insert(id, slot);
                    slot
                }
            };
            parent = Some(slot);
        }

        let layer = convert_layer(psd, psd_layer);
        push_slot(&mut root, &mut arena, parent, Slot::Leaf(layer));
    }

    build_nodes(root, &mut arena)
}

fn push_slot(root: &mut Vec<Slot>, arena: &mut [GroupSlot], parent: Option<usize>, slot: Slot) {
    match parent {
        None => root.push(slot),
        Some(index) => arena[index].children.push(slot),
    }
}

fn build_nodes(slots: Vec<Slot>, arena: &mut Vec<GroupSlot>) -> Vec<LayerNode> {
    slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Leaf(layer) => LayerNode::Layer(layer),
            Slot::Group(index) => {
                let name = std::mem::take(&mut arena[index].name);
                let children = std::mem::take(&mut arena[index].children);
                LayerNode::Group {
                    name,
                    children: build_nodes(children, arena),
                }
            }
        })
        .collect()
}

fn convert_layer(psd: &Psd, psd_layer: &psd::PsdLayer) -> Layer {
    let left = psd_layer.layer_left() as i32;
    let top = psd_layer.layer_top() as i32;
    let width = psd_layer.width() as u32;
    let height = psd_layer.height() as u32;
    let canvas = psd_layer.rgba();

    Layer {
        name: psd_layer.name().to_string(),
        left,
        top,
        width,
        height,
        pixels: crop_canvas_rgba(&canvas, psd.width(), psd.height(), left, top, width, height),
    }
}

/// Crop a document-canvas-sized RGBA buffer down to a layer's bounding box.
///
/// Rows or columns of the box outside the canvas stay transparent in the
/// output (layers may extend past the canvas edge).
fn crop_canvas_rgba(
    canvas: &[u8],
    canvas_width: u32,
    canvas_height: u32,
    left: i32,
    top: i32,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let mut out = vec![0u8; width as usize * height as usize * 4];

    let x0 = left.max(0);
    let x1 = (left + width as i32).min(canvas_width as i32);
    if x1 <= x0 {
        return out;
    }
    let row_bytes = (x1 - x0) as usize * 4;

    for row in 0..height as i32 {
        let src_y = top + row;
        if src_y < 0 || src_y >= canvas_height as i32 {
            continue;
        }
        let src_start = (src_y as usize * canvas_width as usize + x0 as usize) * 4;
        let dst_start = (row as usize * width as usize + (x0 - left) as usize) * 4;
        out[dst_start..dst_start + row_bytes]
            .copy_from_slice(&canvas[src_start..src_start + row_bytes]);
    }

    out
}
