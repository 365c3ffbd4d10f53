//! In-memory layer tree model.
//!
//! A [`Document`] is the reader's output and the extractor's input: canvas
//! dimensions plus an ordered tree of named layers. Groups are containers
//! only — they are traversed, never rendered. The source format has no
//! cyclic references, so the tree is plain owned data.
//!
//! Positions are in canvas pixel space and may be negative or extend past
//! the canvas edge (layers are cropped to their own bounds, not the canvas).

/// One leaf layer: a named, positioned RGBA raster.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Display name as authored in the document, untrimmed.
    pub name: String,
    /// Left offset of the layer's bounding box in canvas pixels.
    pub left: i32,
    /// Top offset of the layer's bounding box in canvas pixels.
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel content, `width * height * 4` bytes, row-major.
    pub pixels: Vec<u8>,
}

impl Layer {
    /// Pixel area of the layer's bounding box.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A node in the layer tree: either a group container or a leaf layer.
#[derive(Debug, Clone)]
pub enum LayerNode {
    Group { name: String, children: Vec<LayerNode> },
    Layer(Layer),
}

/// A parsed design document: canvas dimensions and the ordered layer tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document name (input file stem).
    pub name: String,
    /// Canvas width in pixels, independent of any layer's size.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub layers: Vec<LayerNode>,
}

impl Document {
    /// Flatten the layer tree into leaf layers, depth-first, preserving
    /// encounter order. Group containers are traversed and dropped.
    pub fn leaves(&self) -> Vec<&Layer> {
        let mut leaves = Vec::new();
        collect_leaves(&self.layers, &mut leaves);
        leaves
    }
}

fn collect_leaves<'a>(nodes: &'a [LayerNode], out: &mut Vec<&'a Layer>) {
    for node in nodes {
        match node {
            LayerNode::Group { children, .. } => collect_leaves(children, out),
            LayerNode::Layer(layer) => out.push(layer),
        }
    }
}
