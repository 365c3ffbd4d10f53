//! Base-map auto-detection.
//!
//! Designers usually name the base map layer "Karta", but older documents
//! don't. The fallback: if no layer classified as map, the largest
//! region-classified layer is promoted — provided it actually covers a big
//! share of the canvas. A 40% threshold separates "this is the map someone
//! forgot to name" from "this is just a large country".

use crate::document::Layer;

/// Fraction of canvas area a candidate must *strictly* exceed, as a ratio.
const PROMOTION_NUMERATOR: u64 = 2;
const PROMOTION_DENOMINATOR: u64 = 5;

/// Pick the region layer to promote to base map, if any.
///
/// Returns the index into `regions` of the layer with the largest pixel
/// area, but only when that area strictly exceeds 40% of the canvas area.
/// A candidate at exactly 40% is not promoted. Ties keep the first layer in
/// encounter order.
pub fn auto_detect_map(regions: &[&Layer], canvas_width: u32, canvas_height: u32) -> Option<usize> {
    let biggest = regions
        .iter()
        .enumerate()
        .max_by(|(ai, a), (bi, b)| a.area().cmp(&b.area()).then(bi.cmp(ai)))?;

    let canvas_area = u64::from(canvas_width) * u64::from(canvas_height);
    // area > 0.4 * canvas_area, in exact integer arithmetic
    let (index, layer) = biggest;
    if layer.area() * PROMOTION_DENOMINATOR > canvas_area * PROMOTION_NUMERATOR {
        Some(index)
    } else {
        None
    }
}
