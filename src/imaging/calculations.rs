//! Pure calculation functions for scaling.
//!
//! All functions here are pure and testable without any I/O or images.
//! Scaling is uniform per document: one factor applies to every exported
//! raster and to every coordinate reported in the manifest, so images and
//! manifest always agree.

/// Scale factor for a canvas: `min(1, max_dimension / longest_side)`.
///
/// Never upscales. A canvas whose longest side is already within
/// `max_dimension` gets exactly 1.0.
///
/// # Examples
/// ```
/// # use atlasgen::imaging::scale_factor;
/// assert_eq!(scale_factor(8000, 4000, 4000), 0.5);
/// assert_eq!(scale_factor(3000, 2000, 4000), 1.0);
/// ```
pub fn scale_factor(canvas_width: u32, canvas_height: u32, max_dimension: u32) -> f64 {
    let longest = canvas_width.max(canvas_height).max(1);
    (f64::from(max_dimension) / f64::from(longest)).min(1.0)
}

/// Apply a scale factor to pixel dimensions.
///
/// Each dimension is rounded to the nearest integer with a floor of 1 pixel,
/// matching what the backend actually renders. At scale 1.0 the input passes
/// through untouched.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    if scale >= 1.0 {
        return (width, height);
    }
    let scaled = |dim: u32| ((f64::from(dim) * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Apply a scale factor to a canvas-space position, rounding to the nearest
/// integer. Offsets can be negative (layers may start left of / above the
/// canvas origin).
pub fn scaled_point(left: i32, top: i32, scale: f64) -> (i32, i32) {
    let scaled = |coord: i32| (f64::from(coord) * scale).round() as i32;
    (scaled(left), scaled(top))
}
