//! Render backend trait and shared types.
//!
//! The [`RenderBackend`] trait is the single seam between extraction logic
//! and pixel work. The production implementation is
//! [`WebpBackend`](super::webp_backend::WebpBackend); tests use the
//! recording [`MockBackend`](tests::MockBackend) so extraction can be
//! exercised without encoding a single pixel.

use super::params::RenderParams;
use crate::document::Layer;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
    #[error("Invalid layer pixel buffer: {0}")]
    InvalidBuffer(String),
}

/// Final pixel dimensions of a rendered layer, post-scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for layer render backends.
///
/// `render` composites a single layer's own pixel content (not its siblings)
/// into a standalone image, scales it down when `params.scale < 1`, encodes
/// it as lossy WebP, and writes it to `params.output`.
///
/// The returned [`Dimensions`] are the post-scale pixel dimensions and must
/// match what was written to disk — the manifest is built from them.
/// Failures propagate to the caller; the backend never retries.
pub trait RenderBackend {
    fn render(&self, layer: &Layer, params: &RenderParams) -> Result<Dimensions, BackendError>;
}
