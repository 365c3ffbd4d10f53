//! Production render backend: `image` crate buffers + libwebp encoding.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Composite | `image::RgbaImage::from_raw` over the layer's own pixels |
//! | Resize | `image::imageops::resize` with `Lanczos3` |
//! | Encode → WebP | `webp::Encoder::encode_simple` (lossy, quality 1-100) |
//!
//! The `image` crate's `"webp"` feature only covers decoding and lossless
//! encoding, so lossy encoding goes through the `webp` crate instead.

use super::backend::{BackendError, Dimensions, RenderBackend};
use super::calculations::scaled_dimensions;
use super::params::{Quality, RenderParams};
use crate::document::Layer;
use image::RgbaImage;
use image::imageops::FilterType;
use std::path::Path;

/// Lossy WebP backend over the layer's in-memory RGBA content.
#[derive(Default)]
pub struct WebpBackend;

impl WebpBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Build a standalone RGBA image from the layer's own pixel content.
fn composite_layer(layer: &Layer) -> Result<RgbaImage, BackendError> {
    RgbaImage::from_raw(layer.width, layer.height, layer.pixels.clone()).ok_or_else(|| {
        BackendError::InvalidBuffer(format!(
            "layer '{}' has {} bytes for {}x{} RGBA",
            layer.name,
            layer.pixels.len(),
            layer.width,
            layer.height
        ))
    })
}

/// Encode and write as lossy WebP at the given quality.
fn save_webp(img: &RgbaImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let encoder = webp::Encoder::from_rgba(img.as_raw(), img.width(), img.height());
    let encoded = encoder
        .encode_simple(false, quality.value() as f32)
        .map_err(|e| BackendError::EncodingFailed(format!("WebP encode failed: {e:?}")))?;
    std::fs::write(path, &*encoded).map_err(BackendError::Io)
}

impl RenderBackend for WebpBackend {
    fn render(&self, layer: &Layer, params: &RenderParams) -> Result<Dimensions, BackendError> {
        let img = composite_layer(layer)?;
        let img = if params.scale < 1.0 {
            let (width, height) = scaled_dimensions(layer.width, layer.height, params.scale);
            image::imageops::resize(&img, width, height, FilterType::Lanczos3)
        } else {
            img
        };
        save_webp(&img, &params.output, params.quality)?;
        Ok(Dimensions {
            width: img.width(),
            height: img.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::layer_with_pixels;

    fn render(layer: &Layer, output: &Path, scale: f64) -> Result<Dimensions, BackendError> {
        WebpBackend::new().render(
            layer,
            &RenderParams {
                output: output.to_path_buf(),
                scale,
                quality: Quality::new(85),
            },
        )
    }

    #[test]
    fn renders_layer_at_full_scale() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("layer.webp");
        let layer = layer_with_pixels("Argentina", 0, 0, 64, 48);

        let dims = render(&layer, &output, 1.0).unwrap();

        assert_eq!(dims, Dimensions { width: 64, height: 48 });
        assert!(std::fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn written_file_matches_returned_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("layer.webp");
        let layer = layer_with_pixels("Brasilien", 0, 0, 80, 40);

        let dims = render(&layer, &output, 0.5).unwrap();
        assert_eq!(dims, Dimensions { width: 40, height: 20 });

        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.width(), dims.width);
        assert_eq!(decoded.height(), dims.height);
    }

    #[test]
    fn downscale_rounds_with_one_pixel_floor() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("sliver.webp");
        let layer = layer_with_pixels("Sliver", 0, 0, 2, 600);

        let dims = render(&layer, &output, 0.1).unwrap();
        assert_eq!(dims, Dimensions { width: 1, height: 60 });
    }

    #[test]
    fn mismatched_pixel_buffer_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("bad.webp");
        let mut layer = layer_with_pixels("Bad", 0, 0, 10, 10);
        layer.pixels.truncate(7);

        let result = render(&layer, &output, 1.0);
        assert!(matches!(result, Err(BackendError::InvalidBuffer(_))));
        assert!(!output.exists());
    }

    #[test]
    fn unwritable_output_path_errors() {
        let layer = layer_with_pixels("Ok", 0, 0, 8, 8);
        let result = render(&layer, Path::new("/nonexistent/dir/out.webp"), 1.0);
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
