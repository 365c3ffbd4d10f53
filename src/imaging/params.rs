//! Parameter types for render operations.
//!
//! These structs describe *what* to render, not *how*. They are the
//! interface between the extractor (which decides which layers to export
//! where) and the backend (which does the pixel work), so a mock backend can
//! record them without touching pixels.

use std::path::PathBuf;

/// Quality setting for lossy WebP encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Full specification for rendering one layer to one output file.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub output: PathBuf,
    /// Uniform scale factor in (0, 1]. At 1.0 no resampling happens.
    pub scale: f64,
    pub quality: Quality,
}
