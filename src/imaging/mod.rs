//! Layer rendering — pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Composite** | `image::RgbaImage` from the layer's own pixels |
//! | **Resize** | `image::imageops::resize` with `Lanczos3` filter |
//! | **Encode → WebP** | `webp::Encoder` (lossy, fixed quality) |
//!
//! The module is split into:
//! - **Calculations**: pure functions for scale math (unit testable)
//! - **Parameters**: data structures describing a render
//! - **Backend**: [`RenderBackend`] trait + [`WebpBackend`]

pub mod backend;
pub mod calculations;
mod params;
pub mod webp_backend;

pub use backend::{BackendError, Dimensions, RenderBackend};
pub use calculations::{scale_factor, scaled_dimensions, scaled_point};
pub use params::{Quality, RenderParams};
pub use webp_backend::WebpBackend;
