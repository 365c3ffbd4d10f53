//! # atlasgen
//!
//! Converts layered PSD design documents into optimized web assets for a
//! map-based geography quiz. Each document yields a base map image, an
//! optional contour overlay, one WebP per country/region layer, and a
//! `config.json` manifest recording where every region sits on the canvas.
//!
//! # Architecture: One Linear Pipeline
//!
//! There is deliberately no concurrency, no cache, and no retry policy —
//! throughput is bounded by a handful of large local files. Each document
//! flows through a single sequential pipeline:
//!
//! ```text
//! discover *.psd  →  open document  →  classify layers  →  render + scale
//!                 →  encode WebP    →  write config.json
//! ```
//!
//! A per-document failure is collected as a typed outcome and reported at the
//! end; it never stops the rest of the batch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`batch`] | Input discovery, placeholder filtering, the continue-on-failure batch loop |
//! | [`extract`] | Per-document orchestration: classify → render → assemble manifest |
//! | [`classify`] | Maps a layer name to its role (skip / overlay / map / region) |
//! | [`detect`] | Fallback heuristic that promotes the largest region layer to base map |
//! | [`document`] | In-memory layer tree model shared by reader and extractor |
//! | [`reader`] | `DocumentReader` trait + PSD implementation over the `psd` crate |
//! | [`imaging`] | Rendering backend: compositing, Lanczos3 scaling, lossy WebP encoding |
//! | [`manifest`] | Serialized `config.json` types |
//! | [`naming`] | Layer-name → filesystem-safe stem sanitizer |
//! | [`config`] | `atlasgen.toml` loading, validation, stock config generation |
//! | [`output`] | Console output formatting — pure `format_*` functions plus `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## WebP-Only Output
//!
//! All rendered layers are lossy WebP at a fixed quality. The game loads
//! dozens of region images per round, so file size dominates; WebP at
//! quality 85 keeps a full continent under a few megabytes while staying
//! universally decodable in browsers.
//!
//! ## Classification by Exact Name
//!
//! Layer roles come from exact, case-insensitive name matches against small
//! configured sets (`bg`/`background`/`bakgrund` skip, `overlay`, and
//! `karta`/`map`). Everything else is a region. No fuzzy matching: designers
//! name layers deliberately, and a typo showing up as an extra country in the
//! game is easier to spot than one silently swallowed by a heuristic.
//!
//! ## Injectable Seams
//!
//! Document opening ([`reader::DocumentReader`]) and pixel work
//! ([`imaging::RenderBackend`]) are traits with one production
//! implementation each. Extraction and batch logic are exercised in tests
//! through recording mocks, without PSD fixtures or actual encoding.
//!
//! ## Constants Are Configuration
//!
//! Max dimension, quality, the name sets, and the output-folder table live in
//! [`config::ExtractConfig`] with compiled-in defaults, not process-wide
//! statics. Tests run varied configurations deterministically, and an
//! optional `atlasgen.toml` overrides any of them.

pub mod batch;
pub mod classify;
pub mod config;
pub mod detect;
pub mod document;
pub mod extract;
pub mod imaging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod reader;

#[cfg(test)]
pub(crate) mod test_helpers;
