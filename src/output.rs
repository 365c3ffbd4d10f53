//! Console output formatting for the batch pipeline.
//!
//! Each reportable entity has a `format_*` function returning lines and a
//! thin `print_*` wrapper that writes them to stdout. Format functions are
//! pure — no I/O, no side effects — so tests assert on the exact lines.
//!
//! ## Output Format
//!
//! ```text
//! ============================================================
//!   Sydamerika 3
//! ============================================================
//!   Map:      map.webp (auto-detected from 'Hela kartan')
//!   Overlay:  overlay.webp
//!   Regions:  12
//!   Written:  4.2 MB -> sydamerika/
//!
//! All done! (14.3s)
//!   Europa: 45 regions -> europa/
//!   Sydamerika 3: 12 regions -> sydamerika/
//!   1 document(s) failed
//! ```

use crate::batch::{BatchSummary, DocumentRun, Placeholder};
use crate::classify::LayerRole;
use crate::config::ExtractConfig;
use crate::document::Document;
use crate::extract::classify_document;

/// Banner line width, matching the per-document header rule.
const RULE: &str = "============================================================";

/// Human-readable file size: bytes up to 1 KB, then KB, then MB.
pub fn format_bytes(size: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let size_f = size as f64;
    if size < 1024 {
        format!("{size} B")
    } else if size_f < MB {
        format!("{:.1} KB", size_f / KB)
    } else {
        format!("{:.1} MB", size_f / MB)
    }
}

/// Per-document banner.
pub fn format_document_header(name: &str) -> Vec<String> {
    vec![RULE.to_string(), format!("  {name}"), RULE.to_string()]
}

/// Warnings for undersized inputs that look like unfetched LFS pointers.
pub fn format_placeholder_warnings(placeholders: &[Placeholder]) -> Vec<String> {
    if placeholders.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!(
        "Skipping {} remote-storage pointer(s):",
        placeholders.len()
    )];
    for placeholder in placeholders {
        lines.push(format!(
            "  - {} (only {} — not downloaded)",
            placeholder.path.display(),
            format_bytes(placeholder.size)
        ));
    }
    lines.push("If these should be real files, run: git lfs pull".to_string());
    lines
}

/// One classified layer line for `inspect`.
pub fn format_layer_line(role: LayerRole, name: &str, width: u32, height: u32) -> String {
    let tag = format!("[{}]", role.label().to_uppercase());
    format!("  {tag:10} '{name}' ({width}x{height})")
}

/// Classification view of a document, without rendering anything.
pub fn format_inspect_document(doc: &Document, config: &ExtractConfig) -> Vec<String> {
    let mut lines = format_document_header(&doc.name);
    lines.push(format!("  Canvas: {} x {}", doc.width, doc.height));

    for layer in doc.leaves() {
        lines.push(format_layer_line(
            crate::classify::classify_name(&layer.name, config),
            &layer.name,
            layer.width,
            layer.height,
        ));
    }

    let classified = classify_document(doc, config);
    if classified.map.is_none() {
        lines.push("  WARNING: no explicit map layer (auto-detection will run)".to_string());
    }
    lines
}

/// Report for one processed document: what was extracted, or why it failed.
pub fn format_document_run(run: &DocumentRun) -> Vec<String> {
    let mut lines = format_document_header(&run.name);

    match &run.result {
        Ok(done) => {
            let outcome = &done.outcome;
            match (&outcome.auto_map, outcome.missing_map) {
                (Some(promoted), _) => {
                    lines.push(format!("  Map:      map.webp (auto-detected from '{promoted}')"));
                }
                (None, false) => lines.push("  Map:      map.webp".to_string()),
                (None, true) => {
                    lines.push("  WARNING: could not identify a base map layer!".to_string());
                    lines.push("           Name your base map layer 'Karta' and re-run.".to_string());
                }
            }
            if outcome.missing_overlay {
                lines.push("  WARNING: no 'Overlay' layer found".to_string());
            } else {
                lines.push("  Overlay:  overlay.webp".to_string());
            }
            lines.push(format!("  Regions:  {}", outcome.manifest.countries.len()));
            lines.push(format!(
                "  Written:  {} -> {}/",
                format_bytes(done.bytes_written),
                run.folder
            ));
        }
        Err(error) => {
            lines.push(format!("  ERROR: {error}"));
        }
    }

    lines
}

/// Final aggregate summary: per-document region counts, failures, wall time.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    let mut lines = vec![format!("All done! ({:.1}s)", summary.elapsed.as_secs_f64())];

    for (run, done) in summary.completed() {
        lines.push(format!(
            "  {}: {} regions -> {}/",
            run.name,
            done.outcome.manifest.countries.len(),
            run.folder
        ));
    }

    let failures = summary.failure_count();
    if failures > 0 {
        lines.push(format!("  {failures} document(s) failed"));
    }

    lines
}

pub fn print_placeholder_warnings(placeholders: &[Placeholder]) {
    for line in format_placeholder_warnings(placeholders) {
        println!("{line}");
    }
}

pub fn print_inspect_document(doc: &Document, config: &ExtractConfig) {
    for line in format_inspect_document(doc, config) {
        println!("{line}");
    }
}

pub fn print_document_run(run: &DocumentRun) {
    for line in format_document_run(run) {
        println!("{line}");
    }
}

pub fn print_summary(summary: &BatchSummary) {
    for line in format_summary(summary) {
        println!("{line}");
    }
}
