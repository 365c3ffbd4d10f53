//! Batch orchestration across input documents.
//!
//! Discovers `*.psd` files from the configured directories, filters out
//! undersized placeholder files (unfetched Git LFS pointers), maps each
//! document to an output folder, and runs extraction per document.
//!
//! ## Continue-on-Failure
//!
//! A document failure must never stop the rest of the batch, so each
//! document produces a [`DocumentRun`] holding a `Result` — the loop
//! collects outcomes instead of propagating errors. A failed document is
//! simply absent from the final region counts; its error is carried in the
//! run for reporting.
//!
//! Documents are processed strictly one at a time, in discovery order.
//! Nothing is shared across documents except the accumulated run list.

use crate::config::ExtractConfig;
use crate::extract::{self, ExtractError, ExtractOutcome};
use crate::imaging::RenderBackend;
use crate::naming::safe_stem;
use crate::reader::{DocumentReader, ReadError};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no usable input documents found; looked in: {locations}")]
    NoInputs { locations: String },
}

/// Why a single document produced no manifest.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// An input file below the placeholder threshold: content not yet fetched
/// from remote storage.
#[derive(Debug, Clone)]
pub struct Placeholder {
    pub path: PathBuf,
    pub size: u64,
}

/// Candidate inputs partitioned by the placeholder size threshold.
#[derive(Debug, Default)]
pub struct DiscoveredInputs {
    pub real: Vec<PathBuf>,
    pub placeholders: Vec<Placeholder>,
}

/// Discover `.psd` files (case-insensitive extension) directly inside each
/// of `dirs`, in directory order, sorted by filename within a directory.
/// Missing directories are skipped. Files below `threshold` bytes are
/// partitioned out as placeholders.
pub fn discover_inputs(dirs: &[PathBuf], threshold: u64) -> Result<DiscoveredInputs, BatchError> {
    let mut inputs = DiscoveredInputs::default();

    for dir in dirs {
        if !dir.is_dir() {
            continue;
        }
        let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("psd"))
            })
            .collect();
        candidates.sort();

        for path in candidates {
            let size = std::fs::metadata(&path)?.len();
            if size < threshold {
                inputs.placeholders.push(Placeholder { path, size });
            } else {
                inputs.real.push(path);
            }
        }
    }

    Ok(inputs)
}

/// The error for a discovery that found nothing extractable.
pub fn no_real_inputs_error(dirs: &[PathBuf]) -> BatchError {
    let locations = dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    BatchError::NoInputs { locations }
}

/// Resolve a document's output folder name: explicit table entry first,
/// sanitizer fallback for unlisted documents.
pub fn resolve_folder(name: &str, config: &ExtractConfig) -> String {
    config
        .folders
        .get(name)
        .cloned()
        .unwrap_or_else(|| safe_stem(name))
}

/// A successfully extracted document plus what it put on disk.
#[derive(Debug)]
pub struct CompletedDocument {
    pub outcome: ExtractOutcome,
    /// Total bytes of WebP files under the document's output folder.
    pub bytes_written: u64,
}

/// The recorded result of processing one input document.
#[derive(Debug)]
pub struct DocumentRun {
    /// Document name (input file stem).
    pub name: String,
    /// Output folder name under the asset root.
    pub folder: String,
    pub result: Result<CompletedDocument, DocumentError>,
}

/// Aggregate result of a whole batch.
#[derive(Debug)]
pub struct BatchSummary {
    pub runs: Vec<DocumentRun>,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Runs that produced a manifest.
    pub fn completed(&self) -> impl Iterator<Item = (&DocumentRun, &CompletedDocument)> {
        self.runs
            .iter()
            .filter_map(|run| run.result.as_ref().ok().map(|done| (run, done)))
    }

    pub fn failure_count(&self) -> usize {
        self.runs.iter().filter(|run| run.result.is_err()).count()
    }
}

/// Process every input in order, one at a time. `observe` fires after each
/// document so the caller can report progress; failures are collected, not
/// propagated.
pub fn run_batch(
    reader: &impl DocumentReader,
    backend: &impl RenderBackend,
    inputs: &[PathBuf],
    output_root: &Path,
    config: &ExtractConfig,
    mut observe: impl FnMut(&DocumentRun),
) -> BatchSummary {
    let started = Instant::now();
    let mut runs = Vec::new();

    for path in inputs {
        let run = run_document(reader, backend, path, output_root, config);
        observe(&run);
        runs.push(run);
    }

    BatchSummary {
        runs,
        elapsed: started.elapsed(),
    }
}

/// Open and extract a single input document, capturing any failure.
pub fn run_document(
    reader: &impl DocumentReader,
    backend: &impl RenderBackend,
    path: &Path,
    output_root: &Path,
    config: &ExtractConfig,
) -> DocumentRun {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let folder = resolve_folder(&name, config);
    let output_dir = output_root.join(&folder);

    let result = open_and_extract(reader, backend, path, &output_dir, config).map(|outcome| {
        CompletedDocument {
            bytes_written: webp_bytes_written(&output_dir),
            outcome,
        }
    });

    DocumentRun { name, folder, result }
}

fn open_and_extract(
    reader: &impl DocumentReader,
    backend: &impl RenderBackend,
    path: &Path,
    output_dir: &Path,
    config: &ExtractConfig,
) -> Result<ExtractOutcome, DocumentError> {
    let doc = reader.open(path)?;
    Ok(extract::extract_document(backend, &doc, output_dir, config)?)
}

/// Total size of WebP files under a document's output folder.
fn webp_bytes_written(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("webp"))
        })
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{MockReader, doc, leaf};
    use tempfile::TempDir;

    fn config() -> ExtractConfig {
        ExtractConfig::default()
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    #[test]
    fn discovery_partitions_placeholders_by_size() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Europa.psd"), vec![0u8; 4096]).unwrap();
        std::fs::write(tmp.path().join("Afrika.psd"), vec![0u8; 100]).unwrap();
        std::fs::write(tmp.path().join("notes.txt"), b"not a psd").unwrap();

        let inputs = discover_inputs(&[tmp.path().to_path_buf()], 1024).unwrap();

        assert_eq!(inputs.real.len(), 1);
        assert!(inputs.real[0].ends_with("Europa.psd"));
        assert_eq!(inputs.placeholders.len(), 1);
        assert_eq!(inputs.placeholders[0].size, 100);
        assert!(inputs.placeholders[0].path.ends_with("Afrika.psd"));
    }

    #[test]
    fn discovery_matches_extension_case_insensitively_and_sorts() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.PSD"), vec![0u8; 4096]).unwrap();
        std::fs::write(tmp.path().join("a.psd"), vec![0u8; 4096]).unwrap();

        let inputs = discover_inputs(&[tmp.path().to_path_buf()], 1024).unwrap();

        let names: Vec<String> = inputs
            .real
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.psd", "b.PSD"]);
    }

    #[test]
    fn discovery_keeps_directory_order_and_skips_missing_dirs() {
        let tmp1 = TempDir::new().unwrap();
        let tmp2 = TempDir::new().unwrap();
        std::fs::write(tmp1.path().join("zzz.psd"), vec![0u8; 4096]).unwrap();
        std::fs::write(tmp2.path().join("aaa.psd"), vec![0u8; 4096]).unwrap();

        let dirs = vec![
            tmp1.path().to_path_buf(),
            PathBuf::from("/nonexistent/psd"),
            tmp2.path().to_path_buf(),
        ];
        let inputs = discover_inputs(&dirs, 1024).unwrap();

        // First directory's files come first even though they sort later.
        assert_eq!(inputs.real.len(), 2);
        assert!(inputs.real[0].ends_with("zzz.psd"));
        assert!(inputs.real[1].ends_with("aaa.psd"));
    }

    #[test]
    fn discovery_ignores_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("old");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("nested.psd"), vec![0u8; 4096]).unwrap();

        let inputs = discover_inputs(&[tmp.path().to_path_buf()], 1024).unwrap();
        assert!(inputs.real.is_empty());
    }

    // =========================================================================
    // Folder resolution
    // =========================================================================

    #[test]
    fn folder_table_wins_over_sanitizer() {
        assert_eq!(resolve_folder("Sydamerika 3", &config()), "sydamerika");
        assert_eq!(resolve_folder("Västindien", &config()), "vastindien");
    }

    #[test]
    fn unlisted_documents_fall_back_to_sanitizer() {
        assert_eq!(resolve_folder("Norden", &config()), "norden");
        assert_eq!(resolve_folder("Mellanöstern 2", &config()), "mellanostern_2");
    }

    // =========================================================================
    // Batch loop
    // =========================================================================

    fn three_document_reader() -> MockReader {
        MockReader::with_documents(vec![
            doc(
                "Europa",
                1000,
                500,
                vec![leaf("Karta", 0, 0, 900, 450), leaf("Sverige", 0, 0, 50, 80)],
            ),
            doc(
                "Afrika",
                1000,
                500,
                vec![
                    leaf("Karta", 0, 0, 900, 450),
                    leaf("Trasig", 0, 0, 50, 80),
                    leaf("Egypten", 0, 0, 50, 80),
                ],
            ),
            doc(
                "Asien",
                1000,
                500,
                vec![leaf("Karta", 0, 0, 900, 450), leaf("Japan", 0, 0, 50, 80)],
            ),
        ])
    }

    #[test]
    fn one_failing_document_does_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        let reader = three_document_reader();
        // "Trasig" only exists in the Afrika document.
        let backend = MockBackend::failing_on("Trasig");
        let inputs = vec![
            PathBuf::from("psd/Europa.psd"),
            PathBuf::from("psd/Afrika.psd"),
            PathBuf::from("psd/Asien.psd"),
        ];

        let mut observed = Vec::new();
        let summary = run_batch(&reader, &backend, &inputs, tmp.path(), &config(), |run| {
            observed.push(run.name.clone())
        });

        assert_eq!(observed, ["Europa", "Afrika", "Asien"]);
        assert_eq!(summary.runs.len(), 3);
        assert_eq!(summary.failure_count(), 1);

        let completed: Vec<&str> = summary
            .completed()
            .map(|(run, _)| run.name.as_str())
            .collect();
        assert_eq!(completed, ["Europa", "Asien"]);

        assert!(tmp.path().join("europa/config.json").exists());
        assert!(tmp.path().join("asien/config.json").exists());
        assert!(!tmp.path().join("afrika/config.json").exists());
    }

    #[test]
    fn unreadable_document_is_a_read_failure() {
        let tmp = TempDir::new().unwrap();
        let reader = MockReader::with_documents(vec![]);
        let backend = MockBackend::new();

        let run = run_document(
            &reader,
            &backend,
            Path::new("psd/Okänd.psd"),
            tmp.path(),
            &config(),
        );

        assert_eq!(run.name, "Okänd");
        assert!(matches!(run.result, Err(DocumentError::Read(_))));
    }

    #[test]
    fn run_uses_folder_table_for_output_dir() {
        let tmp = TempDir::new().unwrap();
        let reader = MockReader::with_documents(vec![doc(
            "Sydamerika 3",
            1000,
            500,
            vec![leaf("Karta", 0, 0, 900, 450), leaf("Chile", 0, 0, 50, 80)],
        )]);
        let backend = MockBackend::new();

        let run = run_document(
            &reader,
            &backend,
            Path::new("Sydamerika 3.psd"),
            tmp.path(),
            &config(),
        );

        assert_eq!(run.folder, "sydamerika");
        assert!(run.result.is_ok());
        assert!(tmp.path().join("sydamerika/config.json").exists());
    }
}
