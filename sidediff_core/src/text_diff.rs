use crate::block_pairer::pair_blocks;
use crate::chunk_builder::build_chunks;
use crate::file_loader::{load_text, LoadedText};
use crate::line_diff::LineDiffer;
use crate::lines::split_lines;
use crate::search::annotate_search;
use sidediff_common::{AppConfig, DiffAlgorithm, DiffResult, SideDiffError};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Options for a side-by-side text comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    /// Line diff algorithm
    pub algorithm: DiffAlgorithm,
    /// Give up on a minimal line diff after this long
    pub timeout: Option<Duration>,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patience() -> Self {
        Self {
            algorithm: DiffAlgorithm::Patience,
            ..Default::default()
        }
    }
}

impl From<&AppConfig> for DiffOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            algorithm: config.algorithm,
            timeout: config.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// A comparison of two loaded files
#[derive(Debug, Clone)]
pub struct FileComparison {
    pub left: LoadedText,
    pub right: LoadedText,
    pub result: DiffResult,
}

/// Side-by-side text diff engine
///
/// Each call recomputes the whole result from its inputs; nothing is kept
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct TextDiffEngine {
    options: DiffOptions,
}

impl TextDiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn set_options(&mut self, options: DiffOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare two documents and highlight context lines matching `search`.
    pub fn compare_text(&self, left: &str, right: &str, search: &str) -> DiffResult {
        let left_lines = split_lines(left);
        let right_lines = split_lines(right);

        let ops = LineDiffer::new(self.options.algorithm)
            .with_timeout(self.options.timeout)
            .diff(&left_lines, &right_lines);
        let units = pair_blocks(&ops);
        let result = build_chunks(&units);

        debug!(
            "Built {} chunks with {} differences",
            result.chunks.len(),
            result.diff_count
        );

        annotate_search(result, search)
    }

    /// Load two files from disk and compare them
    pub fn compare_files(
        &self,
        left_path: &Path,
        right_path: &Path,
        search: &str,
        normalize_line_endings: bool,
    ) -> Result<FileComparison, SideDiffError> {
        let left = load_text(left_path, normalize_line_endings)?;
        let right = load_text(right_path, normalize_line_endings)?;
        let result = self.compare_text(&left.content, &right.content, search);

        Ok(FileComparison {
            left,
            right,
            result,
        })
    }
}

/// Compare two documents with default options.
pub fn compute_diff(left: &str, right: &str, search: &str) -> DiffResult {
    TextDiffEngine::new().compare_text(left, right, search)
}
