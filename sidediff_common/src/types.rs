use serde::{Deserialize, Serialize};
use std::fmt;

/// Highlight class of a sub-span of a chunk's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Text present on both sides
    Context,
    /// Text present only on the right side
    Added,
    /// Text present only on the left side
    Removed,
    /// Whole-line highlight applied by a search match
    Modified,
}

/// A labeled sub-span of a line, used for inline highlighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn context(text: impl Into<String>) -> Self {
        Self::new(text, SegmentKind::Context)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(text, SegmentKind::Added)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(text, SegmentKind::Removed)
    }
}

/// Classification of a display chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Line is identical on both sides
    Context,
    /// Line exists only on the right side
    Added,
    /// Line exists only on the left side
    Removed,
    /// Left and right lines paired with inline highlighting
    Modified,
}

impl ChunkKind {
    pub fn is_change(self) -> bool {
        !matches!(self, ChunkKind::Context)
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChunkKind::Context => "context",
            ChunkKind::Added => "added",
            ChunkKind::Removed => "removed",
            ChunkKind::Modified => "modified",
        };
        f.write_str(name)
    }
}

/// One display row of a side-by-side comparison
///
/// Line numbers are 1-based and counted independently per side. A side
/// with no line in this row has an empty text, no segments and no number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub left_text: String,
    pub right_text: String,
    pub left_segments: Vec<Segment>,
    pub right_segments: Vec<Segment>,
    pub left_line_number: Option<usize>,
    pub right_line_number: Option<usize>,
    /// Set when the chunk was relabeled by a search match rather than a diff
    #[serde(default)]
    pub search_hit: bool,
}

/// Ordered chunk sequence plus the number of diff rows it contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub chunks: Vec<Chunk>,
    pub diff_count: usize,
}

impl DiffResult {
    pub fn has_differences(&self) -> bool {
        self.diff_count > 0
    }
}

/// Line-level diff algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers' O(ND) algorithm
    #[default]
    Myers,
    /// Patience diff (anchors on unique lines, better for code)
    Patience,
    /// Classic longest common subsequence table
    Lcs,
}

impl fmt::Display for DiffAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiffAlgorithm::Myers => "myers",
            DiffAlgorithm::Patience => "patience",
            DiffAlgorithm::Lcs => "lcs",
        };
        f.write_str(name)
    }
}

fn default_true() -> bool {
    true
}

fn default_column_width() -> usize {
    60
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Line diff algorithm
    #[serde(default)]
    pub algorithm: DiffAlgorithm,

    /// Give up on an optimal line diff after this many milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Convert CRLF and lone CR to LF when loading files
    #[serde(default = "default_true")]
    pub normalize_line_endings: bool,

    /// Width of each pane in side-by-side output
    #[serde(default = "default_column_width")]
    pub column_width: usize,

    /// Colorize terminal output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Enable portable mode (config alongside binary)
    #[serde(default)]
    pub portable_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            algorithm: DiffAlgorithm::default(),
            timeout_ms: None,
            normalize_line_endings: true,
            column_width: default_column_width(),
            color: true,
            portable_mode: false,
        }
    }
}
