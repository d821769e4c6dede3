pub mod block_pairer;
pub mod chunk_builder;
pub mod file_loader;
pub mod line_diff;
pub mod lines;
pub mod navigation;
pub mod search;
pub mod stats;
pub mod text_diff;
pub mod word_diff;

pub use block_pairer::{pair_blocks, Unit};
pub use chunk_builder::build_chunks;
pub use file_loader::{load_text, LoadedText, TextEncoding};
pub use line_diff::{DiffOp, LineDiffer};
pub use lines::split_lines;
pub use navigation::{diff_indices, DiffNavigator};
pub use search::annotate_search;
pub use stats::DiffStats;
pub use text_diff::{compute_diff, DiffOptions, FileComparison, TextDiffEngine};
pub use word_diff::{diff_words, tokenize};
