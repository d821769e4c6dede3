use serde::Serialize;
use sidediff_common::{ChunkKind, DiffResult};

/// Per-kind tallies of a diff result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub total: usize,
    pub context: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Context lines relabeled by a search match
    pub search_hits: usize,
    pub diff_count: usize,
}

impl DiffStats {
    pub fn from_result(result: &DiffResult) -> Self {
        let mut stats = DiffStats {
            total: result.chunks.len(),
            diff_count: result.diff_count,
            ..Default::default()
        };

        for chunk in &result.chunks {
            if chunk.search_hit {
                stats.search_hits += 1;
                continue;
            }
            match chunk.kind {
                ChunkKind::Context => stats.context += 1,
                ChunkKind::Added => stats.added += 1,
                ChunkKind::Removed => stats.removed += 1,
                ChunkKind::Modified => stats.modified += 1,
            }
        }

        stats
    }
}
