use sidediff_common::{Chunk, ChunkKind, DiffResult, Segment, SegmentKind};
use tracing::debug;

/// Highlight context lines containing `query`, ignoring case.
///
/// Matching context chunks are relabeled `Modified` and their segments
/// replaced by one whole-line `Modified` segment per side. Changed chunks
/// are never touched and `diff_count` is left as it was. An empty query
/// returns the input unchanged.
pub fn annotate_search(result: DiffResult, query: &str) -> DiffResult {
    if query.is_empty() {
        return result;
    }

    let needle = query.to_lowercase();
    let mut hits = 0usize;

    let chunks = result
        .chunks
        .into_iter()
        .map(|chunk| {
            if chunk.kind == ChunkKind::Context && chunk.left_text.to_lowercase().contains(&needle) {
                hits += 1;
                highlight(chunk)
            } else {
                chunk
            }
        })
        .collect();

    debug!("Search for {:?} matched {} context lines", query, hits);

    DiffResult {
        chunks,
        diff_count: result.diff_count,
    }
}

fn highlight(chunk: Chunk) -> Chunk {
    Chunk {
        kind: ChunkKind::Modified,
        left_segments: vec![Segment::new(chunk.left_text.as_str(), SegmentKind::Modified)],
        right_segments: vec![Segment::new(chunk.right_text.as_str(), SegmentKind::Modified)],
        search_hit: true,
        ..chunk
    }
}
