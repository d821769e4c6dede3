use crate::block_pairer::Unit;
use crate::word_diff::diff_words;
use sidediff_common::{Chunk, ChunkKind, DiffResult, Segment};

/// Running state threaded through the unit sequence
#[derive(Debug)]
struct Accumulator {
    chunks: Vec<Chunk>,
    diff_count: usize,
    left_line: usize,
    right_line: usize,
}

impl Accumulator {
    fn new(capacity: usize) -> Self {
        Self {
            chunks: Vec::with_capacity(capacity),
            diff_count: 0,
            left_line: 1,
            right_line: 1,
        }
    }

    /// Take the next left line number if the left side has a line.
    fn next_left(&mut self, present: bool) -> Option<usize> {
        present.then(|| {
            self.left_line += 1;
            self.left_line - 1
        })
    }

    fn next_right(&mut self, present: bool) -> Option<usize> {
        present.then(|| {
            self.right_line += 1;
            self.right_line - 1
        })
    }

    fn apply(mut self, unit: &Unit<'_>) -> Self {
        match *unit {
            Unit::Context(lines) => {
                for line in lines {
                    let left_line_number = self.next_left(true);
                    let right_line_number = self.next_right(true);
                    self.chunks.push(Chunk {
                        kind: ChunkKind::Context,
                        left_text: line.to_string(),
                        right_text: line.to_string(),
                        left_segments: vec![Segment::context(*line)],
                        right_segments: vec![Segment::context(*line)],
                        left_line_number,
                        right_line_number,
                        search_hit: false,
                    });
                }
            }
            Unit::AddedLine(line) => {
                let right_line_number = self.next_right(true);
                self.chunks.push(Chunk {
                    kind: ChunkKind::Added,
                    left_text: String::new(),
                    right_text: line.to_string(),
                    left_segments: Vec::new(),
                    right_segments: vec![Segment::added(line)],
                    left_line_number: None,
                    right_line_number,
                    search_hit: false,
                });
                self.diff_count += 1;
            }
            Unit::RemovedLine(line) => {
                let left_line_number = self.next_left(true);
                self.chunks.push(Chunk {
                    kind: ChunkKind::Removed,
                    left_text: line.to_string(),
                    right_text: String::new(),
                    left_segments: vec![Segment::removed(line)],
                    right_segments: Vec::new(),
                    left_line_number,
                    right_line_number: None,
                    search_hit: false,
                });
                self.diff_count += 1;
            }
            Unit::ModifiedPair(left, right) => {
                // An empty side of a pair takes no line number, even when the
                // underlying line was a genuinely blank one.
                let left_line_number = self.next_left(!left.is_empty());
                let right_line_number = self.next_right(!right.is_empty());
                let (left_segments, right_segments) = diff_words(left, right);
                self.chunks.push(Chunk {
                    kind: ChunkKind::Modified,
                    left_text: left.to_string(),
                    right_text: right.to_string(),
                    left_segments,
                    right_segments,
                    left_line_number,
                    right_line_number,
                    search_hit: false,
                });
                self.diff_count += 1;
            }
        }
        self
    }

    fn finish(self) -> DiffResult {
        DiffResult {
            chunks: self.chunks,
            diff_count: self.diff_count,
        }
    }
}

/// Number the units and expand them into display chunks.
pub fn build_chunks(units: &[Unit<'_>]) -> DiffResult {
    let capacity: usize = units
        .iter()
        .map(|unit| match unit {
            Unit::Context(lines) => lines.len(),
            _ => 1,
        })
        .sum();

    units
        .iter()
        .fold(Accumulator::new(capacity), Accumulator::apply)
        .finish()
}
