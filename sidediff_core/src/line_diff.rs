use sidediff_common::DiffAlgorithm;
use similar::{capture_diff_slices_deadline, Algorithm, DiffTag};
use std::ops::Range;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// One run of lines in a line-level diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp<'a> {
    /// Lines present unchanged on both sides
    Equal(&'a [&'a str]),
    /// Lines present only on the left side
    Delete(&'a [&'a str]),
    /// Lines present only on the right side
    Insert(&'a [&'a str]),
}

impl<'a> DiffOp<'a> {
    pub fn lines(&self) -> &'a [&'a str] {
        match *self {
            DiffOp::Equal(lines) | DiffOp::Delete(lines) | DiffOp::Insert(lines) => lines,
        }
    }
}

/// Line-granularity differ treating each line as an atomic token
#[derive(Debug, Clone, Copy, Default)]
pub struct LineDiffer {
    algorithm: DiffAlgorithm,
    timeout: Option<Duration>,
}

impl LineDiffer {
    pub fn new(algorithm: DiffAlgorithm) -> Self {
        Self {
            algorithm,
            timeout: None,
        }
    }

    /// Bound the time spent looking for a minimal diff.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Diff two line sequences.
    ///
    /// Every change hunk between two equal runs is reported as its deleted
    /// lines followed by its inserted lines, so a replacement always shows
    /// up as `Delete` immediately followed by `Insert`.
    pub fn diff<'a>(&self, left: &'a [&'a str], right: &'a [&'a str]) -> Vec<DiffOp<'a>> {
        let started = Instant::now();
        let deadline = self.timeout.map(|timeout| started + timeout);
        let raw = capture_diff_slices_deadline(to_similar(self.algorithm), left, right, deadline);

        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                warn!(
                    "Line diff of {}/{} lines hit the {:?} deadline, result may not be minimal",
                    left.len(),
                    right.len(),
                    self.timeout.unwrap_or_default()
                );
            }
        }

        let mut ops = Vec::with_capacity(raw.len());
        let mut equal: Option<Range<usize>> = None;
        let mut hunk: Option<(Range<usize>, Range<usize>)> = None;

        for op in &raw {
            let (tag, old, new) = op.as_tag_tuple();
            if tag == DiffTag::Equal {
                flush_hunk(&mut ops, hunk.take(), left, right);
                equal = Some(match equal.take() {
                    Some(run) => run.start..old.end,
                    None => old,
                });
            } else {
                flush_equal(&mut ops, equal.take(), left);
                hunk = Some(match hunk.take() {
                    Some((old_hunk, new_hunk)) => (old_hunk.start..old.end, new_hunk.start..new.end),
                    None => (old, new),
                });
            }
        }
        flush_equal(&mut ops, equal, left);
        flush_hunk(&mut ops, hunk, left, right);

        debug!(
            "{} diff: {} left lines, {} right lines, {} ops",
            self.algorithm,
            left.len(),
            right.len(),
            ops.len()
        );
        ops
    }
}

fn to_similar(algorithm: DiffAlgorithm) -> Algorithm {
    match algorithm {
        DiffAlgorithm::Myers => Algorithm::Myers,
        DiffAlgorithm::Patience => Algorithm::Patience,
        DiffAlgorithm::Lcs => Algorithm::Lcs,
    }
}

fn flush_equal<'a>(ops: &mut Vec<DiffOp<'a>>, run: Option<Range<usize>>, left: &'a [&'a str]) {
    if let Some(run) = run.filter(|run| !run.is_empty()) {
        ops.push(DiffOp::Equal(&left[run]));
    }
}

fn flush_hunk<'a>(
    ops: &mut Vec<DiffOp<'a>>,
    hunk: Option<(Range<usize>, Range<usize>)>,
    left: &'a [&'a str],
    right: &'a [&'a str],
) {
    let Some((old, new)) = hunk else {
        return;
    };
    if !old.is_empty() {
        ops.push(DiffOp::Delete(&left[old]));
    }
    if !new.is_empty() {
        ops.push(DiffOp::Insert(&right[new]));
    }
}
