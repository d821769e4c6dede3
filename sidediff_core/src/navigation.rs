use sidediff_common::Chunk;

/// Indices of every non-context chunk, in document order.
pub fn diff_indices(chunks: &[Chunk]) -> Vec<usize> {
    chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| chunk.kind.is_change())
        .map(|(index, _)| index)
        .collect()
}

/// Cursor for stepping through the diffs of a chunk sequence
///
/// Starts on the first diff. Positions wrap around in both directions.
/// Every method returns the chunk index of the newly active diff, or
/// `None` when there are no diffs at all.
#[derive(Debug, Clone, Default)]
pub struct DiffNavigator {
    indices: Vec<usize>,
    active: Option<usize>,
}

impl DiffNavigator {
    pub fn new(chunks: &[Chunk]) -> Self {
        let indices = diff_indices(chunks);
        let active = (!indices.is_empty()).then_some(0);
        Self { indices, active }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of the active diff among all diffs
    pub fn position(&self) -> Option<usize> {
        self.active
    }

    /// Chunk index of the active diff
    pub fn current(&self) -> Option<usize> {
        self.active.map(|position| self.indices[position])
    }

    /// Jump to the diff at `position`, wrapping out-of-range values.
    pub fn go_to(&mut self, position: isize) -> Option<usize> {
        if self.indices.is_empty() {
            return None;
        }
        let wrapped = position.rem_euclid(self.indices.len() as isize) as usize;
        self.active = Some(wrapped);
        Some(self.indices[wrapped])
    }

    pub fn next_diff(&mut self) -> Option<usize> {
        let target = self.active.map_or(0, |position| position as isize + 1);
        self.go_to(target)
    }

    pub fn previous_diff(&mut self) -> Option<usize> {
        let target = self.active.map_or(0, |position| position as isize - 1);
        self.go_to(target)
    }

    /// Return to the first diff.
    pub fn reset(&mut self) -> Option<usize> {
        self.go_to(0)
    }
}
