use crate::line_diff::DiffOp;

/// A display unit produced by pairing delete/insert runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<'a> {
    /// A run of unchanged lines
    Context(&'a [&'a str]),
    /// A right-only line with no left counterpart
    AddedLine(&'a str),
    /// A left-only line with no right counterpart
    RemovedLine(&'a str),
    /// A left line and a right line shown together; either may be empty
    ModifiedPair(&'a str, &'a str),
}

/// Turn a line diff into display units.
///
/// A `Delete` immediately followed by an `Insert` is paired purely by
/// position: line `j` of the deleted run goes against line `j` of the
/// inserted run, and the shorter run is padded with empty lines. Content
/// similarity is not considered.
pub fn pair_blocks<'a>(ops: &[DiffOp<'a>]) -> Vec<Unit<'a>> {
    let mut units = Vec::new();
    let mut i = 0;

    while i < ops.len() {
        match (ops[i], ops.get(i + 1)) {
            (DiffOp::Delete(removed), Some(DiffOp::Insert(added))) => {
                let pairs = removed.len().max(added.len());
                units.extend((0..pairs).map(|j| {
                    let left = removed.get(j).copied().unwrap_or("");
                    let right = added.get(j).copied().unwrap_or("");
                    Unit::ModifiedPair(left, right)
                }));
                i += 2;
                continue;
            }
            (DiffOp::Delete(removed), _) => {
                units.extend(removed.iter().copied().map(Unit::RemovedLine));
            }
            (DiffOp::Insert(added), _) => {
                units.extend(added.iter().copied().map(Unit::AddedLine));
            }
            (DiffOp::Equal(lines), _) => units.push(Unit::Context(lines)),
        }
        i += 1;
    }

    units
}
