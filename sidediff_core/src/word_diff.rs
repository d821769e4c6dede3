use sidediff_common::{Segment, SegmentKind};
use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Split a line into alternating alphanumeric and non-alphanumeric runs.
///
/// Each maximal run is one token; concatenating the tokens gives back the
/// input. `"foo, bar"` becomes `["foo", ", ", "bar"]`.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current_class = None;

    for (idx, ch) in line.char_indices() {
        let class = ch.is_alphanumeric();
        if current_class.is_some_and(|prev| prev != class) {
            tokens.push(&line[start..idx]);
            start = idx;
        }
        current_class = Some(class);
    }

    if start < line.len() {
        tokens.push(&line[start..]);
    }
    tokens
}

/// Word-level diff of one left line against one right line.
///
/// Returns the segments for each side. Shared tokens become `Context` on
/// both sides, left-only tokens `Removed` on the left, right-only tokens
/// `Added` on the right. Adjacent segments of the same kind are merged.
pub fn diff_words(left: &str, right: &str) -> (Vec<Segment>, Vec<Segment>) {
    if left.is_empty() || right.is_empty() {
        let left_segments = whole_line(left, SegmentKind::Removed);
        let right_segments = whole_line(right, SegmentKind::Added);
        return (left_segments, right_segments);
    }

    let left_tokens = tokenize(left);
    let right_tokens = tokenize(right);
    let ops = capture_diff_slices(Algorithm::Myers, &left_tokens, &right_tokens);

    let mut left_segments = Vec::new();
    let mut right_segments = Vec::new();

    for op in &ops {
        let (tag, old, new) = op.as_tag_tuple();
        let old_text = left_tokens[old].concat();
        let new_text = right_tokens[new].concat();

        match tag {
            DiffTag::Equal => {
                push_segment(&mut left_segments, &old_text, SegmentKind::Context);
                push_segment(&mut right_segments, &old_text, SegmentKind::Context);
            }
            DiffTag::Delete => push_segment(&mut left_segments, &old_text, SegmentKind::Removed),
            DiffTag::Insert => push_segment(&mut right_segments, &new_text, SegmentKind::Added),
            DiffTag::Replace => {
                push_segment(&mut left_segments, &old_text, SegmentKind::Removed);
                push_segment(&mut right_segments, &new_text, SegmentKind::Added);
            }
        }
    }

    (left_segments, right_segments)
}

fn whole_line(text: &str, kind: SegmentKind) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::new(text, kind)]
    }
}

fn push_segment(segments: &mut Vec<Segment>, text: &str, kind: SegmentKind) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => segments.push(Segment::new(text, kind)),
    }
}
