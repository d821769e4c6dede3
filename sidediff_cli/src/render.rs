use sidediff_common::{Chunk, ChunkKind, DiffResult, Segment, SegmentKind};
use sidediff_core::DiffStats;
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TAB: &str = "    ";
const ELLIPSIS: &str = "...";
const RESET: &str = "\x1b[0m";

fn kind_color(kind: SegmentKind) -> Option<&'static str> {
    match kind {
        SegmentKind::Context => None,
        SegmentKind::Added => Some("\x1b[32m"),    // Green
        SegmentKind::Removed => Some("\x1b[31m"),  // Red
        SegmentKind::Modified => Some("\x1b[33m"), // Yellow
    }
}

fn marker(chunk: &Chunk) -> &'static str {
    if chunk.search_hit {
        return "*";
    }
    match chunk.kind {
        ChunkKind::Context => " ",
        ChunkKind::Added => "+",
        ChunkKind::Removed => "-",
        ChunkKind::Modified => "~",
    }
}

fn line_number(number: Option<usize>) -> String {
    number.map(|n| n.to_string()).unwrap_or_default()
}

/// Paint segments with ANSI colors, expanding tabs.
fn paint(segments: &[Segment], use_color: bool) -> String {
    let mut out = String::new();
    for segment in segments {
        let text = segment.text.replace('\t', TAB);
        match kind_color(segment.kind).filter(|_| use_color) {
            Some(color) => {
                let _ = write!(out, "{color}{text}{RESET}");
            }
            None => out.push_str(&text),
        }
    }
    out
}

/// Cut segments down to `width` terminal columns and pad to exactly `width`.
///
/// Wide characters (CJK, emoji) take two columns.
pub fn fit_segments(segments: &[Segment], width: usize) -> Vec<Segment> {
    let expanded: Vec<Segment> = segments
        .iter()
        .map(|s| Segment::new(s.text.replace('\t', TAB), s.kind))
        .collect();
    let total: usize = expanded.iter().map(|s| s.text.width()).sum();

    let (mut fitted, used) = if total <= width {
        (expanded, total)
    } else {
        let budget = width.saturating_sub(ELLIPSIS.len());
        let mut fitted = Vec::new();
        let mut used = 0;
        for segment in expanded {
            let mut text = String::new();
            let mut clipped = false;
            for ch in segment.text.chars() {
                let w = ch.width().unwrap_or(0);
                if used + w > budget {
                    clipped = true;
                    break;
                }
                used += w;
                text.push(ch);
            }
            if !text.is_empty() {
                fitted.push(Segment::new(text, segment.kind));
            }
            if clipped {
                break;
            }
        }
        let dots: String = ELLIPSIS.chars().take(width - used).collect();
        used += dots.len();
        fitted.push(Segment::context(dots));
        (fitted, used)
    };

    if used < width {
        fitted.push(Segment::context(" ".repeat(width - used)));
    }
    fitted
}

/// One row per chunk; modified chunks show the left line then the right line.
pub fn render_stacked(result: &DiffResult, diff_only: bool, use_color: bool) -> String {
    let mut out = String::new();

    for chunk in &result.chunks {
        if diff_only && !chunk.kind.is_change() {
            continue;
        }
        let mark = marker(chunk);
        let left_no = line_number(chunk.left_line_number);
        let right_no = line_number(chunk.right_line_number);

        if chunk.kind == ChunkKind::Modified && !chunk.search_hit {
            if !chunk.left_text.is_empty() || chunk.right_text.is_empty() {
                let _ = writeln!(
                    out,
                    "{mark} {left_no:>5} {:>5} | {}",
                    "",
                    paint(&chunk.left_segments, use_color)
                );
            }
            if !chunk.right_text.is_empty() {
                let _ = writeln!(
                    out,
                    "{mark} {:>5} {right_no:>5} | {}",
                    "",
                    paint(&chunk.right_segments, use_color)
                );
            }
            continue;
        }

        let segments = if chunk.kind == ChunkKind::Added {
            &chunk.right_segments
        } else {
            &chunk.left_segments
        };
        let _ = writeln!(
            out,
            "{mark} {left_no:>5} {right_no:>5} | {}",
            paint(segments, use_color)
        );
    }

    out
}

/// Side-by-side panes, each `width` characters wide.
pub fn render_columns(result: &DiffResult, width: usize, diff_only: bool, use_color: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(width * 2 + 17);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:>5} {:<width$} {:^3} {:>5} {:<width$}", "", "Left", "", "", "Right");
    let _ = writeln!(out, "{}", "-".repeat(width * 2 + 17));

    for chunk in &result.chunks {
        if diff_only && !chunk.kind.is_change() {
            continue;
        }
        let left = paint(&fit_segments(&chunk.left_segments, width), use_color);
        let right = paint(&fit_segments(&chunk.right_segments, width), use_color);
        let _ = writeln!(
            out,
            "{:>5} {} {:^3} {:>5} {}",
            line_number(chunk.left_line_number),
            left,
            marker(chunk),
            line_number(chunk.right_line_number),
            right
        );
    }

    let _ = writeln!(out, "{rule}");
    out
}

pub fn render_summary(stats: &DiffStats, use_color: bool) -> String {
    let mark = |text: &str, color: &str| {
        if use_color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Total rows:      {}", stats.total);
    let _ = writeln!(out, "  Unchanged:       {} {}", stats.context, mark("(  )", "\x1b[37m"));
    let _ = writeln!(out, "  Modified:        {} {}", stats.modified, mark("(~~)", "\x1b[33m"));
    let _ = writeln!(out, "  Added:           {} {}", stats.added, mark("(++)", "\x1b[32m"));
    let _ = writeln!(out, "  Removed:         {} {}", stats.removed, mark("(--)", "\x1b[31m"));
    let _ = writeln!(out, "  Search matches:  {} {}", stats.search_hits, mark("(**)", "\x1b[36m"));
    let _ = writeln!(out, "  Differences:     {}", stats.diff_count);
    let _ = writeln!(out, "{}", "=".repeat(80));
    out
}
