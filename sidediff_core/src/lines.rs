/// Split a document into lines on `\n`.
///
/// A single trailing newline does not produce an extra empty line, so
/// `"a\nb\n"` and `"a\nb"` both split into `["a", "b"]`. Carriage returns
/// are left in place; callers normalize line endings before diffing.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}
