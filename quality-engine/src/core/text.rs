//! Small text helpers shared by the inspector and the annotator.

use std::borrow::Cow;

/// Prefix of every marker line this tool writes into source files.
pub const MARKER_PREFIX: &str = "// TODO: [";

/// 1-based line of `byte_idx` in `code`.
pub fn line_of(code: &str, byte_idx: usize) -> usize {
    let idx = floor_boundary(code, byte_idx.min(code.len()));
    code[..idx].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Largest char boundary `<= idx`.
pub fn floor_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Whether `line` is a marker previously written by the annotator.
pub fn is_marker_line(line: &str) -> bool {
    line.trim_start().starts_with(MARKER_PREFIX)
}

/// Replace marker lines with spaces of the same byte length.
///
/// Offsets and line numbers are unchanged; the marker text can no longer satisfy
/// or trip any check.
pub fn mask_markers(code: &str) -> Cow<'_, str> {
    if !code.contains(MARKER_PREFIX) {
        return Cow::Borrowed(code);
    }
    let mut out = String::with_capacity(code.len());
    for line in code.split_inclusive('\n') {
        if is_marker_line(line) {
            let body = line.trim_end_matches(['\n', '\r']);
            out.extend(std::iter::repeat_n(' ', body.len()));
            out.push_str(&line[body.len()..]);
        } else {
            out.push_str(line);
        }
    }
    Cow::Owned(out)
}

/// Collapse runs of whitespace into single spaces and cut to `max` chars.
pub fn preview(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max).collect()
}

/// Number of lines before `line_idx` (0-based) that contain `needle`, skipping markers.
pub fn occurrence_before(lines: &[&str], line_idx: usize, needle: &str) -> usize {
    lines[..line_idx.min(lines.len())]
        .iter()
        .filter(|l| !is_marker_line(l) && l.contains(needle))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_of_counts_newlines() {
        let code = "a\nb\nc";
        assert_eq!(line_of(code, 0), 1);
        assert_eq!(line_of(code, 2), 2);
        assert_eq!(line_of(code, 4), 3);
    }

    #[test]
    fn masking_keeps_offsets() {
        let code = "class A {\n    // TODO: [JavaDoc] - x\n    int a;\n}\n";
        let masked = mask_markers(code);
        assert_eq!(masked.len(), code.len());
        assert!(!masked.contains("TODO"));
        assert_eq!(masked.lines().count(), code.lines().count());
    }

    #[test]
    fn floor_boundary_steps_back_over_multibyte() {
        let s = "aé";
        assert_eq!(floor_boundary(s, 2), 1);
        assert_eq!(floor_boundary(s, 10), s.len());
    }
}
