//! Line-oriented source editing helpers shared by all manipulators.
//!
//! Everything here works on 1-based inclusive line ranges, mirroring the
//! ranges reported by extraction. The original trailing-newline state of
//! the input is preserved across splices.

use crate::formatting::indentation_of;

/// Replace lines `[start_line, end_line]` (1-based inclusive) with
/// `new_content`. An empty `new_content` deletes the range. Out-of-range
/// input returns the original unchanged.
pub fn replace_lines(original: &str, start_line: usize, end_line: usize, new_content: &str) -> String {
    if start_line == 0 || end_line < start_line {
        return original.to_string();
    }
    let had_trailing_newline = original.ends_with('\n');
    let lines: Vec<&str> = original.lines().collect();
    let start_index = start_line - 1;
    if start_index >= lines.len() {
        return original.to_string();
    }
    let end_index = end_line.min(lines.len());

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    out.extend(&lines[..start_index]);
    if !new_content.is_empty() {
        out.extend(new_content.lines());
    }
    out.extend(&lines[end_index..]);

    let mut joined = out.join("\n");
    if had_trailing_newline && !joined.is_empty() {
        joined.push('\n');
    }
    joined
}

/// Insert `content` after line `after_line` (0 = top of file). The
/// content is split on `\n` (not `lines()`) so a trailing empty segment
/// inserts an intended blank separator line.
pub fn insert_after_line(original: &str, after_line: usize, content: &str) -> String {
    let had_trailing_newline = original.ends_with('\n');
    let lines: Vec<&str> = original.lines().collect();
    let at = after_line.min(lines.len());

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 4);
    out.extend(&lines[..at]);
    out.extend(content.split('\n'));
    out.extend(&lines[at..]);

    let mut joined = out.join("\n");
    if (had_trailing_newline || original.is_empty()) && !joined.is_empty() {
        joined.push('\n');
    }
    joined
}

/// Walk upward from `start_line` and absorb contiguous decorator and
/// comment lines into the replacement window. The sweep skips blank
/// lines, follows decorators and comments, and stops at the first other
/// statement. Returns the adjusted 1-based start line.
pub fn sweep_start_line(
    lines: &[&str],
    start_line: usize,
    decorator_markers: &[&str],
    comment_markers: &[&str],
) -> usize {
    let mut adjusted = start_line;
    if start_line < 2 {
        return adjusted;
    }
    for i in (0..=start_line - 2).rev() {
        let Some(line) = lines.get(i) else { continue };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if decorator_markers.iter().any(|m| trimmed.starts_with(m)) {
            adjusted = i + 1;
        } else if comment_markers.iter().any(|m| trimmed.starts_with(m)) {
            adjusted = i + 1;
        } else {
            break;
        }
    }
    adjusted
}

/// The decorator/comment lines leading a replacement window, verbatim.
/// An element's range includes its attached decorators, so a replacement
/// that carries no markers of its own re-emits these to preserve them.
pub fn window_marker_prefix<'a>(
    lines: &[&'a str],
    window_start: usize,
    window_end: usize,
    decorator_markers: &[&str],
    comment_markers: &[&str],
) -> Vec<&'a str> {
    let mut out = Vec::new();
    for n in window_start..=window_end.min(lines.len()) {
        let Some(line) = lines.get(n - 1) else { break };
        let trimmed = line.trim();
        let is_marker = decorator_markers.iter().any(|m| trimmed.starts_with(m))
            || comment_markers.iter().any(|m| trimmed.starts_with(m));
        if is_marker {
            out.push(*line);
        } else {
            break;
        }
    }
    out
}

/// Indentation (leading whitespace) of a 1-based line; empty when out of
/// range.
pub fn line_indentation<'a>(code_lines: &[&'a str], line: usize) -> &'a str {
    if line == 0 {
        return "";
    }
    code_lines
        .get(line - 1)
        .map(|l| indentation_of(l))
        .unwrap_or("")
}

/// 1-based line number of the last non-blank line, or 0 for an all-blank
/// file.
pub fn last_nonblank_line(lines: &[&str]) -> usize {
    lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Collapse the blank-line run a removal leaves at the seam and trim
/// trailing blank lines down to a single newline.
pub fn tidy_after_removal(code: String, seam_line: usize) -> String {
    let had_newline = code.ends_with('\n');
    let mut lines: Vec<&str> = code.lines().collect();
    let seam = seam_line.saturating_sub(1);
    if seam > 0 && seam < lines.len() && lines[seam - 1].trim().is_empty() && lines[seam].trim().is_empty() {
        lines.remove(seam);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    if had_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_preserves_trailing_newline_state() {
        let with_nl = "a\nb\nc\n";
        assert_eq!(replace_lines(with_nl, 2, 2, "B"), "a\nB\nc\n");
        let without_nl = "a\nb\nc";
        assert_eq!(replace_lines(without_nl, 2, 2, "B"), "a\nB\nc");
    }

    #[test]
    fn replace_with_empty_deletes_lines() {
        assert_eq!(replace_lines("a\nb\nc\n", 2, 3, ""), "a\n");
    }

    #[test]
    fn sweep_absorbs_decorators_and_comments() {
        let lines = vec!["class C:", "    # note", "    @cached", "    def m(self):"];
        assert_eq!(sweep_start_line(&lines, 4, &["@"], &["#"]), 2);
    }

    #[test]
    fn sweep_stops_at_other_statements() {
        let lines = vec!["x = 1", "@deco", "def f():"];
        assert_eq!(sweep_start_line(&lines, 3, &["@"], &["#"]), 2);
        let lines2 = vec!["x = 1", "", "def f():"];
        assert_eq!(sweep_start_line(&lines2, 3, &["@"], &["#"]), 3);
    }

    #[test]
    fn insert_at_top_and_bottom() {
        assert_eq!(insert_after_line("a\nb\n", 0, "x"), "x\na\nb\n");
        assert_eq!(insert_after_line("a\nb\n", 2, "x"), "a\nb\nx\n");
    }

    #[test]
    fn insert_keeps_trailing_blank_separator() {
        assert_eq!(
            insert_after_line("code();\n", 0, "import x;\n"),
            "import x;\n\ncode();\n"
        );
    }

    #[test]
    fn window_prefix_stops_at_code() {
        let lines = vec!["    @cached", "    # note", "    def m(self):", "        return 1"];
        let prefix = window_marker_prefix(&lines, 1, 4, &["@"], &["#"]);
        assert_eq!(prefix, vec!["    @cached", "    # note"]);
    }
}
