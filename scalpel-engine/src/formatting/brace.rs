//! Brace-based block formatter (TypeScript family).

use super::{CodeFormatter, dedent, normalize_trailing_newline};

pub struct BraceFormatter {
    indent_size: usize,
}

impl BraceFormatter {
    pub fn new(indent_size: usize) -> Self {
        Self { indent_size }
    }

    /// Net brace balance of a line, ignoring braces inside string
    /// literals and line comments (a heuristic; template literals with
    /// nested braces are counted as-is).
    fn brace_balance(line: &str) -> i32 {
        let mut balance = 0i32;
        let mut in_string: Option<char> = None;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match in_string {
                Some(q) => {
                    if c == '\\' {
                        chars.next();
                    } else if c == q {
                        in_string = None;
                    }
                }
                None => match c {
                    '\'' | '"' | '`' => in_string = Some(c),
                    '/' if chars.peek() == Some(&'/') => break,
                    '{' => balance += 1,
                    '}' => balance -= 1,
                    _ => {}
                },
            }
        }
        balance
    }
}

impl Default for BraceFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CodeFormatter for BraceFormatter {
    fn indent_unit(&self) -> String {
        " ".repeat(self.indent_size)
    }

    fn indent_size(&self) -> usize {
        self.indent_size
    }

    /// Dedent, then re-indent one level per unmatched brace. Blank lines
    /// are preserved (unindented).
    fn format_block(&self, code: &str) -> String {
        let dedented = dedent(code.trim_end());
        let unit = self.indent_unit();
        let mut depth = 0i32;
        let mut out: Vec<String> = Vec::new();
        for line in dedented.lines() {
            let stripped = line.trim();
            if stripped.is_empty() {
                out.push(String::new());
                continue;
            }
            let effective = if stripped.starts_with('}') {
                (depth - 1).max(0)
            } else {
                depth
            };
            out.push(format!("{}{stripped}", unit.repeat(effective as usize)));
            depth = (depth + Self::brace_balance(stripped)).max(0);
        }
        normalize_trailing_newline(out.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reindents_by_brace_depth() {
        let f = BraceFormatter::default();
        let out = f.format_block("class K {\nm() {\nreturn 1;\n}\n}\n");
        assert_eq!(out, "class K {\n  m() {\n    return 1;\n  }\n}\n");
    }

    #[test]
    fn braces_in_strings_are_ignored() {
        assert_eq!(BraceFormatter::brace_balance("const s = '{';"), 0);
        assert_eq!(BraceFormatter::brace_balance("call(); // {"), 0);
    }
}
