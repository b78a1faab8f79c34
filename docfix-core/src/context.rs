//! Bounded source excerpt describing one declaration.

use std::fmt;

use crate::errors::ContextError;

pub const TARGET_START_MARKER: &str = "=== TARGET TO DOCUMENT ===";
pub const TARGET_END_MARKER: &str = "=== END ===";

/// Upper bound on header lines collected while looking for the closing `:`.
pub const MAX_SIGNATURE_LINES: usize = 5;
/// Body lines appended after the signature.
pub const BODY_CONTEXT_LINES: usize = 2;

/// Signature plus a short body sample, copied from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    /// 0-based index of the first signature line.
    pub start_index: usize,
    pub signature: Vec<String>,
    pub body: Vec<String>,
}

impl ContextWindow {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.signature
            .iter()
            .chain(self.body.iter())
            .map(String::as_str)
    }

    /// Marker-delimited rendering handed to the generator.
    pub fn render(&self) -> String {
        let mut out = String::from(TARGET_START_MARKER);
        out.push('\n');
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(TARGET_END_MARKER);
        out
    }
}

impl fmt::Display for ContextWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builds the window for the declaration at `index` (0-based).
///
/// Collects up to [`MAX_SIGNATURE_LINES`] lines until one ends with `:`
/// once its trailing comment is removed, then up to [`BODY_CONTEXT_LINES`]
/// more lines.
pub fn extract<S: AsRef<str>>(lines: &[S], index: usize) -> Result<ContextWindow, ContextError> {
    if index >= lines.len() {
        return Err(ContextError::OutOfRange {
            index,
            len: lines.len(),
        });
    }

    let sig_limit = (index + MAX_SIGNATURE_LINES).min(lines.len());
    let mut signature = Vec::new();
    for line in &lines[index..sig_limit] {
        let line = line.as_ref();
        signature.push(line.to_string());
        if strip_comment(line).trim_end().ends_with(':') {
            break;
        }
    }

    let body_start = index + signature.len();
    let body_end = (body_start + BODY_CONTEXT_LINES).min(lines.len());
    let body = lines[body_start..body_end]
        .iter()
        .map(|l| l.as_ref().to_string())
        .collect();

    Ok(ContextWindow {
        start_index: index,
        signature,
        body,
    })
}

/// Removes a trailing `#` comment that is not inside a string literal.
pub fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => return &line[..i],
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_signature_with_body() {
        let lines = ["def add(a, b):", "    return a+b"];
        let w = extract(&lines, 0).unwrap();
        assert_eq!(w.signature, vec!["def add(a, b):"]);
        assert_eq!(w.body, vec!["    return a+b"]);
        assert_eq!(
            w.render(),
            "=== TARGET TO DOCUMENT ===\ndef add(a, b):\n    return a+b\n=== END ==="
        );
    }

    #[test]
    fn multi_line_signature_ignores_commented_colon() {
        let lines = [
            "def f(a,  # note: first",
            "      b):  # trailing",
            "    x = 1",
            "    y = 2",
            "    z = 3",
        ];
        let w = extract(&lines, 0).unwrap();
        assert_eq!(w.signature.len(), 2);
        assert_eq!(w.body, vec!["    x = 1", "    y = 2"]);
    }

    #[test]
    fn hash_inside_string_is_not_a_comment() {
        assert_eq!(strip_comment("def f(x='#'):  # c"), "def f(x='#'):  ");
        assert_eq!(strip_comment(r##"def f(x="a\"#"):"##), r##"def f(x="a\"#"):"##);
    }

    #[test]
    fn signature_is_capped() {
        let lines: Vec<String> = (0..8).map(|i| format!("    arg{i},")).collect();
        let w = extract(&lines, 0).unwrap();
        assert_eq!(w.signature.len(), MAX_SIGNATURE_LINES);
        assert_eq!(w.body.len(), BODY_CONTEXT_LINES);
    }

    #[test]
    fn last_line_declaration_has_empty_body() {
        let lines = ["x = 1", "def f(): pass"];
        let w = extract(&lines, 1).unwrap();
        assert_eq!(w.signature, vec!["def f(): pass"]);
        assert!(w.body.is_empty());
    }

    #[test]
    fn index_past_end_is_rejected() {
        let lines = ["def f():"];
        assert_eq!(
            extract(&lines, 3),
            Err(ContextError::OutOfRange { index: 3, len: 1 })
        );
    }
}
