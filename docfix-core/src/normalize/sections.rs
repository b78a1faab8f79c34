//! Google-style structure recognition.

use std::sync::OnceLock;

use regex::Regex;

/// Section headers recognised on a line of their own (`Args:`).
pub const SECTION_HEADERS: &[&str] = &[
    "Args",
    "Arguments",
    "Parameters",
    "Params",
    "Returns",
    "Return",
    "Raises",
    "Yields",
    "Yield",
    "Attributes",
    "Example",
    "Examples",
    "Note",
    "Notes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Header,
    /// `name (type): description` inside a section.
    Entry,
    /// Non-entry text directly under a header.
    SectionText,
    /// Non-entry text following an entry.
    Continuation,
    Plain,
}

impl LineKind {
    /// Extra indentation levels relative to the block's base indent.
    pub fn levels(&self) -> usize {
        match self {
            LineKind::Blank | LineKind::Header | LineKind::Plain => 0,
            LineKind::Entry | LineKind::SectionText => 1,
            LineKind::Continuation => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    /// Text with surrounding whitespace removed.
    pub text: String,
}

fn entry_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\*{0,2}[A-Za-z_][\w.]*(\[[^:]*\])?(\s*\([^)]*\))?\s*:(\s|$)").ok()
    })
    .as_ref()
}

pub fn is_header(text: &str) -> bool {
    text.strip_suffix(':')
        .is_some_and(|name| SECTION_HEADERS.contains(&name.trim_end()))
}

pub fn is_entry(text: &str) -> bool {
    entry_re().is_some_and(|re| re.is_match(text))
}

/// Classifies each line. A blank line followed by a non-entry line ends the
/// current section.
pub fn classify<S: AsRef<str>>(lines: &[S]) -> Vec<ClassifiedLine> {
    let mut in_section = false;
    let mut after_entry = false;
    let mut after_blank = false;

    lines
        .iter()
        .map(|line| {
            let text = line.as_ref().trim().to_string();
            let kind = if text.is_empty() {
                after_blank = true;
                LineKind::Blank
            } else if is_header(&text) {
                in_section = true;
                after_entry = false;
                after_blank = false;
                LineKind::Header
            } else if in_section && is_entry(&text) {
                after_entry = true;
                after_blank = false;
                LineKind::Entry
            } else if in_section && !after_blank {
                if after_entry {
                    LineKind::Continuation
                } else {
                    LineKind::SectionText
                }
            } else {
                in_section = false;
                after_entry = false;
                after_blank = false;
                LineKind::Plain
            };
            ClassifiedLine { kind, text }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(lines: &[&str]) -> Vec<LineKind> {
        classify(lines).into_iter().map(|c| c.kind).collect()
    }

    #[test]
    fn recognises_headers_only_from_closed_set() {
        assert!(is_header("Args:"));
        assert!(is_header("Returns :"));
        assert!(!is_header("Args: a"));
        assert!(!is_header("Summary:"));
    }

    #[test]
    fn recognises_entry_shapes() {
        assert!(is_entry("a: first"));
        assert!(is_entry("name (str): the name"));
        assert!(is_entry("items (list[int]): values"));
        assert!(is_entry("*args: extra"));
        assert!(is_entry("**kwargs: options"));
        assert!(is_entry("ValueError: if b is zero"));
        assert!(is_entry("os.PathLike:"));
        assert!(!is_entry("The sum of a and b."));
        assert!(!is_entry("see http://example.com"));
    }

    #[test]
    fn google_layout() {
        let lines = [
            "Adds two numbers.",
            "",
            "Args:",
            "a: first",
            "which is wide",
            "b: second",
            "",
            "Returns:",
            "The sum.",
            "",
            "Trailing prose.",
        ];
        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::Plain,
                LineKind::Blank,
                LineKind::Header,
                LineKind::Entry,
                LineKind::Continuation,
                LineKind::Entry,
                LineKind::Blank,
                LineKind::Header,
                LineKind::SectionText,
                LineKind::Blank,
                LineKind::Plain,
            ]
        );
    }

    #[test]
    fn entries_outside_sections_are_plain() {
        assert_eq!(kinds(&["Note that x: y"]), vec![LineKind::Plain]);
    }

    #[test]
    fn blank_between_entries_keeps_section() {
        assert_eq!(
            kinds(&["Raises:", "KeyError: missing", "", "ValueError: bad"]),
            vec![
                LineKind::Header,
                LineKind::Entry,
                LineKind::Blank,
                LineKind::Entry
            ]
        );
    }
}
