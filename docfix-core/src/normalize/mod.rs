//! Turns raw generator output into a Google-style docstring block.
//!
//! The pipeline is: strip fences and quote markers ([`clean`]), classify
//! lines into headers, entries and prose ([`sections`]), then re-indent and
//! re-wrap each line to the width budget ([`wrap`]). Normalization never
//! fails; unusable input produces an empty [`FormattedBlock`].

pub mod clean;
pub mod sections;
pub mod wrap;

use sections::LineKind;

pub const DEFAULT_MAX_LINE_WIDTH: usize = 72;
pub const INDENT_STEP: &str = "    ";
const QUOTES: &str = "\"\"\"";
const RAW_OPEN: &str = "r\"\"\"";

/// Docstring lines ready to splice: opening quotes, content, closing quotes
/// and one trailing blank line. Empty when the input had no usable text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedBlock {
    lines: Vec<String>,
}

impl FormattedBlock {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// [`normalize_at`] with no base indent.
pub fn normalize(raw: &str, max_line_width: usize) -> FormattedBlock {
    normalize_at(raw, max_line_width, "")
}

/// Formats `raw` as a docstring whose lines start with `indent`.
///
/// Headers and prose sit at `indent`, entries and section text one level
/// deeper, and continuations of an entry two levels deeper. Any line longer
/// than `max_line_width` (indent included) is re-wrapped.
pub fn normalize_at(raw: &str, max_line_width: usize, indent: &str) -> FormattedBlock {
    let body = clean::extract_body(raw);
    if body.is_empty() {
        return FormattedBlock::default();
    }

    // Backslashes would otherwise be read as escape sequences.
    let open = if body.iter().any(|l| l.contains('\\')) {
        RAW_OPEN
    } else {
        QUOTES
    };
    let mut lines = Vec::with_capacity(body.len() + 3);
    lines.push(format!("{indent}{open}"));

    for line in sections::classify(&body) {
        if line.kind == LineKind::Blank {
            lines.push(String::new());
            continue;
        }

        let text = escape_quotes(&line.text);
        let first = format!("{indent}{}", INDENT_STEP.repeat(line.kind.levels()));
        let rest = match line.kind {
            LineKind::Entry => format!("{indent}{}", INDENT_STEP.repeat(2)),
            _ => first.clone(),
        };

        if first.chars().count() + text.chars().count() <= max_line_width {
            lines.push(format!("{first}{text}"));
        } else {
            lines.extend(wrap::wrap(&text, &first, &rest, max_line_width));
        }
    }

    lines.push(format!("{indent}{QUOTES}"));
    lines.push(String::new());
    FormattedBlock { lines }
}

/// Escapes every quote of a run of three or more, which would otherwise
/// terminate the docstring early. `\"` is valid in raw strings too.
fn escape_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '"' {
            run += 1;
            continue;
        }
        push_quotes(&mut out, run);
        run = 0;
        out.push(c);
    }
    push_quotes(&mut out, run);
    out
}

fn push_quotes(out: &mut String, run: usize) {
    let quote = if run >= 3 { "\\\"" } else { "\"" };
    out.push_str(&quote.repeat(run));
}

/// Reports every line of `text` longer than `max_width` chars.
///
/// Returns `(true, "")` when all lines fit.
pub fn check_line_width(text: &str, max_width: usize) -> (bool, String) {
    let violations: Vec<String> = text
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let len = line.chars().count();
            (len > max_width).then(|| format!("  Line {}: {len} chars (max {max_width})", i + 1))
        })
        .collect();

    if violations.is_empty() {
        (true, String::new())
    } else {
        (
            false,
            format!("Line length violations:\n{}", violations.join("\n")),
        )
    }
}
