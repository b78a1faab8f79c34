use std::fmt;
use std::path::PathBuf;

/// Closed set of declaration kinds the scanner reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Function,
    AsyncFunction,
    Class,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::AsyncFunction => "async function",
            DeclarationKind::Class => "class",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function, method or class lacking a docstring.
///
/// Holds only positional facts copied out of the parse tree, so it stays
/// valid after the tree is dropped. All line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Bare identifier (`method`).
    pub name: String,
    /// Dotted path (`Outer.method`, `outer.<locals>.inner`).
    pub qualified_name: String,
    pub kind: DeclarationKind,
    /// Line of the `def` / `class` keyword (decorators excluded).
    pub start_line: usize,
    /// Line holding the `:` that closes the header.
    pub header_end_line: usize,
    /// Body starts on the header line (`def f(): pass`).
    pub inline_body: bool,
}

impl Declaration {
    /// 0-based index of the declaration line.
    pub fn index(&self) -> usize {
        self.start_line.saturating_sub(1)
    }

    /// 0-based index of the header's last line.
    pub fn header_end_index(&self) -> usize {
        self.header_end_line.saturating_sub(1)
    }
}

/// A declaration paired with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub declaration: Declaration,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A file's lines plus the line ending it was read with.
///
/// `from_text` followed by `to_text` reproduces the input for files with a
/// single line-ending style; mixed files are written back with the detected one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileLines {
    pub lines: Vec<String>,
    pub line_ending: LineEnding,
}

impl FileLines {
    pub fn from_text(text: &str) -> Self {
        let line_ending = if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self { lines, line_ending }
    }

    pub fn to_text(&self) -> String {
        self.lines.join(self.line_ending.as_str())
    }
}
