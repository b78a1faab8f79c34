use std::path::PathBuf;

use thiserror::Error;

/// Failures while scanning one file for undocumented declarations.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("tree-sitter language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("tree-sitter produced no tree for {path}")]
    NoTree { path: PathBuf },

    /// First ERROR or MISSING node in document order (1-based).
    #[error("syntax error in {path} at line {line}, column {column}")]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },
}

/// A declaration index that does not address a line of the buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("declaration index {index} is outside a buffer of {len} lines")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("insertion line {line} is outside a buffer of {len} lines")]
    OutOfRange { line: usize, len: usize },

    #[error("anchor line {anchor} precedes declaration line {declaration}")]
    AnchorBeforeDeclaration { declaration: usize, anchor: usize },
}
