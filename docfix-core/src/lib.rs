//! Core of the docstring fixer: pure, synchronous text operations.
//!
//! - [`scanner::scan`] parses a Python file with tree-sitter and reports
//!   declarations whose body does not open with a docstring.
//! - [`context::extract`] cuts a bounded excerpt (signature plus a short
//!   body sample) around one declaration.
//! - [`normalize::normalize_at`] turns generated prose into a width-bounded
//!   Google-style block.
//! - [`patch::insert_after`] splices that block under the declaration.
//!
//! Nothing here touches the filesystem or the network.

pub mod context;
pub mod errors;
pub mod model;
pub mod normalize;
pub mod patch;
pub mod scanner;

pub use context::{ContextWindow, extract};
pub use errors::{ContextError, PatchError, ScanError};
pub use model::{Declaration, DeclarationKind, FileLines, Issue, LineEnding};
pub use normalize::{FormattedBlock, check_line_width, normalize, normalize_at};
pub use patch::{block_indent, body_indent, insert, insert_after};
pub use scanner::scan;
