//! Splices a formatted block into a file's lines.

use crate::errors::PatchError;

pub const INDENT_UNIT: &str = "    ";

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
}

/// Indentation of a body under `declaration_line`: its own indent plus one
/// level. Tab-indented code gets a tab.
pub fn body_indent(declaration_line: &str) -> String {
    let lead = leading_whitespace(declaration_line);
    if lead.contains('\t') {
        format!("{lead}\t")
    } else {
        format!("{lead}{INDENT_UNIT}")
    }
}

/// Indentation the block must take to line up with the existing body.
///
/// That is the indent of the first code line after `anchor_line`, when it is
/// deeper than the declaration. Otherwise (no body below the header) one
/// level past the declaration, see [`body_indent`].
pub fn block_indent(lines: &[String], declaration_line: usize, anchor_line: usize) -> String {
    let Some(declaration) = lines.get(declaration_line) else {
        return INDENT_UNIT.to_string();
    };
    let outer = leading_whitespace(declaration);
    lines
        .iter()
        .skip(anchor_line + 1)
        .map(|l| l.as_str())
        .find(|l| {
            let code = l.trim_start();
            !code.is_empty() && !code.starts_with('#')
        })
        .map(leading_whitespace)
        .filter(|lead| lead.len() > outer.len() && lead.starts_with(outer))
        .map_or_else(|| body_indent(declaration), str::to_string)
}

/// Inserts `block` right after line `declaration_line` (0-based).
pub fn insert<S: AsRef<str>>(
    lines: &[String],
    declaration_line: usize,
    block: &[S],
) -> Result<Vec<String>, PatchError> {
    insert_after(lines, declaration_line, declaration_line, block)
}

/// Inserts `block` after `anchor_line`, at the indent of the declaration's
/// body (see [`block_indent`]).
///
/// The block's common leading whitespace is replaced by that indent; blank
/// block lines stay empty.
pub fn insert_after<S: AsRef<str>>(
    lines: &[String],
    declaration_line: usize,
    anchor_line: usize,
    block: &[S],
) -> Result<Vec<String>, PatchError> {
    for line in [declaration_line, anchor_line] {
        if line >= lines.len() {
            return Err(PatchError::OutOfRange {
                line,
                len: lines.len(),
            });
        }
    }
    if anchor_line < declaration_line {
        return Err(PatchError::AnchorBeforeDeclaration {
            declaration: declaration_line,
            anchor: anchor_line,
        });
    }

    let indent = block_indent(lines, declaration_line, anchor_line);
    let margin = block
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l).len())
        .min()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(lines.len() + block.len());
    out.extend_from_slice(&lines[..=anchor_line]);
    out.extend(block.iter().map(|l| {
        let l = l.as_ref();
        if l.trim().is_empty() {
            String::new()
        } else {
            format!("{indent}{}", &l[margin..])
        }
    }));
    out.extend_from_slice(&lines[anchor_line + 1..]);
    Ok(out)
}
