//! Prompt builder: short system message + marked target + optional background.

use std::fmt::Write as _;

use docfix_core::DeclarationKind;

use crate::generator::GenerationRequest;

/// System instructions shared by every request.
pub const DEFAULT_SYSTEM: &str = "You are a senior Python developer writing docstrings. \
Describe behaviour accurately from the code shown. Reply with the docstring text only.";

pub const FILE_CONTEXT_START: &str = "=== FILE CONTEXT (background only, do not document) ===";
pub const FILE_CONTEXT_END: &str = "=== END FILE CONTEXT ===";

/// Builds the user prompt for one declaration.
///
/// The target window is always included in full. The file background is cut
/// to `max_file_chars` bytes on a char boundary and omitted when the budget
/// is zero.
pub fn build_user_prompt(
    request: &GenerationRequest<'_>,
    max_line_width: usize,
    max_file_chars: usize,
) -> String {
    let decl = request.declaration;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Write a Python docstring for this {} (`{}`).",
        decl.kind, decl.qualified_name
    );
    out.push('\n');
    out.push_str(&request.window.render());
    out.push_str("\n\nRequirements:\n");
    out.push_str("- Use Google-style format\n");
    let _ = writeln!(out, "- Keep lines under {max_line_width} characters");
    match decl.kind {
        DeclarationKind::Class => out.push_str("- Include Attributes if applicable\n"),
        DeclarationKind::Function | DeclarationKind::AsyncFunction => {
            out.push_str("- Include Args, Returns, Raises if applicable\n")
        }
    }
    out.push_str("- Be concise and clear\n");
    out.push_str("- Output only the docstring text, no quotes or code blocks\n");

    if let Some(text) = request.file_text.filter(|_| max_file_chars > 0) {
        let text = text.trim_end();
        let cut = safe_truncate(text, max_file_chars);
        out.push_str("- Document only the target between the markers above\n\n");
        out.push_str(FILE_CONTEXT_START);
        out.push('\n');
        out.push_str(cut);
        if cut.len() < text.len() {
            out.push_str("\n...");
        }
        out.push('\n');
        out.push_str(FILE_CONTEXT_END);
        out.push('\n');
    }

    out
}

fn safe_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}
