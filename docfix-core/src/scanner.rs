//! Finds functions, methods and classes whose body does not open with a docstring.

use std::path::Path;

use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use crate::errors::ScanError;
use crate::model::{Declaration, DeclarationKind, Issue};

/// Parses `source` and reports every declaration missing a docstring,
/// ordered by start line.
///
/// Invalid syntax yields [`ScanError::Syntax`] pointing at the first error
/// node; no partial results are returned. Besides tree-sitter errors this
/// covers Python 2 `print`/`exec` statements and statements of one block that
/// start at different columns, which the grammar tolerates.
pub fn scan(source: &str, path: &Path) -> Result<Vec<Issue>, ScanError> {
    let language: Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language)?;

    let tree = parser.parse(source, None).ok_or_else(|| ScanError::NoTree {
        path: path.to_path_buf(),
    })?;
    let root = tree.root_node();

    let invalid = if root.has_error() {
        Some(first_error(root).unwrap_or(root))
    } else {
        first_rejected(root, source)
    };
    if let Some(node) = invalid {
        let at = node.start_position();
        return Err(ScanError::Syntax {
            path: path.to_path_buf(),
            line: at.row + 1,
            column: at.column + 1,
        });
    }

    let mut issues = Vec::new();
    // (node, qualified-name prefix for declarations below it)
    let mut stack: Vec<(Node, String)> = vec![(root, String::new())];

    while let Some((node, prefix)) = stack.pop() {
        let mut child_prefix = prefix.clone();

        if let Some(kind) = declaration_kind(node) {
            if let Some(decl) = read_declaration(node, kind, &prefix, source) {
                child_prefix = match kind {
                    DeclarationKind::Class => format!("{}.", decl.qualified_name),
                    DeclarationKind::Function | DeclarationKind::AsyncFunction => {
                        format!("{}.<locals>.", decl.qualified_name)
                    }
                };
                if !has_docstring(node, source) {
                    issues.push(Issue {
                        declaration: decl,
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push((child, child_prefix.clone()));
        }
    }

    issues.sort_by_key(|i| i.declaration.start_line);
    debug!(path = %path.display(), issues = issues.len(), "scan complete");
    Ok(issues)
}

fn declaration_kind(node: Node) -> Option<DeclarationKind> {
    match node.kind() {
        "class_definition" => Some(DeclarationKind::Class),
        "async_function_definition" => Some(DeclarationKind::AsyncFunction),
        "function_definition" => {
            let mut cursor = node.walk();
            let is_async = node.children(&mut cursor).any(|c| c.kind() == "async");
            Some(if is_async {
                DeclarationKind::AsyncFunction
            } else {
                DeclarationKind::Function
            })
        }
        _ => None,
    }
}

fn read_declaration(
    node: Node,
    kind: DeclarationKind,
    prefix: &str,
    source: &str,
) -> Option<Declaration> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()?
        .to_string();
    let body = node.child_by_field_name("body")?;

    // The header-closing colon is a direct child; colons inside parameters
    // or annotations live deeper in the tree.
    let mut cursor = node.walk();
    let colon_row = node
        .children(&mut cursor)
        .filter(|c| c.kind() == ":" && c.start_byte() < body.start_byte())
        .last()
        .map(|c| c.start_position().row)
        .unwrap_or_else(|| body.start_position().row);

    let mut cursor = body.walk();
    let inline_body = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")
        .is_some_and(|first| first.start_position().row == colon_row);

    Some(Declaration {
        qualified_name: format!("{prefix}{name}"),
        name,
        kind,
        start_line: node.start_position().row + 1,
        header_end_line: colon_row + 1,
        inline_body,
    })
}

/// True when the first non-comment statement of the body is a lone plain
/// string literal. f-strings, t-strings and bytes do not count.
fn has_docstring(node: Node, source: &str) -> bool {
    let Some(body) = node.child_by_field_name("body") else {
        return false;
    };
    let mut cursor = body.walk();
    let Some(stmt) = body.named_children(&mut cursor).find(|c| c.kind() != "comment") else {
        return false;
    };
    if stmt.kind() != "expression_statement" || stmt.named_child_count() != 1 {
        return false;
    }

    let mut cursor = stmt.walk();
    let Some(expr) = stmt.named_children(&mut cursor).next() else {
        return false;
    };
    match expr.kind() {
        "string" => is_plain_string(expr, source),
        "concatenated_string" => {
            let mut cursor = expr.walk();
            expr.named_children(&mut cursor)
                .filter(|s| s.kind() != "comment")
                .all(|s| s.kind() == "string" && is_plain_string(s, source))
        }
        _ => false,
    }
}

fn is_plain_string(node: Node, source: &str) -> bool {
    let text = &source[node.byte_range()];
    let prefix: String = text
        .chars()
        .take_while(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .to_ascii_lowercase();
    !prefix.contains(['f', 'b', 't'])
}

/// First node (document order) that tree-sitter accepts but Python does not.
fn first_rejected<'t>(root: Node<'t>, source: &str) -> Option<Node<'t>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "print_statement" | "exec_statement" => return Some(node),
            "module" | "block" => {
                if let Some(stray) = misaligned_statement(node, source) {
                    return Some(stray);
                }
            }
            _ => {}
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// A statement of `block` that opens its line at a different column than
/// the block's first such statement.
fn misaligned_statement<'t>(block: Node<'t>, source: &str) -> Option<Node<'t>> {
    let mut column = None;
    let mut cursor = block.walk();
    for stmt in block.named_children(&mut cursor) {
        if stmt.kind() == "comment" || !opens_line(stmt, source) {
            continue;
        }
        let at = stmt.start_position().column;
        match column {
            None => column = Some(at),
            Some(expected) if expected != at => return Some(stmt),
            Some(_) => {}
        }
    }
    None
}

fn opens_line(node: Node, source: &str) -> bool {
    let before = &source[..node.start_byte()];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    before[line_start..].trim().is_empty()
}

/// Depth-first search (document order) for the first ERROR or MISSING node.
fn first_error(root: Node) -> Option<Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan_str(src: &str) -> Vec<Declaration> {
        scan(src, Path::new("t.py"))
            .unwrap()
            .into_iter()
            .map(|i| i.declaration)
            .collect()
    }

    fn names(src: &str) -> Vec<String> {
        scan_str(src).into_iter().map(|d| d.qualified_name).collect()
    }

    #[test]
    fn reports_simple_function() {
        let decls = scan_str("def add(a, b):\n    return a+b\n");
        assert_eq!(decls.len(), 1);
        let d = &decls[0];
        assert_eq!(d.name, "add");
        assert_eq!(d.kind, DeclarationKind::Function);
        assert_eq!(d.start_line, 1);
        assert_eq!(d.header_end_line, 1);
        assert!(!d.inline_body);
    }

    #[test]
    fn documented_declarations_are_skipped() {
        let src = "\
def f():
    \"\"\"Already documented.\"\"\"
    return 1

class C:
    # leading comment
    'single quoted docstring'

def g():
    r\"\"\"Raw docstring.\"\"\"
";
        assert!(scan_str(src).is_empty());
    }

    #[test]
    fn f_strings_and_bytes_are_not_docstrings() {
        let src = "\
def f(x):
    f\"value {x}\"

def g():
    b\"raw\"

def h():
    x = \"not first\"
";
        assert_eq!(names(src), vec!["f", "g", "h"]);
    }

    #[test]
    fn nested_declarations_get_qualified_names() {
        let src = "\
class Outer:
    def method(self):
        def helper():
            class Local:
                pass
            return Local
        return helper

    async def fetch(self):
        pass
";
        assert_eq!(
            names(src),
            vec![
                "Outer",
                "Outer.method",
                "Outer.method.<locals>.helper",
                "Outer.method.<locals>.helper.<locals>.Local",
                "Outer.fetch",
            ]
        );
        let fetch = scan_str(src).into_iter().last().unwrap();
        assert_eq!(fetch.kind, DeclarationKind::AsyncFunction);
        assert_eq!(fetch.start_line, 9);
    }

    #[test]
    fn decorated_definition_reports_def_line() {
        let src = "\
@cache
@other(1)
def slow(n):
    return n
";
        let d = &scan_str(src)[0];
        assert_eq!(d.start_line, 3);
    }

    #[test]
    fn multi_line_signature_records_header_end() {
        let src = "\
def build(
    name: str,
    size: int = 3,
) -> dict:
    return {}
";
        let d = &scan_str(src)[0];
        assert_eq!(d.start_line, 1);
        assert_eq!(d.header_end_line, 4);
    }

    #[test]
    fn one_line_body_is_flagged_inline() {
        let d = &scan_str("def f(): return 1\n")[0];
        assert!(d.inline_body);
    }

    #[test]
    fn syntax_error_reports_location() {
        let err = scan("def broken(:\n    pass\n", Path::new("bad.py")).unwrap_err();
        match err {
            ScanError::Syntax { path, line, .. } => {
                assert_eq!(path, Path::new("bad.py"));
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn syntax_line(src: &str) -> usize {
        match scan(src, Path::new("t.py")) {
            Err(ScanError::Syntax { line, .. }) => line,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn python2_statements_are_rejected() {
        assert_eq!(syntax_line("def f():\n    print \"hi\"\n"), 2);
        assert_eq!(syntax_line("x = 1\nexec \"y = 2\"\n"), 2);
        assert_eq!(names("def f():\n    print(\"hi\")\n    exec(code)\n"), vec!["f"]);
    }

    #[test]
    fn inconsistent_dedent_is_rejected() {
        let src = "def f():\n  x = 1\n    \"\"\"\n    Doc.\n    \"\"\"\n";
        assert_eq!(syntax_line(src), 3);
    }

    #[test]
    fn same_line_statements_do_not_count_as_misaligned() {
        let src = "def f():\n    x = 1; y = 2\n    # odd comment\n  # another\n    return x\n";
        assert_eq!(names(src), vec!["f"]);
    }

    #[test]
    fn unbalanced_brackets_yield_no_issues() {
        assert!(scan("def f(:\n  x = [1, 2\n", Path::new("x.py")).is_err());
    }
}
