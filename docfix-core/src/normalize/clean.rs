//! Removes fences and quote markers from raw generator output.

/// Returns the docstring body lines of `raw`, trimmed of outer blank lines.
///
/// Fence lines are dropped first. When a line opens with a `"""` or `'''`
/// marker, only the text between it and the next identical marker is kept, so
/// echoed code and repeated docstrings fall away.
pub fn extract_body(raw: &str) -> Vec<String> {
    let unfenced: Vec<&str> = raw
        .lines()
        .filter(|l| !l.trim_start().starts_with("```"))
        .collect();
    let text = unfenced.join("\n");

    let inner = match first_marker(&text) {
        Some((start, marker)) => {
            let after = &text[start + marker.len()..];
            match after.find(marker) {
                Some(end) => &after[..end],
                None => after,
            }
        }
        None => text.as_str(),
    };

    let mut lines: Vec<String> = dedent(inner)
        .into_iter()
        .map(|l| l.trim_end().to_string())
        .collect();

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Byte offset and text of the first triple-quote marker that opens a line,
/// optionally after a string prefix such as `r` or `u`. Quotes inside prose
/// are not delimiters.
fn first_marker(text: &str) -> Option<(usize, &'static str)> {
    let mut offset = 0;
    for line in text.split('\n') {
        let trimmed = line.trim_start();
        let rest = trimmed.trim_start_matches(['r', 'R', 'u', 'U']);
        if trimmed.len() - rest.len() <= 2 {
            for marker in ["\"\"\"", "'''"] {
                if rest.starts_with(marker) {
                    return Some((offset + line.len() - rest.len(), marker));
                }
            }
        }
        offset += line.len() + 1;
    }
    None
}

/// Strips the common indentation of every line after the first, the way
/// docstrings are conventionally cleaned.
fn dedent(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.split('\n').collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim_start()
            } else if l.trim().is_empty() {
                ""
            } else {
                &l[margin..]
            }
        })
        .collect()
}
