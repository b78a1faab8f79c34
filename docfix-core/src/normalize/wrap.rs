/// Greedy word wrap within `width` columns, counted in chars including the
/// prefixes. `first` prefixes the first output line, `rest` the others.
///
/// A word longer than the room left after the prefix is split across lines.
pub fn wrap(text: &str, first: &str, rest: &str, width: usize) -> Vec<String> {
    let room = |line_no: usize| {
        let prefix = if line_no == 0 { first } else { rest };
        width.saturating_sub(prefix.chars().count()).max(1)
    };

    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let limit = room(out.len());
            let word_len = word.chars().count();
            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if needed <= limit {
                if current_len > 0 {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = needed;
                break;
            }
            if current_len > 0 {
                flush(&mut out, first, rest, &mut current, &mut current_len);
                continue;
            }

            let split_at = word
                .char_indices()
                .nth(limit)
                .map_or(word.len(), |(i, _)| i);
            current.push_str(&word[..split_at]);
            flush(&mut out, first, rest, &mut current, &mut current_len);
            word = &word[split_at..];
            if word.is_empty() {
                break;
            }
        }
    }
    if current_len > 0 {
        flush(&mut out, first, rest, &mut current, &mut current_len);
    }
    out
}

fn flush(out: &mut Vec<String>, first: &str, rest: &str, current: &mut String, len: &mut usize) {
    let prefix = if out.is_empty() { first } else { rest };
    out.push(format!("{prefix}{current}"));
    current.clear();
    *len = 0;
}
