//! RFC 5545 line folding + TEXT escaping

/// Max oktetů na řádek včetně úvodní mezery pokračování
pub const FOLD_LIMIT: usize = 75;

/// Skládá po bajtech, ale vždy na hranici znaku (UTF-8 se nepřetrhne).
/// Pokračovací řádky začínají jednou mezerou.
pub fn fold_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::with_capacity(FOLD_LIMIT);

    for ch in line.chars() {
        if current.len() + ch.len_utf8() > FOLD_LIMIT {
            out.push(std::mem::take(&mut current));
            current.push(' ');
        }
        current.push(ch);
    }
    out.push(current);
    out
}

/// Inverze `fold_line`
pub fn unfold_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if i == 0 {
            out.push_str(line);
        } else {
            out.push_str(line.strip_prefix(' ').unwrap_or(line));
        }
    }
    out
}

pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}
