//! Escaping for quoted attribute values.
//!
//! `"` becomes `\"`, `\` becomes `\\`, and newline, tab and carriage return
//! become `\n`, `\t` and `\r`. Unknown sequences are left untouched when
//! unescaping, which keeps `unescape_value(&escape_value(s)) == s` for every
//! string.

pub fn escape_value(raw: &str) -> String {
    if !raw.contains(['"', '\\', '\n', '\t', '\r']) {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

pub fn unescape_value(escaped: &str) -> String {
    if !escaped.contains('\\') {
        return escaped.to_string();
    }
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_controls() {
        assert_eq!(escape_value(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_value("a\\b"), "a\\\\b");
        assert_eq!(escape_value("line\nnext\ttab\r"), "line\\nnext\\ttab\\r");
        assert_eq!(escape_value("plain"), "plain");
    }

    #[test]
    fn unknown_sequences_survive() {
        assert_eq!(unescape_value("C:\\path"), "C:\\path");
        assert_eq!(unescape_value("trailing\\"), "trailing\\");
    }

    #[test]
    fn unescape_inverts_escape_over_ascii() {
        let mut samples: Vec<String> = (0u8..128).map(|b| (b as char).to_string()).collect();
        samples.push(String::new());
        samples.push("\\\"".to_string());
        samples.push("\\\\n".to_string());
        samples.push("quote\" then \\n literal".to_string());
        samples.push((0u8..128).map(|b| b as char).collect());
        samples.push("ünïcødé \u{1F600}".to_string());
        for sample in samples {
            assert_eq!(unescape_value(&escape_value(&sample)), sample, "{sample:?}");
        }
    }
}
