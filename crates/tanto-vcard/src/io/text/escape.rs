//! vCard text and parameter escaping.

/// Escapes a text value for vCard serialization.
///
/// Escapes backslash, newline, comma, and semicolon.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {} // Skip CR (use \n for newlines)
            _ => result.push(c),
        }
    }

    result
}

/// Reverses [`escape_text`]. Unknown escapes are kept as written.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(escaped @ ('\\' | ',' | ';')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Splits `s` on every `separator` not preceded by a backslash escape.
/// The pieces keep their escapes.
#[must_use]
pub fn split_escaped(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            _ if c == separator => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);

    parts
}

/// Escapes a parameter value for vCard serialization.
///
/// With `caret` set, uses RFC 6868 caret encoding for special characters.
/// vCard 2.1 has no escape mechanism, so without it characters that cannot
/// be represented are dropped.
/// Returns `(value, needs_quotes)`.
#[must_use]
pub fn escape_param_value(s: &str, caret: bool) -> (String, bool) {
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' if caret => result.push_str("^^"),
            '\n' if caret => result.push_str("^n"),
            '"' if caret => {
                result.push_str("^'");
                needs_quotes = true;
            }
            '"' => {}
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            _ if c.is_control() => {
                // Skip other control characters
            }
            _ => result.push(c),
        }
    }

    (result, needs_quotes)
}

/// Decodes RFC 6868 caret escapes. Unknown escapes are kept as written.
#[must_use]
pub fn decode_caret(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '^' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => result.push('^'),
            Some('n' | 'N') => result.push('\n'),
            Some('\'') => result.push('"'),
            _ => {
                result.push('^');
                continue;
            }
        }
        chars.next();
    }

    result
}
