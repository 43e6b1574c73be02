//! Content line tokenising.
//!
//! Format: `[group.]name[;param[=value[,value]*]]*:value`

use super::escape::decode_caret;
use crate::error::{VCardError, VCardResult};

/// A parameter as written. Nameless parameters (vCard 2.1 `TEL;HOME:`) have
/// no name.
pub type RawParameter = (Option<String>, Vec<String>);

/// A parsed content line before value interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name as written.
    pub name: String,
    pub params: Vec<RawParameter>,
    /// Raw value string, still escaped.
    pub value: String,
}

/// Parses a single unfolded content line into its components.
///
/// With `caret` set, parameter values are decoded per RFC 6868.
///
/// ## Errors
/// Returns `VCardError::Syntax` if the colon separator is missing or the
/// group, property or parameter name is not a valid token.
pub fn parse_content_line(line: &str, line_num: usize, caret: bool) -> VCardResult<ContentLine> {
    let colon_pos = find_unquoted(line, ':')
        .ok_or_else(|| VCardError::syntax(line_num, "missing colon separator"))?;

    let (head, value) = line.split_at(colon_pos);
    let value = &value[1..];

    let (qualified_name, params_str) = match head.split_once(';') {
        Some((name, params)) => (name, Some(params)),
        None => (head, None),
    };

    let (group, name) = match qualified_name.split_once('.') {
        Some((group, name)) => (Some(group), name),
        None => (None, qualified_name),
    };

    if let Some(group) = group
        && !is_token(group)
    {
        return Err(VCardError::syntax(line_num, format!("invalid group: {group}")));
    }
    if !is_token(name) {
        return Err(VCardError::syntax(
            line_num,
            format!("invalid property name: {name}"),
        ));
    }

    let params = match params_str {
        Some(params_str) => parse_parameters(params_str, line_num, caret)?,
        None => Vec::new(),
    };

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_string(),
        params,
        value: value.to_string(),
    })
}

/// Whether `s` may be written as a group, property or parameter name.
#[must_use]
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Finds the first `target` outside double quotes.
fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if c == target && !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Splits `s` on every `separator` outside double quotes.
fn split_unquoted(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;

    while let Some(pos) = find_unquoted(rest, separator) {
        parts.push(&rest[..pos]);
        rest = &rest[pos + separator.len_utf8()..];
    }
    parts.push(rest);

    parts
}

fn parse_parameters(s: &str, line_num: usize, caret: bool) -> VCardResult<Vec<RawParameter>> {
    let mut params = Vec::new();

    for segment in split_unquoted(s, ';') {
        if segment.is_empty() {
            continue;
        }

        match find_unquoted(segment, '=') {
            Some(eq_pos) => {
                let name = &segment[..eq_pos];
                if !is_token(name) {
                    return Err(VCardError::syntax(
                        line_num,
                        format!("invalid parameter name: {name}"),
                    ));
                }
                let values = parse_param_values(&segment[eq_pos + 1..], caret);
                params.push((Some(name.to_string()), values));
            }
            None => params.push((None, parse_param_values(segment, caret))),
        }
    }

    Ok(params)
}

/// Parses parameter values (comma-separated, possibly quoted).
///
/// An empty value list (`X=`) yields a single empty value.
fn parse_param_values(s: &str, caret: bool) -> Vec<String> {
    split_unquoted(s, ',')
        .into_iter()
        .map(|value| {
            let unquoted: String = value.chars().filter(|&c| c != '"').collect();
            if caret {
                decode_caret(&unquoted)
            } else {
                unquoted
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, values: &[&str]) -> RawParameter {
        (
            Some(name.to_owned()),
            values.iter().map(|v| (*v).to_owned()).collect(),
        )
    }

    #[test]
    fn simple_line() {
        let line = parse_content_line("FN:John Doe", 1, true).expect("valid line");

        assert_eq!(line.group, None);
        assert_eq!(line.name, "FN");
        assert!(line.params.is_empty());
        assert_eq!(line.value, "John Doe");
    }

    #[test]
    fn group_and_parameters() {
        let line = parse_content_line("item1.EMAIL;TYPE=work,home;PREF=1:j@example.com", 1, true)
            .expect("valid line");

        assert_eq!(line.group.as_deref(), Some("item1"));
        assert_eq!(line.name, "EMAIL");
        assert_eq!(
            line.params,
            vec![named("TYPE", &["work", "home"]), named("PREF", &["1"])]
        );
        assert_eq!(line.value, "j@example.com");
    }

    #[test]
    fn quoted_values_may_hold_separators() {
        let line = parse_content_line("NOTE;X-A=\"a:b;c,d\";PID=1.1:v", 1, true).expect("valid line");

        assert_eq!(line.params, vec![named("X-A", &["a:b;c,d"]), named("PID", &["1.1"])]);
        assert_eq!(line.value, "v");
    }

    #[test]
    fn caret_decoding_depends_on_version() {
        let line = parse_content_line("NOTE;X-Q=\"say ^'hi^'\":v", 1, true).expect("valid line");
        assert_eq!(line.params, vec![named("X-Q", &["say \"hi\""])]);

        let line = parse_content_line("NOTE;X-Q=a^nb:v", 1, false).expect("valid line");
        assert_eq!(line.params, vec![named("X-Q", &["a^nb"])]);
    }

    #[test]
    fn nameless_parameters() {
        let line = parse_content_line("TEL;HOME;VOICE:555", 1, false).expect("valid line");

        assert_eq!(
            line.params,
            vec![
                (None, vec!["HOME".to_owned()]),
                (None, vec!["VOICE".to_owned()])
            ]
        );
    }

    #[test]
    fn empty_parameter_value_is_kept() {
        let line = parse_content_line("NOTE;X-EMPTY=:v", 1, true).expect("valid line");
        assert_eq!(line.params, vec![named("X-EMPTY", &[""])]);
    }

    #[test]
    fn value_may_contain_colons() {
        let line = parse_content_line("URL:https://example.com:8080/", 1, true).expect("valid line");
        assert_eq!(line.value, "https://example.com:8080/");
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(
            parse_content_line("no colon here", 4, true),
            Err(VCardError::Syntax { line: 4, .. })
        ));
        assert!(parse_content_line(":value", 1, true).is_err());
        assert!(parse_content_line("BAD NAME:value", 1, true).is_err());
        assert!(parse_content_line("NOTE;BAD NAME=x:value", 1, true).is_err());
    }
}
