// src/core/intake.rs
//! Snapshot intake: JSON envelope -> call expression -> string literal -> markup -> [`Document`].
//!
//! The payload looks like `popUpInfoWindow("<div class=\"infobox\">…", 51.5, -0.12, …)`.
//! Only the first string-literal argument matters. It is recovered by scanning text,
//! never by evaluating the expression.

use std::{fs, path::Path};

use serde_json::Value;

use super::dom::Document;
use crate::error::IntakeError;

/// Read one snapshot file and parse its markup.
pub fn load_snapshot(path: &Path, key: &str) -> Result<Document, IntakeError> {
    let text = fs::read_to_string(path).map_err(|source| IntakeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let markup = markup_from_snapshot(&text, key)?;
    Ok(Document::parse(&markup))
}

/// Envelope text to raw markup, without parsing.
pub fn markup_from_snapshot(text: &str, key: &str) -> Result<String, IntakeError> {
    let call = payload_from_envelope(text, key)?;
    first_string_argument(&call)
}

/// Pull the call expression out of the JSON envelope.
/// Uses `key` when present, otherwise the first string-valued field.
pub fn payload_from_envelope(text: &str, key: &str) -> Result<String, IntakeError> {
    let envelope: Value = serde_json::from_str(text)?;
    let obj = envelope
        .as_object()
        .ok_or_else(|| IntakeError::MissingPayload(s!(key)))?;

    obj.get(key)
        .and_then(Value::as_str)
        .or_else(|| obj.values().find_map(Value::as_str))
        .map(str::to_owned)
        .ok_or_else(|| IntakeError::MissingPayload(s!(key)))
}

/// First string-literal argument of `callee(<literal>, …)`, unescaped.
pub fn first_string_argument(call: &str) -> Result<String, IntakeError> {
    let open = call.find('(').ok_or(IntakeError::NoLiteral)?;
    let after = &call[open + 1..];
    let lead = after.len() - after.trim_start().len();
    let start = open + 1 + lead;

    let quote = match call[start..].chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(IntakeError::NoLiteral),
    };

    let body_start = start + 1;
    let mut escaped = false;
    let mut end = None;
    for (i, ch) in call[body_start..].char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            end = Some(body_start + i);
            break;
        }
    }
    let end = end.ok_or(IntakeError::UnterminatedLiteral(start))?;

    unescape(&call[body_start..end]).map_err(|rel| IntakeError::BadEscape(body_start + rel))
}

/// Resolve script string escapes. `Err` carries the byte offset of the bad escape.
pub fn unescape(body: &str) -> Result<String, usize> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((i, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let (_, esc) = chars.next().ok_or(i)?;
        match esc {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // line continuation
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                let mut look = chars.clone();
                if matches!(look.next(), Some((_, '\n'))) {
                    chars = look;
                }
            }
            'x' => {
                let code = hex_digits(&mut chars, 2).ok_or(i)?;
                out.push(char::from_u32(code).ok_or(i)?);
            }
            'u' => out.push(unicode_escape(&mut chars).ok_or(i)?),
            // \" \' \\ \/ and anything else: the character itself
            other => out.push(other),
        }
    }
    Ok(out)
}

fn hex_digits(chars: &mut std::str::CharIndices<'_>, n: usize) -> Option<u32> {
    let mut code = 0u32;
    for _ in 0..n {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}

/// After `\u`: either `{H…}` or four hex digits, pairing UTF-16 surrogates.
fn unicode_escape(chars: &mut std::str::CharIndices<'_>) -> Option<char> {
    let mut look = chars.clone();
    if matches!(look.next(), Some((_, '{'))) {
        let mut code = 0u32;
        let mut digits = 0;
        loop {
            let (_, c) = look.next()?;
            if c == '}' { break; }
            code = code.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
            digits += 1;
        }
        if digits == 0 { return None; }
        *chars = look;
        return char::from_u32(code);
    }

    let hi = hex_digits(chars, 4)?;
    if !(0xD800..=0xDBFF).contains(&hi) {
        // Lone low surrogates have no char; keep the document going.
        return Some(char::from_u32(hi).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    let mut look = chars.clone();
    let pair = match (look.next(), look.next()) {
        (Some((_, '\\')), Some((_, 'u'))) => hex_digits(&mut look, 4),
        _ => None,
    };
    match pair {
        Some(lo) if (0xDC00..=0xDFFF).contains(&lo) => {
            *chars = look;
            char::from_u32(0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00))
        }
        _ => Some(char::REPLACEMENT_CHARACTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_literal_and_drops_other_arguments() {
        let call = r#"popUpInfoWindow("<div class=\"infobox_name\">Hill \"Top\" School</div>", 51.5, -0.12, "ignored")"#;
        let markup = first_string_argument(call).unwrap();
        assert_eq!(markup, r#"<div class="infobox_name">Hill "Top" School</div>"#);
    }

    #[test]
    fn escaped_backslash_before_quote_ends_literal() {
        let call = r#"f("a\\", "b")"#;
        assert_eq!(first_string_argument(call).unwrap(), "a\\");
    }

    #[test]
    fn single_quoted_literal_and_leading_space() {
        let call = r#"f(  'it\'s <b>ok</b>', 1)"#;
        assert_eq!(first_string_argument(call).unwrap(), "it's <b>ok</b>");
    }

    #[test]
    fn unicode_hex_and_control_escapes() {
        assert_eq!(unescape(r"∞% \x41\n\/").unwrap(), "∞% A\n/");
        assert_eq!(unescape(r"\uD83C\uDFEB").unwrap(), "🏫");
        assert_eq!(unescape(r"\u00e9cole").unwrap(), "école");
        assert_eq!(unescape(r"\u{1F3EB}").unwrap(), "🏫");
    }

    #[test]
    fn malformed_escapes_are_errors() {
        assert_eq!(unescape(r"ab\x4"), Err(2));
        assert!(unescape("trailing\\").is_err());
        assert!(matches!(
            first_string_argument(r#"f("never closed"#),
            Err(IntakeError::UnterminatedLiteral(2))
        ));
    }

    #[test]
    fn no_call_or_no_literal() {
        assert!(matches!(first_string_argument("plain text"), Err(IntakeError::NoLiteral)));
        assert!(matches!(first_string_argument("f(42, \"x\")"), Err(IntakeError::NoLiteral)));
    }

    #[test]
    fn envelope_key_then_fallback() {
        let env = r#"{"d": "f(\"<p>x</p>\")"}"#;
        assert_eq!(payload_from_envelope(env, "d").unwrap(), r#"f("<p>x</p>")"#);

        let other = r#"{"n": 3, "payload": "f('y')"}"#;
        assert_eq!(payload_from_envelope(other, "d").unwrap(), "f('y')");

        assert!(matches!(payload_from_envelope("[1,2]", "d"), Err(IntakeError::MissingPayload(_))));
        assert!(matches!(payload_from_envelope("{not json", "d"), Err(IntakeError::Envelope(_))));
    }
}
