//! Scalar, array, and inline-table decoding.
//!
//! [`decode_value`] takes the full textual form of a value — possibly joined
//! from several physical lines — and produces exactly one tree node. Forms
//! are tried in a fixed priority order; the first structural match wins, so
//! a value that *looks* like a date but fails date parsing falls through to
//! the later numeric forms rather than erroring early.

use crate::error::{Error, Result};
use crate::key::parse_key_parts;
use crate::parser::open_table;
use crate::scanner::{find_unquoted_equal, strip_comment_preserve_strings, QuoteTracker};
use crate::value::{Array, Kind, Node, Table, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Decodes a value token into a node.
///
/// Priority order: triple-quoted basic string, triple-quoted literal string,
/// basic string, literal string, array, inline table, booleans, float
/// specials (`inf`/`+inf`/`-inf`/`nan`), offset date-time, the local
/// date/time variants, integer, float. Anything else is an
/// "unsupported value" decode error.
pub(crate) fn decode_value(s: &str, line: usize) -> Result<Node> {
    let stripped = strip_comment_preserve_strings(s);
    let s = stripped.trim();
    if s.is_empty() {
        return Err(Error::decode(line, "empty value"));
    }
    if s.starts_with("\"\"\"") {
        let content = extract_triple_quoted(s, b'"')
            .ok_or_else(|| Error::unterminated(line, "multiline string"))?;
        let decoded = decode_basic_string(content, true, line)?;
        return Ok(Node::Value(Value::String(decoded)));
    }
    if s.starts_with("'''") {
        let content = extract_triple_quoted(s, b'\'')
            .ok_or_else(|| Error::unterminated(line, "multiline literal string"))?;
        return Ok(Node::Value(Value::String(content.to_string())));
    }
    if s.starts_with('"') {
        let content =
            extract_single_quoted(s, b'"').ok_or_else(|| Error::unterminated(line, "string"))?;
        let decoded = decode_basic_string(content, false, line)?;
        return Ok(Node::Value(Value::String(decoded)));
    }
    if s.starts_with('\'') {
        let content = extract_single_quoted(s, b'\'')
            .ok_or_else(|| Error::unterminated(line, "literal string"))?;
        return Ok(Node::Value(Value::String(content.to_string())));
    }
    if s.starts_with('[') {
        return decode_array_token(s, line);
    }
    if s.starts_with('{') {
        return decode_inline_table_token(s, line);
    }
    if s == "true" || s == "false" {
        return Ok(Node::Value(Value::Bool(s == "true")));
    }
    if s == "inf" || s == "+inf" {
        return Ok(Node::Value(Value::Float(f64::INFINITY)));
    }
    if s == "-inf" {
        return Ok(Node::Value(Value::Float(f64::NEG_INFINITY)));
    }
    if s.eq_ignore_ascii_case("nan") {
        return Ok(Node::Value(Value::Float(f64::NAN)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Node::Value(Value::Datetime(dt)));
    }
    if let Some(node) = decode_local_datetime_variants(s) {
        return Ok(node);
    }
    if let Some(i) = decode_int_token(s) {
        return Ok(Node::Value(Value::Integer(i)));
    }
    if let Some(f) = decode_float_token(s) {
        return Ok(Node::Value(Value::Float(f)));
    }
    Err(Error::decode(line, "unsupported value"))
}

/// Extracts the inner content of a triple-quoted token, dropping a single
/// leading newline right after the opening delimiter.
fn extract_triple_quoted(s: &str, quote: u8) -> Option<&str> {
    let delim = if quote == b'"' { "\"\"\"" } else { "'''" };
    if s.len() < 6 || !s.starts_with(delim) {
        return None;
    }
    let end = s[3..].find(delim)?;
    let content = &s[3..3 + end];
    Some(content.strip_prefix('\n').unwrap_or(content))
}

fn extract_single_quoted(s: &str, quote: u8) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != quote || bytes[bytes.len() - 1] != quote {
        return None;
    }
    Some(&s[1..s.len() - 1])
}

/// Decodes the escape sequences of a basic (double-quoted) string.
///
/// For the multi-line form, a backslash immediately before a newline first
/// folds away that newline and any following spaces/tabs.
fn decode_basic_string(s: &str, multiline: bool, line: usize) -> Result<String> {
    let folded;
    let s = if multiline {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '\\' && chars.peek() == Some(&'\n') {
                chars.next();
                while matches!(chars.peek(), Some(&' ') | Some(&'\t')) {
                    chars.next();
                }
                continue;
            }
            out.push(ch);
        }
        folded = out;
        folded.as_str()
    } else {
        s
    };

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{0008}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(decode_unicode_escape(&mut chars, 4, line)?),
            Some('U') => out.push(decode_unicode_escape(&mut chars, 8, line)?),
            Some(_) => return Err(Error::decode(line, "unsupported escape")),
            None => return Err(Error::decode(line, "invalid escape")),
        }
    }
    Ok(out)
}

fn decode_unicode_escape(chars: &mut std::str::Chars<'_>, digits: u32, line: usize) -> Result<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| Error::decode(line, "invalid unicode escape"))?;
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or_else(|| Error::decode(line, "invalid unicode escape"))
}

/// Splits `s` on `sep` at positions outside every quote and bracket nesting
/// level. Each piece comes back trimmed; a trailing separator yields no
/// final piece.
fn split_top_level(s: &str, sep: u8) -> Vec<String> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut tracker = QuoteTracker::new();
    let mut square = 0i64;
    let mut curly = 0i64;
    let mut seg_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let (next, structural) = tracker.step(bytes, i);
        if structural {
            match bytes[i] {
                b'[' => square += 1,
                b']' => square -= 1,
                b'{' => curly += 1,
                b'}' => curly -= 1,
                b if b == sep && square == 0 && curly == 0 => {
                    parts.push(s[seg_start..i].trim().to_string());
                    seg_start = i + 1;
                }
                _ => {}
            }
        }
        i = next;
    }
    if seg_start < s.len() {
        parts.push(s[seg_start..].trim().to_string());
    }
    parts
}

/// Decodes a literal `[...]` token, enforcing element homogeneity.
fn decode_array_token(s: &str, line: usize) -> Result<Node> {
    let stripped = strip_comment_preserve_strings(s);
    let content = stripped.trim();
    if content.len() < 2 || !content.starts_with('[') || !content.ends_with(']') {
        return Err(Error::decode(line, "invalid array"));
    }
    let inner = content[1..content.len() - 1].trim();

    let mut elems = Vec::new();
    let mut elem_kind: Option<Kind> = None;
    for part in split_top_level(inner, b',') {
        if part.is_empty() {
            continue;
        }
        let node = decode_value(&part, line)?;
        match elem_kind {
            None => elem_kind = Some(node.kind()),
            Some(kind) if node.kind() != kind => {
                return Err(Error::decode(line, "mixed-type array"));
            }
            Some(_) => {}
        }
        elems.push(node);
    }
    Ok(Node::Array(Array::from(elems)))
}

/// Decodes a `{...}` inline-table token against a fresh table, with the same
/// duplicate-key and table-extension rules as top-level bindings.
fn decode_inline_table_token(s: &str, line: usize) -> Result<Node> {
    let stripped = strip_comment_preserve_strings(s);
    let content = stripped.trim();
    if content.len() < 2 || !content.starts_with('{') || !content.ends_with('}') {
        return Err(Error::decode(line, "invalid inline table"));
    }
    let inner = content[1..content.len() - 1].trim();

    let mut table = Table::new();
    for pair in split_top_level(inner, b',') {
        if pair.is_empty() {
            continue;
        }
        let idx = find_unquoted_equal(&pair)
            .ok_or_else(|| Error::syntax(line, "invalid inline table kv"))?;
        let key = pair[..idx].trim();
        let value_text = pair[idx + 1..].trim();

        let parts = parse_key_parts(key, line)?;
        let Some((last, intermediate)) = parts.split_last() else {
            return Err(Error::decode(line, "empty key"));
        };
        let mut cur = &mut table;
        for part in intermediate {
            cur = open_table(cur, part, line)?;
        }
        if cur.items().contains_key(last) {
            return Err(Error::duplicate_key(line, last));
        }
        let node = decode_value(value_text, line)?;
        cur.items_mut().insert(last.clone(), node);
    }
    Ok(Node::Table(table))
}

fn decode_local_datetime_variants(s: &str) -> Option<Node> {
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(Node::Value(Value::LocalDatetime(dt)));
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Node::Value(Value::LocalDate(d)));
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S%.f") {
        return Some(Node::Value(Value::LocalTime(t)));
    }
    None
}

/// Parses an integer literal: underscores stripped anywhere, then an
/// optionally signed `0x`/`0o`/`0b` prefix selecting base 16/8/2 over the
/// remaining unsigned digits (sign applied afterward, wrapping), else signed
/// base-10.
fn decode_int_token(s: &str) -> Option<i64> {
    let s = s.replace('_', "");
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(&s)),
    };
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = body.strip_prefix(prefix) {
            let v = u64::from_str_radix(digits, radix).ok()? as i64;
            return Some(if negative { v.wrapping_neg() } else { v });
        }
    }
    s.parse().ok()
}

fn decode_float_token(s: &str) -> Option<f64> {
    s.replace('_', "").parse().ok()
}
