//! Key-path resolution.
//!
//! A key expression — bare (`port`), dotted (`server.http.port`), quoted
//! (`"a.b"`), or mixed (`site."index.html".size`) — resolves to an ordered
//! list of segment names. The same resolver serves table headers, key/value
//! bindings, and inline-table keys.

use crate::error::{Error, Result};

/// Splits a key expression into its ordered segments.
///
/// A `.` outside quotes ends the current segment; segments are trimmed and
/// empty ones dropped. A `"` or `'` opens a quoted segment whose content is
/// taken verbatim — except that inside double quotes a backslash makes the
/// following character literal (so `"a\"b"` is the segment `a"b`). Single
/// quotes get no escape handling. A quote after non-whitespace content has
/// already accumulated is an error, as is an unterminated quote.
///
/// `line` stamps any error with the logical line being processed.
pub(crate) fn parse_key_parts(s: &str, line: usize) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut cur = String::new();
    let mut in_quote: Option<char> = None;
    let mut escape = false;

    for ch in s.chars() {
        if let Some(quote) = in_quote {
            if quote == '"' && ch == '\\' && !escape {
                escape = true;
                continue;
            }
            if escape {
                cur.push(ch);
                escape = false;
                continue;
            }
            if ch == quote {
                in_quote = None;
                continue;
            }
            cur.push(ch);
            continue;
        }
        if ch == '"' || ch == '\'' {
            if !cur.trim().is_empty() {
                return Err(Error::decode(line, "invalid quoted key position"));
            }
            in_quote = Some(ch);
            cur.clear();
            continue;
        }
        if ch == '.' {
            let part = cur.trim();
            if !part.is_empty() {
                parts.push(part.to_string());
            }
            cur.clear();
            continue;
        }
        cur.push(ch);
    }

    if in_quote.is_some() {
        return Err(Error::unterminated(line, "quoted key"));
    }
    let last = cur.trim();
    if !last.is_empty() {
        parts.push(last.to_string());
    }
    Ok(parts)
}
