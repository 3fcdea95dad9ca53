//! Document parsing: table headers, key/value bindings, tree construction.
//!
//! The parser walks the input one logical line at a time. A line is either a
//! table header (`[path]` / `[[path]]`), which repositions the current-table
//! cursor, or a key/value binding applied at that cursor. The cursor is an
//! explicit path of steps re-resolved from the root for each binding — there
//! is no ambient mutable state, and a finished table is never rewritten by a
//! later cursor move.

use crate::decode::decode_value;
use crate::error::{Error, Result};
use crate::key::parse_key_parts;
use crate::scanner::{find_unquoted_equal, strip_comment_preserve_strings, Scanner};
use crate::value::{Array, Node, Table};

/// One step of the current-table cursor. The array form only ever appears as
/// the final step: an array-of-tables header targets the table it just
/// appended.
#[derive(Clone, Debug)]
enum Step {
    Key(String),
    ArrayElem(String, usize),
}

/// Parses a complete document into its root table.
///
/// Stops at the first error; no partial tree is returned.
pub(crate) fn parse_document(input: &str) -> Result<Table> {
    let mut scanner = Scanner::new(input);
    let mut root = Table::new();
    let mut cursor: Vec<Step> = Vec::new();

    while let Some(raw) = scanner.next_line() {
        let line_no = scanner.line_no();
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            cursor = apply_table_header(&mut root, line, line_no)?;
        } else {
            let idx = find_unquoted_equal(line)
                .ok_or_else(|| Error::syntax(line_no, "invalid syntax"))?;
            apply_key_value(&mut root, &cursor, &mut scanner, line, idx, line_no)?;
        }
    }
    Ok(root)
}

/// Returns the table bound at `key`, creating an empty one if the slot is
/// vacant. Any other existing binding is a key conflict.
pub(crate) fn open_table<'t>(table: &'t mut Table, key: &str, line: usize) -> Result<&'t mut Table> {
    let node = table
        .items_mut()
        .entry(key.to_string())
        .or_insert_with(|| Node::Table(Table::new()));
    match node {
        Node::Table(t) => Ok(t),
        _ => Err(Error::key_conflict(line, key, "a table")),
    }
}

/// Re-resolves the current-table cursor from the root.
fn cursor_table<'t>(root: &'t mut Table, cursor: &[Step], line: usize) -> Result<&'t mut Table> {
    let mut table = root;
    for step in cursor {
        let current = table;
        table = match step {
            Step::Key(name) => open_table(current, name, line)?,
            Step::ArrayElem(name, index) => match current.items_mut().get_mut(name) {
                Some(Node::Array(arr)) => match arr.get_mut(*index) {
                    Some(Node::Table(t)) => t,
                    _ => return Err(Error::key_conflict(line, name, "a table")),
                },
                _ => return Err(Error::key_conflict(line, name, "an array")),
            },
        };
    }
    Ok(table)
}

/// Processes a `[path]` or `[[path]]` header and returns the new cursor.
///
/// A plain header walks the root along the path, creating intermediate
/// tables as needed; the final table becomes the cursor. An array-of-tables
/// header appends a fresh table to the array bound at the last segment
/// (creating the array on first use) and targets that element.
fn apply_table_header(root: &mut Table, line: &str, line_no: usize) -> Result<Vec<Step>> {
    let stripped = strip_comment_preserve_strings(line);
    let header = stripped.trim();
    let is_array = header.starts_with("[[");
    let name = if is_array {
        header
            .strip_prefix("[[")
            .and_then(|rest| rest.strip_suffix("]]"))
            .ok_or_else(|| Error::syntax(line_no, "invalid array-of-table header"))?
    } else {
        header
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| Error::syntax(line_no, "invalid table header"))?
    };

    let parts = parse_key_parts(name.trim(), line_no)?;
    let Some((last, intermediate)) = parts.split_last() else {
        return Err(Error::decode(line_no, "empty key"));
    };

    let mut steps = Vec::with_capacity(parts.len());
    let mut table: &mut Table = root;

    if !is_array {
        for part in &parts {
            table = open_table(table, part, line_no)?;
            steps.push(Step::Key(part.clone()));
        }
        return Ok(steps);
    }

    for part in intermediate {
        table = open_table(table, part, line_no)?;
        steps.push(Step::Key(part.clone()));
    }
    let slot = table
        .items_mut()
        .entry(last.clone())
        .or_insert_with(|| Node::Array(Array::default()));
    let Node::Array(arr) = slot else {
        return Err(Error::key_conflict(line_no, last, "an array"));
    };
    arr.push(Node::Table(Table::new()));
    steps.push(Step::ArrayElem(last.clone(), arr.len() - 1));
    Ok(steps)
}

/// Applies one `key = value` binding at the current cursor, consuming
/// continuation lines if the value spans several physical lines.
fn apply_key_value(
    root: &mut Table,
    cursor: &[Step],
    scanner: &mut Scanner<'_>,
    line: &str,
    idx: usize,
    line_no: usize,
) -> Result<()> {
    let key = line[..idx].trim();
    let value_text = line[idx + 1..].trim();

    let parts = parse_key_parts(key, line_no)?;
    let Some((last, intermediate)) = parts.split_last() else {
        return Err(Error::decode(line_no, "empty key"));
    };

    let mut table = cursor_table(root, cursor, line_no)?;
    for part in intermediate {
        table = open_table(table, part, line_no)?;
    }
    if table.items().contains_key(last) {
        return Err(Error::duplicate_key(line_no, last));
    }

    let full = scanner.consume_value(value_text, line_no)?;
    let node = decode_value(&full, line_no)?;
    table.items_mut().insert(last.clone(), node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn test_header_reopens_existing_table() {
        // A header may target a table created earlier via a dotted path.
        let root = parse_document("[a.b]\nx = 1\n[a]\ny = 2").unwrap();
        assert_eq!(root.get(&["a", "b", "x"]).and_then(Node::as_integer), Some(1));
        assert_eq!(root.get(&["a", "y"]).and_then(Node::as_integer), Some(2));
    }

    #[test]
    fn test_array_header_appends_per_occurrence() {
        let root = parse_document("[[srv]]\nid = 1\n[[srv]]\nid = 2").unwrap();
        let arr = root.get(&["srv"]).and_then(Node::as_array).unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(
            arr.get(1).and_then(|n| n.as_table()).and_then(|t| t.get(&["id"])).and_then(Node::as_integer),
            Some(2)
        );
    }

    #[test]
    fn test_dotted_array_header() {
        let root = parse_document("[[fruit.variety]]\nname = \"plantain\"").unwrap();
        let node = root.get(&["fruit", "variety"]).unwrap();
        assert_eq!(node.kind(), Kind::Array);
    }

    #[test]
    fn test_malformed_headers() {
        let err = parse_document("[[a]\nx = 1").unwrap_err();
        assert_eq!(err.to_string(), "toml:1: invalid array-of-table header");
        let err = parse_document("[]").unwrap_err();
        assert_eq!(err.to_string(), "toml:1: empty key");
    }

    #[test]
    fn test_plain_header_through_array_is_conflict() {
        let err = parse_document("[[a]]\n[a]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "toml:2: key \"a\" already defined and is not a table"
        );
    }

    #[test]
    fn test_array_header_over_scalar_is_conflict() {
        let err = parse_document("a = 1\n[[a]]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "toml:2: key \"a\" already defined and is not an array"
        );
    }
}
