use toml_ast::{parse_str, Error, Kind, Node};

#[test]
fn test_dotted_keys_build_nested_tables() {
    let root = parse_str("a.b.c = 1\na.b.d = 2\na.e = 3").unwrap();
    assert_eq!(root.get(&["a", "b", "c"]).and_then(Node::as_integer), Some(1));
    assert_eq!(root.get(&["a", "b", "d"]).and_then(Node::as_integer), Some(2));
    assert_eq!(root.get(&["a", "e"]).and_then(Node::as_integer), Some(3));
}

#[test]
fn test_headers_scope_following_bindings() {
    let src = r#"
top = 1

[database]
server = "192.168.1.1"
connection_max = 5000

[database.limits]
cpu = 2
"#;
    let root = parse_str(src).unwrap();
    assert_eq!(root.get(&["top"]).and_then(Node::as_integer), Some(1));
    assert_eq!(
        root.get(&["database", "server"]).and_then(Node::as_str),
        Some("192.168.1.1")
    );
    assert_eq!(
        root.get(&["database", "limits", "cpu"])
            .and_then(Node::as_integer),
        Some(2)
    );
}

#[test]
fn test_comments_are_stripped_outside_strings() {
    let src = r##"
# full-line comment
key = "value" # trailing comment
hash = "inside # stays" # outside goes
[section] # header comment
x = 1
"##;
    let root = parse_str(src).unwrap();
    assert_eq!(root.get(&["key"]).and_then(Node::as_str), Some("value"));
    assert_eq!(
        root.get(&["hash"]).and_then(Node::as_str),
        Some("inside # stays")
    );
    assert_eq!(root.get(&["section", "x"]).and_then(Node::as_integer), Some(1));
}

#[test]
fn test_literal_strings_take_content_verbatim() {
    let src = r#"
winpath = 'C:\Users\nodejs\templates'
regex = '<\i\c*\s*>'
multi = '''no \n escapes
here'''
"#;
    let root = parse_str(src).unwrap();
    assert_eq!(
        root.get(&["winpath"]).and_then(Node::as_str),
        Some(r"C:\Users\nodejs\templates")
    );
    assert_eq!(
        root.get(&["regex"]).and_then(Node::as_str),
        Some(r"<\i\c*\s*>")
    );
    assert_eq!(
        root.get(&["multi"]).and_then(Node::as_str),
        Some("no \\n escapes\nhere")
    );
}

#[test]
fn test_basic_string_escapes() {
    let src = r#"esc = "line1\nline2\tend \u00e9 \U0001F600 \"q\" \\""#;
    let root = parse_str(src).unwrap();
    assert_eq!(
        root.get(&["esc"]).and_then(Node::as_str),
        Some("line1\nline2\tend é 😀 \"q\" \\")
    );
}

#[test]
fn test_multiline_string_line_folding() {
    let src = "folded = \"\"\"The quick brown \\\n    fox jumps.\"\"\"";
    let root = parse_str(src).unwrap();
    assert_eq!(
        root.get(&["folded"]).and_then(Node::as_str),
        Some("The quick brown fox jumps.")
    );
}

#[test]
fn test_datetime_payloads() {
    let src = "
odt = 1979-05-27T00:32:00.999999-07:00
ldt = 1979-05-27 07:32:00
ld = 1979-05-27
lt = 07:32:00.25
";
    let root = parse_str(src).unwrap();

    let odt = root.get(&["odt"]).and_then(Node::as_datetime).unwrap();
    assert_eq!(odt.offset().local_minus_utc(), -7 * 3600);

    let ldt = root.get(&["ldt"]).and_then(Node::as_local_datetime).unwrap();
    assert_eq!(
        *ldt,
        chrono::NaiveDate::from_ymd_opt(1979, 5, 27)
            .unwrap()
            .and_hms_opt(7, 32, 0)
            .unwrap()
    );

    let ld = root.get(&["ld"]).and_then(Node::as_local_date).unwrap();
    assert_eq!(*ld, chrono::NaiveDate::from_ymd_opt(1979, 5, 27).unwrap());

    let lt = root.get(&["lt"]).and_then(Node::as_local_time).unwrap();
    assert_eq!(
        *lt,
        chrono::NaiveTime::from_hms_milli_opt(7, 32, 0, 250).unwrap()
    );
}

#[test]
fn test_nested_inline_and_array_values() {
    let src = r#"
point = { x = 1, y = { z = 2 } }
matrix = [[1, 2], [3, 4]]
names = ["alice", "bob"]
mixed_tables = [{ a = 1 }, { b = 2 }]
"#;
    let root = parse_str(src).unwrap();
    assert_eq!(
        root.get(&["point", "y", "z"]).and_then(Node::as_integer),
        Some(2)
    );
    assert_eq!(
        root.get_generic(&["matrix"]),
        Some(serde_json::json!([[1, 2], [3, 4]]))
    );
    assert_eq!(
        root.get_generic(&["names"]),
        Some(serde_json::json!(["alice", "bob"]))
    );
    let arr = root.get(&["mixed_tables"]).and_then(Node::as_array).unwrap();
    assert_eq!(arr.len(), 2);
    assert!(arr.iter().all(|n| n.kind() == Kind::Table));
}

#[test]
fn test_mixed_kind_array_is_rejected() {
    let err = parse_str("bad = [1, \"two\"]").unwrap_err();
    assert_eq!(err.to_string(), "toml:1: mixed-type array");

    // Integer vs float is already a mismatch.
    assert!(parse_str("bad = [1, 2.0]").is_err());
}

#[test]
fn test_syntax_error_on_unrecognizable_line() {
    let err = parse_str("fine = 1\nnot a binding\n").unwrap_err();
    assert_eq!(err.to_string(), "toml:2: invalid syntax");
}

#[test]
fn test_empty_value_is_rejected() {
    let err = parse_str("k =").unwrap_err();
    assert_eq!(err.to_string(), "toml:1: empty value");
    let err = parse_str("k = # nothing left").unwrap_err();
    assert_eq!(err.to_string(), "toml:1: empty value");
}

#[test]
fn test_unterminated_constructs_report_start_line() {
    let err = parse_str("a = 1\ns = \"\"\"never closed\nmore\n").unwrap_err();
    assert_eq!(err.to_string(), "toml:2: unterminated multiline string");

    let err = parse_str("arr = [1,\n2,\n").unwrap_err();
    assert_eq!(err.to_string(), "toml:1: unterminated compound value");

    let err = parse_str("s = \"no close").unwrap_err();
    assert_eq!(err.to_string(), "toml:1: unterminated string");
}

#[test]
fn test_conflicts_through_dotted_paths() {
    // Traversing through a scalar is a key conflict.
    let err = parse_str("a = 1\na.b = 2").unwrap_err();
    assert!(matches!(err, Error::KeyConflict { line: 2, .. }));

    // Rebinding a dotted leaf is a duplicate key.
    let err = parse_str("a.b = 1\na.b = 2").unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { line: 2, .. }));

    // A value may not shadow a table created by a header.
    let err = parse_str("[a.b]\nx = 1\n[a]\nb = 2").unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { line: 4, .. }));
}

#[test]
fn test_array_of_tables_keeps_per_element_scopes() {
    let src = r#"
[[fruit]]
name = "apple"

[[fruit]]
name = "banana"
rating = 9
"#;
    let root = parse_str(src).unwrap();
    let fruit = root.get(&["fruit"]).and_then(Node::as_array).unwrap();
    let apple = fruit.get(0).and_then(Node::as_table).unwrap();
    let banana = fruit.get(1).and_then(Node::as_table).unwrap();
    assert_eq!(apple.get(&["name"]).and_then(Node::as_str), Some("apple"));
    assert!(apple.get(&["rating"]).is_none());
    assert_eq!(banana.get(&["rating"]).and_then(Node::as_integer), Some(9));
}

#[test]
fn test_to_generic_whole_document() {
    let src = r#"
title = "doc"

[owner]
name = "Tom"

[[jobs]]
id = 1

[[jobs]]
id = 2
"#;
    let root = parse_str(src).unwrap();
    let generic = Node::Table(root).to_generic();
    assert_eq!(
        generic,
        serde_json::json!({
            "title": "doc",
            "owner": { "name": "Tom" },
            "jobs": [ { "id": 1 }, { "id": 2 } ]
        })
    );
}

#[test]
fn test_tree_serializes_through_serde() {
    let root = parse_str("name = \"x\"\nvals = [1, 2]").unwrap();
    let json = serde_json::to_string(&root).unwrap();
    assert_eq!(json, r#"{"name":"x","vals":[1,2]}"#);
}

#[test]
fn test_typed_accessors_fail_on_mismatch() {
    let root = parse_str("n = 5").unwrap();
    let node = root.get(&["n"]).unwrap();
    assert_eq!(i64::try_from(node).unwrap(), 5);

    let err = bool::try_from(node).unwrap_err();
    assert_eq!(err.to_string(), "type mismatch: expected bool, found integer");
    assert!(matches!(
        err,
        Error::TypeMismatch {
            expected: Kind::Bool,
            found: Kind::Integer
        }
    ));
}

#[test]
fn test_values_spanning_many_lines_keep_error_lines_stable() {
    let src = "\nok = [\n  1,\n  2,\n]\ndup = 1\ndup = 2\n";
    let err = parse_str(src).unwrap_err();
    // The array consumed lines 2-5; the duplicate is still reported at 7.
    assert!(matches!(err, Error::DuplicateKey { line: 7, .. }));
}

#[test]
fn test_whitespace_and_blank_lines_ignored() {
    let root = parse_str("\n\n   key   =   1   \n\n").unwrap();
    assert_eq!(root.get(&["key"]).and_then(Node::as_integer), Some(1));
}
