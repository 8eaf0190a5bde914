use serde_json::Value;
use serde_json::json;

use crate::introspection::decode_rows;

fn rows(value: Value) -> Vec<Vec<Value>> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn zips_value_rows_against_the_header_row() {
    let result = rows(json!([
        ["table_name", "table_type"],
        ["user", "BASE TABLE"],
        ["active_users", "VIEW"],
    ]));
    let decoded = decode_rows(result);
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0]["table_name"], json!("user"));
    assert_eq!(decoded[0]["table_type"], json!("BASE TABLE"));
    assert_eq!(decoded[1]["table_name"], json!("active_users"));
    assert_eq!(decoded[1]["table_type"], json!("VIEW"));
}

#[test]
fn empty_result_decodes_to_no_rows() {
    assert!(decode_rows(Vec::new()).is_empty());
}

#[test]
fn header_only_result_decodes_to_no_rows() {
    let result = rows(json!([["table_name", "table_type"]]));
    assert!(decode_rows(result).is_empty());
}

#[test]
fn short_rows_omit_trailing_columns() {
    let result = rows(json!([
        ["table_name", "column_name", "data_type"],
        ["user", "id"],
    ]));
    let decoded = decode_rows(result);
    assert_eq!(decoded[0].len(), 2);
    assert!(!decoded[0].contains_key("data_type"));
}

#[test]
fn preserves_header_column_order() {
    let result = rows(json!([
        ["table_name", "column_name", "ordinal_position"],
        ["user", "id", "1"],
    ]));
    let decoded = decode_rows(result);
    let keys: Vec<&String> = decoded[0].keys().collect();
    assert_eq!(keys, ["table_name", "column_name", "ordinal_position"]);
}
