use crate::arguments::ArgumentBindError;
use crate::arguments::ArgumentKind;
use crate::arguments::NestedArguments;
use serde_json::json;

#[test]
fn caller_names_the_variables_and_the_table_supplies_the_types() {
    let nested = NestedArguments::new("_om_test")
        .bind(ArgumentKind::Limit, "objects_limit")
        .bind(ArgumentKind::Where, "objects_where");

    assert_eq!(
        nested.usage_text(),
        " (limit: $objects_limit, where: $objects_where)",
    );

    let declarations = nested.declarations();
    assert_eq!(declarations[0].render(), "$objects_limit: Int");
    assert_eq!(declarations[1].render(), "$objects_where: _om_test_bool_exp");
}

#[test]
fn parses_the_map_form_with_the_table_marker() {
    let nested = NestedArguments::from_value(&json!({
        "_table": "_om_test",
        "limit": "objects_limit",
        "where": "objects_where",
    }))
    .unwrap();

    assert_eq!(nested.table(), "_om_test");
    assert_eq!(
        nested.usage_text(),
        " (limit: $objects_limit, where: $objects_where)",
    );
}

#[test]
fn map_form_requires_the_table_marker() {
    assert_eq!(
        NestedArguments::from_value(&json!({"limit": "l"})),
        Err(ArgumentBindError::MissingNestedTable),
    );
}

#[test]
fn map_form_rejects_unknown_keys_and_non_string_variables() {
    assert_eq!(
        NestedArguments::from_value(&json!({"_table": "t", "group_by": "g"})),
        Err(ArgumentBindError::UnknownArgumentType {
            key: "group_by".to_string(),
        }),
    );
    assert_eq!(
        NestedArguments::from_value(&json!({"_table": "t", "limit": 5})),
        Err(ArgumentBindError::NonStringVariableName {
            key: "limit".to_string(),
        }),
    );
}

#[test]
fn empty_bindings_render_nothing() {
    let nested = NestedArguments::new("t");
    assert!(nested.is_empty());
    assert_eq!(nested.usage_text(), "");
    assert!(nested.declarations().is_empty());
}
