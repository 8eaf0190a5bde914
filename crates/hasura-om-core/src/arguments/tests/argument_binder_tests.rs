use crate::arguments::ArgumentBindError;
use crate::arguments::ArgumentKind;
use crate::arguments::OperationPrefix;
use crate::arguments::bind;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn variables_are_namespaced_by_prefix_and_table() {
    let filter = json!({"id": {"_eq": 5}});
    let bound = bind(
        &[(ArgumentKind::Where, &filter)],
        "user",
        OperationPrefix::Select,
    );

    assert_eq!(bound.usage, vec!["where: $s_user_where"]);
    assert_eq!(bound.declarations.len(), 1);
    assert_eq!(bound.declarations[0].variable(), "s_user_where");
    assert_eq!(bound.declarations[0].graphql_type(), "user_bool_exp");
    assert_eq!(bound.variables["s_user_where"], filter);
}

#[test]
fn same_table_same_key_differs_across_operation_kinds() {
    let filter = json!({"id": {"_eq": 1}});
    let select = bind(&[(ArgumentKind::Where, &filter)], "user", OperationPrefix::Select);
    let update = bind(&[(ArgumentKind::Where, &filter)], "user", OperationPrefix::Update);

    assert_eq!(select.declarations[0].variable(), "s_user_where");
    assert_eq!(update.declarations[0].variable(), "u_user_where");
}

#[test]
fn where_is_required_for_update_and_delete_only() {
    let filter = json!({});
    for (prefix, expected) in [
        (OperationPrefix::Select, "user_bool_exp"),
        (OperationPrefix::Aggregate, "user_bool_exp"),
        (OperationPrefix::Update, "user_bool_exp!"),
        (OperationPrefix::Delete, "user_bool_exp!"),
    ] {
        let bound = bind(&[(ArgumentKind::Where, &filter)], "user", prefix);
        assert_eq!(bound.declarations[0].graphql_type(), expected);
    }
}

#[test]
fn type_vocabulary_follows_the_table_name() {
    let cases = [
        (ArgumentKind::Where, "chat_bool_exp"),
        (ArgumentKind::Limit, "Int"),
        (ArgumentKind::Offset, "Int"),
        (ArgumentKind::OrderBy, "[chat_order_by!]"),
        (ArgumentKind::DistinctOn, "[chat_select_column!]"),
        (ArgumentKind::Objects, "[chat_insert_input!]!"),
        (ArgumentKind::OnConflict, "chat_on_conflict"),
        (ArgumentKind::Set, "chat_set_input"),
        (ArgumentKind::Inc, "chat_inc_input"),
    ];

    for (kind, expected) in cases {
        assert_eq!(kind.graphql_type("chat", false), expected);
    }
}

#[test]
fn binding_preserves_argument_order() {
    let filter = json!({"id": {"_eq": 1}});
    let limit = json!(10);
    let offset = json!(20);
    let bound = bind(
        &[
            (ArgumentKind::Where, &filter),
            (ArgumentKind::Limit, &limit),
            (ArgumentKind::Offset, &offset),
        ],
        "user",
        OperationPrefix::Select,
    );

    assert_eq!(
        bound.usage,
        vec![
            "where: $s_user_where",
            "limit: $s_user_limit",
            "offset: $s_user_offset",
        ],
    );
    assert_eq!(
        bound.usage_text(),
        " (where: $s_user_where, limit: $s_user_limit, offset: $s_user_offset)",
    );
}

#[test]
fn empty_binding_renders_no_usage_text() {
    let bound = bind(&[], "user", OperationPrefix::Select);
    assert_eq!(bound.usage_text(), "");
    assert!(bound.declarations.is_empty());
    assert!(bound.variables.is_empty());
}

#[test]
fn unknown_argument_keys_are_rejected() {
    assert_eq!(
        ArgumentKind::from_key("group_by"),
        Err(ArgumentBindError::UnknownArgumentType {
            key: "group_by".to_string(),
        }),
    );
    assert_eq!(ArgumentKind::from_key("_set"), Ok(ArgumentKind::Set));
}

proptest! {
    #[test]
    fn binding_is_deterministic(
        table in "[a-z][a-z_]{0,15}",
        limit in 0u64..10_000,
    ) {
        let filter = json!({"id": {"_eq": 1}});
        let limit = json!(limit);
        let pairs = [
            (ArgumentKind::Where, &filter),
            (ArgumentKind::Limit, &limit),
        ];

        let first = bind(&pairs, &table, OperationPrefix::Select);
        let second = bind(&pairs, &table, OperationPrefix::Select);
        prop_assert_eq!(first, second);
    }
}
