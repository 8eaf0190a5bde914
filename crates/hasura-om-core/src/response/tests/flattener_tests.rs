use crate::response::FlattenInstruction;
use crate::response::Settings;
use crate::response::SettingsOverride;
use crate::response::flatten;
use serde_json::json;

fn tables(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn a_single_table_select_collapses_to_a_bare_sequence() {
    let raw = json!({"user": [{"id": 5}]});
    let instructions = [FlattenInstruction::new("user.select", "user")];

    let result = flatten(
        &raw,
        &instructions,
        Settings::default(),
        &tables(&["user"]),
    );

    assert_eq!(result, json!([{"id": 5}]));
}

#[test]
fn get_first_takes_the_first_element_or_null() {
    let raw = json!({"user": [{"id": 5}, {"id": 6}]});
    let instructions = [FlattenInstruction::new("user.select", "user")];
    let settings = Settings {
        flat_one: true,
        get_first: true,
    };

    let result = flatten(&raw, &instructions, settings, &tables(&["user"]));
    assert_eq!(result, json!({"id": 5}));

    let empty = json!({"user": []});
    let result = flatten(&empty, &instructions, settings, &tables(&["user"]));
    assert_eq!(result, json!(null));
}

#[test]
fn without_flat_one_the_wrapper_objects_stay() {
    let raw = json!({"user": [{"id": 5}]});
    let instructions = [FlattenInstruction::new("user.select", "user")];
    let settings = Settings {
        flat_one: false,
        get_first: false,
    };

    let result = flatten(&raw, &instructions, settings, &tables(&["user"]));
    assert_eq!(result, json!({"user": {"select": [{"id": 5}]}}));
}

#[test]
fn multi_kind_results_keep_their_kind_keys() {
    let raw = json!({
        "user": [{"id": 1}],
        "user_aggregate": {"aggregate": {"count": 1}},
    });
    let instructions = [
        FlattenInstruction::new("user.select", "user"),
        FlattenInstruction::new("user.aggregate", "user_aggregate.aggregate"),
    ];

    let result = flatten(
        &raw,
        &instructions,
        Settings::default(),
        &tables(&["user"]),
    );

    // Two kinds under one table: the single-key collapse does not apply.
    assert_eq!(
        result,
        json!({
            "select": [{"id": 1}],
            "aggregate": {"count": 1},
        }),
    );
}

#[test]
fn multi_table_results_keep_table_keys_and_collapse_within() {
    let raw = json!({
        "insert_user": {"returning": [{"id": 1}]},
        "update_team": {"returning": [{"id": 2}]},
    });
    let instructions = [
        FlattenInstruction::new("user.insert", "insert_user.returning"),
        FlattenInstruction::new("team.update", "update_team.returning"),
    ];

    let result = flatten(
        &raw,
        &instructions,
        Settings::default(),
        &tables(&["user", "team"]),
    );

    assert_eq!(
        result,
        json!({
            "user": [{"id": 1}],
            "team": [{"id": 2}],
        }),
    );
}

#[test]
fn missing_response_paths_yield_null() {
    let raw = json!({"something_else": 1});
    let instructions = [FlattenInstruction::new("user.select", "user")];

    let result = flatten(
        &raw,
        &instructions,
        Settings::default(),
        &tables(&["user"]),
    );

    assert_eq!(result, json!(null));
}

#[test]
fn aggregate_only_results_collapse_to_the_aggregate_object() {
    let raw = json!({"user_aggregate": {"aggregate": {"count": 7}}});
    let instructions = [FlattenInstruction::new(
        "user.aggregate",
        "user_aggregate.aggregate",
    )];

    let result = flatten(
        &raw,
        &instructions,
        Settings::default(),
        &tables(&["user"]),
    );

    // Not a sequence, so get_first has nothing to do even when set.
    assert_eq!(result, json!({"count": 7}));
}

#[test]
fn settings_layers_merge_field_by_field() {
    let base = Settings::default();
    let merged = base.with(&SettingsOverride {
        get_first: Some(true),
        flat_one: None,
    });

    assert!(merged.flat_one);
    assert!(merged.get_first);

    let unchanged = base.with(&SettingsOverride::default());
    assert_eq!(unchanged, base);
}
