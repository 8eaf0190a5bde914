use crate::fields::FieldSpec;
use crate::operation::OperationKind;
use crate::table::AggregateFunction;
use crate::table::AggregateParams;
use crate::table::AggregateSpec;
use crate::table::CountSpec;
use crate::table::DeleteParams;
use crate::table::Field;
use crate::table::InsertParams;
use crate::table::MutationParams;
use crate::table::QueryParams;
use crate::table::Returning;
use crate::table::SelectParams;
use crate::table::Table;
use crate::table::TableBuildError;
use crate::table::UpdateParams;
use indexmap::IndexMap;
use serde_json::json;

fn user_table() -> Table {
    let mut table = Table::new("user", "BASE TABLE");
    table.add_field(Field::new("id").with_sql_type("integer"));
    table.add_field(Field::new("name").with_sql_type("text"));
    table.set_primary_key("id", 1).unwrap();
    table.rebuild_derived_fragments().unwrap();
    table
}

#[test]
fn derived_fragments_cover_all_fields_and_primary_keys() {
    let table = user_table();

    assert_eq!(
        table.fragment("base").unwrap().document(),
        "fragment base_fragment_user on user {\nid\nname\n}",
    );
    assert_eq!(
        table.fragment("pk").unwrap().document(),
        "fragment pk_fragment_user on user {\nid\n}",
    );
}

#[test]
fn pk_fragment_is_removed_when_no_primary_key_exists() {
    let mut table = Table::new("log", "BASE TABLE");
    table.add_field(Field::new("message"));
    table.rebuild_derived_fragments().unwrap();

    assert!(table.fragment("base").is_ok());
    assert!(matches!(
        table.fragment("pk"),
        Err(TableBuildError::FragmentNotFound { .. }),
    ));
}

#[test]
fn pk_fragment_fields_follow_ordinal_position() {
    let mut table = Table::new("membership", "BASE TABLE");
    table.add_field(Field::new("user_id"));
    table.add_field(Field::new("team_id"));
    table.set_primary_key("team_id", 2).unwrap();
    table.set_primary_key("user_id", 1).unwrap();
    table.rebuild_derived_fragments().unwrap();

    assert_eq!(table.fragment("pk").unwrap().fields(), "user_id\nteam_id");
}

#[test]
fn rebuilding_fragments_reflects_field_mutations() {
    let mut table = user_table();
    table.add_field(Field::new("email"));
    table.rebuild_derived_fragments().unwrap();

    assert_eq!(table.fragment("base").unwrap().fields(), "id\nname\nemail");
}

#[test]
fn unknown_primary_key_columns_are_rejected() {
    let mut table = Table::new("user", "BASE TABLE");
    assert!(matches!(
        table.set_primary_key("missing", 1),
        Err(TableBuildError::FieldNotFound { .. }),
    ));
}

#[test]
fn select_builds_operation_name_arguments_and_flatten_plan() {
    let table = user_table();
    let built = table
        .build_select(
            &SelectParams {
                where_clause: Some(json!({"id": {"_eq": 5}})),
                limit: Some(json!(10)),
                ..SelectParams::default()
            },
            OperationKind::Query,
        )
        .unwrap();

    assert_eq!(built.name, "Q_user");
    assert_eq!(
        built.selection,
        "user (where: $s_user_where, limit: $s_user_limit) {\n...base_fragment_user\n}",
    );
    assert_eq!(built.flatten.result_path, "user.select");
    assert_eq!(built.flatten.response_path, "user");
    assert_eq!(built.variables["s_user_where"], json!({"id": {"_eq": 5}}));
    assert_eq!(
        built.type_fragment.as_ref().unwrap().name,
        "base_fragment_user",
    );
}

#[test]
fn subscriptions_use_the_s_operation_letter() {
    let table = user_table();
    let built = table
        .build_select(&SelectParams::default(), OperationKind::Subscription)
        .unwrap();
    assert_eq!(built.name, "S_user");
}

#[test]
fn explicit_fields_suppress_the_type_fragment() {
    let table = user_table();
    let built = table
        .build_select(
            &SelectParams {
                returning: Returning::Fields(FieldSpec::names(["id"])),
                ..SelectParams::default()
            },
            OperationKind::Query,
        )
        .unwrap();

    assert_eq!(built.selection, "user {\nid\n}");
    assert!(built.type_fragment.is_none());
}

#[test]
fn missing_fragments_fail_before_any_execution() {
    let table = user_table();
    let result = table.build_select(
        &SelectParams {
            returning: Returning::FragmentName("missing".to_string()),
            ..SelectParams::default()
        },
        OperationKind::Query,
    );

    assert!(matches!(
        result,
        Err(TableBuildError::FragmentNotFound { name, .. }) if name == "missing",
    ));
}

#[test]
fn tables_without_fragments_cannot_default_the_returning_fields() {
    let table = Table::new("bare", "BASE TABLE");
    let result = table.build_select(&SelectParams::default(), OperationKind::Query);
    assert!(matches!(
        result,
        Err(TableBuildError::NoFragmentsAvailable { .. }),
    ));
}

#[test]
fn empty_query_params_are_an_implicit_select() {
    let table = user_table();
    let built = table
        .build_query(&QueryParams::default(), OperationKind::Query)
        .unwrap();

    assert_eq!(built.len(), 1);
    assert_eq!(built[0].name, "Q_user");
}

#[test]
fn select_and_aggregate_build_side_by_side() {
    let table = user_table();
    let built = table
        .build_query(
            &QueryParams {
                select: Some(SelectParams::default()),
                aggregate: Some(AggregateParams {
                    aggregate: AggregateSpec {
                        count: Some(CountSpec::default()),
                        ..AggregateSpec::default()
                    },
                    ..AggregateParams::default()
                }),
            },
            OperationKind::Query,
        )
        .unwrap();

    assert_eq!(built.len(), 2);
    assert_eq!(built[0].name, "Q_user");
    assert_eq!(built[1].name, "A_user");
    assert_eq!(built[1].flatten.result_path, "user.aggregate");
    assert_eq!(built[1].flatten.response_path, "user_aggregate.aggregate");
}

#[test]
fn count_arguments_render_columns_and_distinct() {
    let table = user_table();
    let built = table
        .build_aggregate(
            &AggregateParams {
                aggregate: AggregateSpec {
                    count: Some(CountSpec {
                        columns: vec!["type".to_string()],
                        distinct: true,
                    }),
                    ..AggregateSpec::default()
                },
                ..AggregateParams::default()
            },
            OperationKind::Query,
        )
        .unwrap();

    assert_eq!(
        built.selection,
        "user_aggregate {\naggregate {\ncount(columns: type,distinct: true)\n}\n}",
    );
}

#[test]
fn aggregate_functions_compile_to_column_selections() {
    let table = user_table();
    let mut functions = IndexMap::new();
    functions.insert(AggregateFunction::Sum, vec!["id".to_string()]);
    functions.insert(
        AggregateFunction::Avg,
        vec!["id".to_string(), "money".to_string()],
    );

    let built = table
        .build_aggregate(
            &AggregateParams {
                aggregate: AggregateSpec {
                    count: None,
                    functions,
                },
                ..AggregateParams::default()
            },
            OperationKind::Query,
        )
        .unwrap();

    assert!(built.selection.contains("sum {\nid\n}"));
    assert!(built.selection.contains("avg {\nid\nmoney\n}"));
}

#[test]
fn empty_aggregate_specs_have_no_returning_fields() {
    let table = user_table();
    let result = table.build_aggregate(
        &AggregateParams::default(),
        OperationKind::Query,
    );
    assert!(matches!(
        result,
        Err(TableBuildError::NoReturningFields { .. }),
    ));
}

#[test]
fn insert_and_update_build_distinct_operation_fragments() {
    let table = user_table();
    let built = table
        .build_mutation(&MutationParams {
            insert: Some(InsertParams::new(json!({"name": "x"}))),
            update: Some(UpdateParams {
                set: Some(json!({"name": "y"})),
                ..UpdateParams::new(json!({"id": {"_eq": 1}}))
            }),
            delete: None,
        })
        .unwrap();

    assert_eq!(built.len(), 2);

    assert_eq!(built[0].name, "I_user");
    assert!(built[0].selection.starts_with("insert_user (objects: $i_user_objects)"));
    assert_eq!(built[0].flatten.result_path, "user.insert");
    assert_eq!(built[0].flatten.response_path, "insert_user.returning");

    assert_eq!(built[1].name, "U_user");
    assert!(built[1]
        .selection
        .starts_with("update_user (where: $u_user_where, _set: $u_user__set)"));
    assert_eq!(built[1].flatten.result_path, "user.update");
    assert_eq!(built[1].flatten.response_path, "update_user.returning");
    assert_eq!(
        built[1]
            .declarations
            .iter()
            .find(|declaration| declaration.variable() == "u_user_where")
            .unwrap()
            .graphql_type(),
        "user_bool_exp!",
    );
}

#[test]
fn deletes_require_and_bind_only_the_filter() {
    let table = user_table();
    let built = table
        .build_delete(&DeleteParams::new(json!({"id": {"_eq": 9}})))
        .unwrap();

    assert_eq!(built.name, "D_user");
    assert_eq!(
        built.selection,
        "delete_user (where: $d_user_where) {\nreturning {\n...base_fragment_user\n}\n}",
    );
    assert_eq!(built.variables["d_user_where"], json!({"id": {"_eq": 9}}));
}

#[test]
fn caller_variables_feed_forwarded_declarations() {
    let mut table = user_table();
    table
        .create_fragment(
            "nested",
            &FieldSpec::from_value(&json!([
                "id",
                ["posts", ["id"], {"_table": "post", "limit": "posts_limit"}],
            ]))
            .unwrap(),
        )
        .unwrap();

    let mut variables = serde_json::Map::new();
    variables.insert("posts_limit".to_string(), json!(1));

    let built = table
        .build_select(
            &SelectParams {
                returning: Returning::FragmentName("nested".to_string()),
                variables,
                ..SelectParams::default()
            },
            OperationKind::Query,
        )
        .unwrap();

    assert_eq!(built.variables["posts_limit"], json!(1));
    assert!(built
        .declarations
        .iter()
        .any(|declaration| declaration.render() == "$posts_limit: Int"));
}
