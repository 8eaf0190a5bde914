use thiserror::Error;

/// The closed vocabulary of operation-level arguments understood by the
/// builders. Each kind maps to a fixed, table-parameterized GraphQL type
/// following Hasura's naming convention (`{table}_bool_exp`,
/// `[{table}_order_by!]`, ...).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ArgumentKind {
    Where,
    Limit,
    Offset,
    OrderBy,
    DistinctOn,
    Objects,
    OnConflict,
    Set,
    Inc,
}

impl ArgumentKind {
    /// The argument vocabulary of `select`/`aggregate` operations, in the
    /// order arguments are bound.
    pub const FILTERING: &'static [ArgumentKind] = &[
        ArgumentKind::Where,
        ArgumentKind::Limit,
        ArgumentKind::Offset,
        ArgumentKind::OrderBy,
        ArgumentKind::DistinctOn,
    ];

    /// Parses a caller-supplied argument key. This is the only entry point
    /// through which unrecognized keys can be requested, and it rejects them.
    pub fn from_key(key: &str) -> Result<Self, ArgumentBindError> {
        match key {
            "where" => Ok(ArgumentKind::Where),
            "limit" => Ok(ArgumentKind::Limit),
            "offset" => Ok(ArgumentKind::Offset),
            "order_by" => Ok(ArgumentKind::OrderBy),
            "distinct_on" => Ok(ArgumentKind::DistinctOn),
            "objects" => Ok(ArgumentKind::Objects),
            "on_conflict" => Ok(ArgumentKind::OnConflict),
            "_set" => Ok(ArgumentKind::Set),
            "_inc" => Ok(ArgumentKind::Inc),
            _ => Err(ArgumentBindError::UnknownArgumentType {
                key: key.to_string(),
            }),
        }
    }

    /// The GraphQL field-argument name this kind binds to.
    pub fn key(&self) -> &'static str {
        match self {
            ArgumentKind::Where => "where",
            ArgumentKind::Limit => "limit",
            ArgumentKind::Offset => "offset",
            ArgumentKind::OrderBy => "order_by",
            ArgumentKind::DistinctOn => "distinct_on",
            ArgumentKind::Objects => "objects",
            ArgumentKind::OnConflict => "on_conflict",
            ArgumentKind::Set => "_set",
            ArgumentKind::Inc => "_inc",
        }
    }

    /// The GraphQL type a variable bound to this kind is declared with.
    ///
    /// `where_required` controls the nullability of `where`: update and
    /// delete operations require a filter, selects do not.
    pub fn graphql_type(&self, table: &str, where_required: bool) -> String {
        match self {
            ArgumentKind::Where if where_required => {
                format!("{table}_bool_exp!")
            }
            ArgumentKind::Where => format!("{table}_bool_exp"),
            ArgumentKind::Limit | ArgumentKind::Offset => "Int".to_string(),
            ArgumentKind::OrderBy => format!("[{table}_order_by!]"),
            ArgumentKind::DistinctOn => format!("[{table}_select_column!]"),
            ArgumentKind::Objects => format!("[{table}_insert_input!]!"),
            ArgumentKind::OnConflict => format!("{table}_on_conflict"),
            ArgumentKind::Set => format!("{table}_set_input"),
            ArgumentKind::Inc => format!("{table}_inc_input"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ArgumentBindError {
    #[error("`{key}` is not a recognized operation argument")]
    UnknownArgumentType { key: String },

    #[error(
        "nested argument maps must name the table whose argument types \
        apply via the `_table` key"
    )]
    MissingNestedTable,

    #[error("the `{key}` entry of a nested argument map must be a variable name string")]
    NonStringVariableName { key: String },
}
