use crate::arguments::ArgumentDeclaration;
use crate::arguments::ArgumentKind;
use crate::arguments::OperationPrefix;
use serde_json::Map;
use serde_json::Value;

/// The three aligned outputs of binding one operation's arguments: the
/// declarations for the operation's argument list, the `key: $variable`
/// usage clauses for the field itself, and the variables payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundArguments {
    pub declarations: Vec<ArgumentDeclaration>,
    pub usage: Vec<String>,
    pub variables: Map<String, Value>,
}

impl BoundArguments {
    /// The parenthesized argument text for the operation's field, prefixed
    /// with a space, or an empty string when nothing was bound.
    pub fn usage_text(&self) -> String {
        if self.usage.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.usage.join(", "))
        }
    }
}

/// Binds the given `(kind, value)` pairs for one operation over `table`.
///
/// Every variable is named `{prefix}_{table}_{key}`; callers pass only the
/// arguments that are actually present, and binding preserves their order,
/// so identical inputs always produce identical output.
pub fn bind(
    pairs: &[(ArgumentKind, &Value)],
    table: &str,
    prefix: OperationPrefix,
) -> BoundArguments {
    let mut bound = BoundArguments::default();

    for (kind, value) in pairs {
        let variable = format!("{}_{}_{}", prefix.letter(), table, kind.key());

        bound.declarations.push(ArgumentDeclaration::new(
            &variable,
            kind.graphql_type(table, prefix.where_required()),
        ));
        bound.usage.push(format!("{}: ${}", kind.key(), variable));
        bound.variables.insert(variable, (*value).clone());
    }

    bound
}
