use crate::arguments::ArgumentBindError;
use crate::arguments::ArgumentDeclaration;
use crate::arguments::ArgumentKind;
use indexmap::IndexMap;
use serde_json::Value;

/// Arguments bound to one subselection inside a field tree rather than to a
/// top-level operation field.
///
/// Unlike operation-level bindings, the caller names the variables here
/// (`{limit: "objects_limit"}`); only the types come from the fixed
/// vocabulary, parameterized by the sub-table named under `_table`. The
/// resulting declarations are forwarded upward so the enclosing operation
/// can declare them, and the values arrive later through the per-call
/// `variables` map.
#[derive(Clone, Debug, PartialEq)]
pub struct NestedArguments {
    bindings: IndexMap<ArgumentKind, String>,
    table: String,
}

impl NestedArguments {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            bindings: IndexMap::new(),
            table: table.into(),
        }
    }

    /// Parses the caller-facing map form: `{"_table": "user", "limit":
    /// "objects_limit", ...}`. The `_table` entry is metadata selecting the
    /// argument-type vocabulary, not itself an argument.
    pub fn from_value(value: &Value) -> Result<Self, ArgumentBindError> {
        let Some(entries) = value.as_object() else {
            return Err(ArgumentBindError::MissingNestedTable);
        };

        let table = entries
            .get("_table")
            .and_then(Value::as_str)
            .ok_or(ArgumentBindError::MissingNestedTable)?;

        let mut nested = Self::new(table);
        for (key, variable) in entries {
            if key == "_table" {
                continue;
            }

            let variable = variable.as_str().ok_or_else(|| {
                ArgumentBindError::NonStringVariableName {
                    key: key.to_string(),
                }
            })?;
            nested = nested.bind(ArgumentKind::from_key(key)?, variable);
        }

        Ok(nested)
    }

    /// Binds `kind` to a caller-chosen variable name. Rebinding a kind
    /// replaces the previous variable.
    pub fn bind(
        mut self,
        kind: ArgumentKind,
        variable: impl Into<String>,
    ) -> Self {
        self.bindings.insert(kind, variable.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The declarations the enclosing operation must carry, in binding order.
    pub fn declarations(&self) -> Vec<ArgumentDeclaration> {
        self.bindings
            .iter()
            .map(|(kind, variable)| {
                ArgumentDeclaration::new(
                    variable,
                    kind.graphql_type(&self.table, false),
                )
            })
            .collect()
    }

    /// The in-place argument text for the subselection, e.g.
    /// ` (limit: $objects_limit)`. Empty when nothing is bound.
    pub fn usage_text(&self) -> String {
        if self.bindings.is_empty() {
            return String::new();
        }

        let usages = self
            .bindings
            .iter()
            .map(|(kind, variable)| format!("{}: ${}", kind.key(), variable))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" ({usages})")
    }
}
