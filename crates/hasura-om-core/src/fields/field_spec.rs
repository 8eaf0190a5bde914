use crate::arguments::ArgumentBindError;
use crate::arguments::NestedArguments;
use crate::fields::CompiledFields;
use crate::fields::Selectable;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

type Result<T> = std::result::Result<T, FieldSpecError>;

/// The caller-facing, recursive description of which fields and
/// subselections to request.
///
/// A spec is either raw selection text, an ordered list of child specs, a
/// keyed map of field name to [`FieldEntry`], a single named subselection
/// (optionally carrying forwarded arguments), or an already-compiled
/// selection embedded verbatim (which is how fragments compose into larger
/// trees). Specs are built fresh per request or fragment and never mutated
/// after compilation.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldSpec {
    Text(String),
    List(Vec<FieldSpec>),
    Map(IndexMap<String, FieldEntry>),
    Nested {
        name: String,
        children: Box<FieldSpec>,
        arguments: Option<NestedArguments>,
    },
    Embedded(CompiledFields),
}

/// One entry of the keyed-map form: an optional subselection plus optional
/// forwarded arguments for it. Both absent means a plain leaf field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldEntry {
    pub children: Option<FieldSpec>,
    pub arguments: Option<NestedArguments>,
}

impl FieldSpec {
    pub fn text(text: impl Into<String>) -> Self {
        FieldSpec::Text(text.into())
    }

    /// A list of plain leaf field names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSpec::List(
            names
                .into_iter()
                .map(|name| FieldSpec::Text(name.into()))
                .collect(),
        )
    }

    pub fn nested(name: impl Into<String>, children: FieldSpec) -> Self {
        FieldSpec::Nested {
            name: name.into(),
            children: Box::new(children),
            arguments: None,
        }
    }

    pub fn nested_with_arguments(
        name: impl Into<String>,
        children: FieldSpec,
        arguments: NestedArguments,
    ) -> Self {
        FieldSpec::Nested {
            name: name.into(),
            children: Box::new(children),
            arguments: Some(arguments),
        }
    }

    /// Embeds an already-compiled selection (typically a
    /// [`Fragment`](crate::fragment::Fragment)) as one branch of this tree,
    /// splicing in its text and forwarding its argument declarations.
    pub fn embedded(selectable: &impl Selectable) -> Self {
        FieldSpec::Embedded(CompiledFields::new(
            selectable.compiled_text(),
            selectable.forwarded_arguments().to_vec(),
        ))
    }

    /// Parses the dynamic JSON form: a string of raw selection text, an
    /// array of entries (strings, `[name, children]` /
    /// `[name, children, arguments]` triples, or keyed maps), or a keyed
    /// map of `{field: {children?, arguments?}}`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(FieldSpec::Text(text.clone())),
            Value::Array(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(Self::list_entry_from_value(element)?);
                }

                Ok(FieldSpec::List(items))
            }
            Value::Object(_) => Self::map_from_value(value),
            other => Err(FieldSpecError::UnsupportedValue {
                json_type: json_type_name(other),
            }),
        }
    }

    fn list_entry_from_value(element: &Value) -> Result<Self> {
        match element {
            Value::String(name) => Ok(FieldSpec::Text(name.clone())),
            Value::Array(parts) => {
                if parts.len() < 2 || parts.len() > 3 {
                    return Err(FieldSpecError::MalformedListEntry {
                        element_count: parts.len(),
                    });
                }

                let name = parts[0]
                    .as_str()
                    .ok_or(FieldSpecError::NonStringFieldName)?;
                let children = Self::from_value(&parts[1])?;
                let arguments = match parts.get(2) {
                    Some(argmap) => Some(NestedArguments::from_value(argmap)?),
                    None => None,
                };

                Ok(FieldSpec::Nested {
                    name: name.to_string(),
                    children: Box::new(children),
                    arguments,
                })
            }
            Value::Object(_) => Self::map_from_value(element),
            other => Err(FieldSpecError::UnsupportedValue {
                json_type: json_type_name(other),
            }),
        }
    }

    fn map_from_value(value: &Value) -> Result<Self> {
        let Some(entries) = value.as_object() else {
            return Err(FieldSpecError::UnsupportedValue {
                json_type: json_type_name(value),
            });
        };

        let mut map = IndexMap::with_capacity(entries.len());
        for (name, entry) in entries {
            let entry = match entry {
                Value::Null => FieldEntry::default(),
                Value::Object(fields) => {
                    let children = match fields.get("children") {
                        Some(children) => Some(Self::from_value(children)?),
                        None => None,
                    };
                    let arguments = match fields.get("arguments") {
                        Some(argmap) => {
                            Some(NestedArguments::from_value(argmap)?)
                        }
                        None => None,
                    };

                    FieldEntry {
                        children,
                        arguments,
                    }
                }
                other => {
                    return Err(FieldSpecError::UnsupportedValue {
                        json_type: json_type_name(other),
                    });
                }
            };

            map.insert(name.clone(), entry);
        }

        Ok(FieldSpec::Map(map))
    }
}

impl From<&str> for FieldSpec {
    fn from(text: &str) -> Self {
        FieldSpec::Text(text.to_string())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FieldSpecError {
    #[error("a raw selection text leaf must not be empty")]
    EmptyText,

    #[error(
        "a bare list entry must be `[name, children]` or \
        `[name, children, arguments]`, got {element_count} element(s)"
    )]
    MalformedListEntry { element_count: usize },

    #[error("the first element of a bare list entry must be a field name string")]
    NonStringFieldName,

    #[error("the `{field_name}` subselection compiled to an empty selection set")]
    EmptySubselection { field_name: String },

    #[error("field specs may only contain strings, lists, and maps; got {json_type}")]
    UnsupportedValue { json_type: &'static str },

    #[error(transparent)]
    Argument(#[from] ArgumentBindError),
}
