use crate::response::FlattenInstruction;
use crate::response::Settings;
use serde_json::Map;
use serde_json::Value;

/// Reshapes a raw nested GraphQL response into the caller's expected shape
/// by applying each recorded [`FlattenInstruction`], then the `flat_one` /
/// `get_first` collapse rules.
///
/// Traversal is lenient: a response path whose segment is missing yields
/// `null` for that instruction rather than failing the whole reshape.
/// `requested_tables` are the table keys of the original request; the
/// final single-table collapse keys off them, not off the response.
pub fn flatten(
    raw: &Value,
    instructions: &[FlattenInstruction],
    settings: Settings,
    requested_tables: &[String],
) -> Value {
    let mut result = Value::Object(Map::new());

    for instruction in instructions {
        let value = read_path(raw, &instruction.response_path);
        write_path(&mut result, &instruction.result_path, value);
    }

    if let Value::Object(tables) = &mut result {
        for (_, value) in tables.iter_mut() {
            let sole_child = match value.as_object() {
                Some(children) if children.len() == 1 && settings.flat_one => {
                    children.values().next().cloned()
                }
                _ => None,
            };
            if let Some(child) = sole_child {
                *value = collapse_first(child, settings);
            }
        }
    }

    if let [table] = requested_tables {
        if settings.flat_one {
            let value = match &mut result {
                Value::Object(tables) => {
                    tables.remove(table).unwrap_or(Value::Null)
                }
                _ => Value::Null,
            };
            result = collapse_first(value, settings);
        }
    }

    result
}

fn collapse_first(value: Value, settings: Settings) -> Value {
    match value {
        Value::Array(mut entries) if settings.get_first => {
            if entries.is_empty() {
                Value::Null
            } else {
                entries.swap_remove(0)
            }
        }
        other => other,
    }
}

fn read_path(raw: &Value, path: &str) -> Value {
    let mut current = raw;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }

    current.clone()
}

fn write_path(result: &mut Value, path: &str, value: Value) {
    let mut current = result;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            if let Value::Object(map) = current {
                map.insert(segment.to_string(), value);
            }
            return;
        }

        let map = match current {
            Value::Object(map) => map,
            _ => return,
        };
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
