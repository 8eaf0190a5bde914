use crate::arguments::ArgumentDeclaration;
use crate::arguments::NestedArguments;
use crate::fields::CompiledFields;
use crate::fields::FieldSpec;
use crate::fields::FieldSpecError;

type Result<T> = std::result::Result<T, FieldSpecError>;

/// Compiles a [`FieldSpec`] into selection-set text plus the argument
/// declarations forwarded from nested subselections.
///
/// Compilation is pure and depth-first: list entries left to right, map
/// entries in insertion order, so the same spec always produces the same
/// text and the same declaration order.
pub fn compile(spec: &FieldSpec) -> Result<CompiledFields> {
    match spec {
        FieldSpec::Text(text) => {
            if text.trim().is_empty() {
                return Err(FieldSpecError::EmptyText);
            }

            Ok(CompiledFields::new(text.clone(), Vec::new()))
        }
        FieldSpec::List(items) => {
            let mut parts = Vec::with_capacity(items.len());
            let mut arguments = Vec::new();
            for item in items {
                let child = compile(item)?;
                parts.push(child.text().to_string());
                arguments.extend(child.arguments().to_vec());
            }

            Ok(CompiledFields::new(parts.join("\n"), arguments))
        }
        FieldSpec::Map(entries) => {
            let mut parts = Vec::with_capacity(entries.len());
            let mut arguments = Vec::new();
            for (name, entry) in entries {
                match &entry.children {
                    Some(children) => {
                        let (text, forwarded) = compile_subselection(
                            name,
                            children,
                            entry.arguments.as_ref(),
                        )?;
                        parts.push(text);
                        arguments.extend(forwarded);
                    }
                    None => match &entry.arguments {
                        Some(nested) => {
                            parts.push(format!("{name}{}", nested.usage_text()));
                            arguments.extend(nested.declarations());
                        }
                        None => parts.push(name.clone()),
                    },
                }
            }

            Ok(CompiledFields::new(parts.join("\n"), arguments))
        }
        FieldSpec::Nested {
            name,
            children,
            arguments,
        } => {
            let (text, forwarded) =
                compile_subselection(name, children, arguments.as_ref())?;

            Ok(CompiledFields::new(text, forwarded))
        }
        FieldSpec::Embedded(compiled) => Ok(compiled.clone()),
    }
}

fn compile_subselection(
    name: &str,
    children: &FieldSpec,
    arguments: Option<&NestedArguments>,
) -> Result<(String, Vec<ArgumentDeclaration>)> {
    let child = compile(children)?;
    if child.text().trim().is_empty() {
        return Err(FieldSpecError::EmptySubselection {
            field_name: name.to_string(),
        });
    }

    let mut forwarded = Vec::new();
    let usage = match arguments {
        Some(nested) => {
            forwarded.extend(nested.declarations());
            nested.usage_text()
        }
        None => String::new(),
    };
    forwarded.extend(child.arguments().to_vec());

    let text = format!("{name}{usage} {{\n{}\n}}", child.text());
    Ok((text, forwarded))
}
