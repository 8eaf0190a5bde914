use crate::arguments::ArgumentDeclaration;
use crate::operation::BuiltOperation;
use crate::operation::OperationFragment;
use crate::operation::OperationKind;
use crate::response::FlattenInstruction;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

type Result<T> = std::result::Result<T, DocumentBuildError>;

/// Merges any number of per-table [`OperationFragment`]s into one GraphQL
/// document: concatenated type fragments, then a single operation whose
/// name, argument list, and selection set are the fragments' contributions
/// merged in insertion order.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    declarations: Vec<ArgumentDeclaration>,
    flatten: Vec<FlattenInstruction>,
    fragments: IndexMap<String, String>,
    kind: OperationKind,
    names: Vec<String>,
    selections: Vec<String>,
    variables: Map<String, Value>,
}

impl DocumentBuilder {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            declarations: Vec::new(),
            flatten: Vec::new(),
            fragments: IndexMap::new(),
            kind,
            names: Vec::new(),
            selections: Vec::new(),
            variables: Map::new(),
        }
    }

    /// Adds one operation fragment. Two type fragments may share a name only
    /// when their documents are identical; a name reused for a different
    /// body is an error rather than a silent overwrite.
    pub fn add(mut self, part: OperationFragment) -> Result<Self> {
        if let Some(fragment) = part.type_fragment {
            match self.fragments.get(&fragment.name) {
                Some(existing) if *existing != fragment.document => {
                    return Err(DocumentBuildError::FragmentNameCollision {
                        name: fragment.name,
                    });
                }
                Some(_) => {}
                None => {
                    self.fragments
                        .insert(fragment.name, fragment.document);
                }
            }
        }

        self.names.push(part.name);
        for declaration in part.declarations {
            // Identical re-declarations collapse; the prefix scheme makes a
            // same-name/different-type clash unreachable from the builders.
            if !self.declarations.contains(&declaration) {
                self.declarations.push(declaration);
            }
        }
        self.selections.push(part.selection);
        self.flatten.push(part.flatten);
        for (name, value) in part.variables {
            self.variables.insert(name, value);
        }

        Ok(self)
    }

    pub fn build(self) -> Result<BuiltOperation> {
        if self.selections.is_empty() {
            return Err(DocumentBuildError::EmptyDocument);
        }

        let mut document = String::new();
        for fragment in self.fragments.values() {
            document.push_str(fragment);
            document.push('\n');
        }

        let arguments = if self.declarations.is_empty() {
            String::new()
        } else {
            let declarations = self
                .declarations
                .iter()
                .map(ArgumentDeclaration::render)
                .collect::<Vec<_>>()
                .join(", ");
            format!(" ({declarations})")
        };

        document.push_str(&format!(
            "{} {}{} {{\n{}\n}}",
            self.kind.keyword(),
            self.names.join("_"),
            arguments,
            self.selections.join("\n"),
        ));

        Ok(BuiltOperation {
            document,
            variables: self.variables,
            flatten: self.flatten,
        })
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DocumentBuildError {
    #[error("a document needs at least one operation field")]
    EmptyDocument,

    #[error(
        "the fragment name `{name}` is used for two different fragment bodies \
        within one document"
    )]
    FragmentNameCollision { name: String },
}
