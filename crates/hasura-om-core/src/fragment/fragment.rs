use crate::arguments::ArgumentDeclaration;
use crate::fields::FieldSpec;
use crate::fields::FieldSpecError;
use crate::fields::Selectable;
use crate::fields::compile;
use crate::fragment::FragmentBundle;
use thiserror::Error;

type Result<T> = std::result::Result<T, FragmentBuildError>;

/// A named, reusable GraphQL selection bound to one table (its type
/// condition), compiled once at construction.
///
/// A fragment plays two roles at once: it is a document the server must
/// receive exactly once per operation, however many selections spread it,
/// and it is a [`Selectable`] value that can be embedded as one branch of a
/// larger [`FieldSpec`]. It is immutable; renaming or re-targeting one
/// means constructing a new fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    compiled_name: String,
    compiled_text: String,
    forwarded_arguments: Vec<ArgumentDeclaration>,
    table: String,
}

impl Fragment {
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        spec: &FieldSpec,
    ) -> Result<Self> {
        let table = table.into();
        if table.is_empty() {
            return Err(FragmentBuildError::MissingTable);
        }

        let compiled = compile(spec)?;
        if compiled.text().trim().is_empty() {
            return Err(FragmentBuildError::EmptyFields {
                table: table.clone(),
            });
        }

        Ok(Self {
            compiled_name: format!("{}_fragment_{}", name.into(), table),
            compiled_text: compiled.text().to_string(),
            forwarded_arguments: compiled.arguments().to_vec(),
            table,
        })
    }

    /// The compiled fragment name, `{name}_fragment_{table}`.
    pub fn name(&self) -> &str {
        &self.compiled_name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The memoized selection-set text.
    pub fn fields(&self) -> &str {
        &self.compiled_text
    }

    /// The argument declarations forwarded from nested subselections.
    pub fn arguments(&self) -> &[ArgumentDeclaration] {
        &self.forwarded_arguments
    }

    /// Renders the full fragment document.
    pub fn document(&self) -> String {
        format!(
            "fragment {} on {} {{\n{}\n}}",
            self.compiled_name, self.table, self.compiled_text,
        )
    }

    pub fn bundle(&self) -> FragmentBundle {
        FragmentBundle {
            name: self.compiled_name.clone(),
            document: self.document(),
            arguments: self.forwarded_arguments.clone(),
        }
    }
}

impl Selectable for Fragment {
    fn compiled_text(&self) -> &str {
        &self.compiled_text
    }

    fn forwarded_arguments(&self) -> &[ArgumentDeclaration] {
        &self.forwarded_arguments
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FragmentBuildError {
    #[error("fragments must be bound to a table")]
    MissingTable,

    #[error("the fields of a fragment on `{table}` compiled to an empty selection")]
    EmptyFields { table: String },

    #[error(transparent)]
    FieldSpec(#[from] FieldSpecError),
}
