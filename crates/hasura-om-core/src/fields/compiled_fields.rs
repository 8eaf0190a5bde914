use crate::arguments::ArgumentDeclaration;
use crate::fields::Selectable;

/// The output of compiling a [`FieldSpec`](crate::fields::FieldSpec): the
/// selection-set text plus any argument declarations collected from nested
/// subselections, in traversal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledFields {
    arguments: Vec<ArgumentDeclaration>,
    text: String,
}

impl CompiledFields {
    pub fn new(
        text: impl Into<String>,
        arguments: Vec<ArgumentDeclaration>,
    ) -> Self {
        Self {
            arguments,
            text: text.into(),
        }
    }

    pub fn arguments(&self) -> &[ArgumentDeclaration] {
        &self.arguments
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Selectable for CompiledFields {
    fn compiled_text(&self) -> &str {
        &self.text
    }

    fn forwarded_arguments(&self) -> &[ArgumentDeclaration] {
        &self.arguments
    }
}
