use crate::arguments::ArgumentDeclaration;

/// Everything a builder needs from a fragment in one value: its compiled
/// name, its full `fragment ... on ... { ... }` document, and the argument
/// declarations it forwards to the enclosing operation.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentBundle {
    pub name: String,
    pub document: String,
    pub arguments: Vec<ArgumentDeclaration>,
}
