use crate::arguments::ArgumentDeclaration;
use crate::fragment::FragmentBundle;
use crate::response::FlattenInstruction;
use serde_json::Map;
use serde_json::Value;

/// One table's contribution to an assembled document: a compiled operation
/// field together with everything the assembler needs to merge it with its
/// siblings and to reshape its slice of the response afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationFragment {
    /// Synthetic operation name, e.g. `Q_user` or `I_user`. The assembler
    /// joins these into the document's compound operation name.
    pub name: String,
    /// Operation-level variable declarations, bound arguments first, then
    /// declarations forwarded from the selection's nested subselections.
    pub declarations: Vec<ArgumentDeclaration>,
    /// The top-level selection text, e.g. `user (where: $s_user_where) { ... }`.
    pub selection: String,
    /// The type fragment the selection spreads, if it spreads one.
    pub type_fragment: Option<FragmentBundle>,
    /// Where this table's data lives in the raw response, keyed by the
    /// caller-facing result path.
    pub flatten: FlattenInstruction,
    /// The variables payload for the bound and caller-supplied variables.
    pub variables: Map<String, Value>,
}
