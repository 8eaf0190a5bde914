use crate::response::FlattenInstruction;
use serde_json::Map;
use serde_json::Value;

/// A fully assembled GraphQL document ready for a transport, plus the plan
/// for reshaping its response.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltOperation {
    pub document: String,
    pub variables: Map<String, Value>,
    pub flatten: Vec<FlattenInstruction>,
}
