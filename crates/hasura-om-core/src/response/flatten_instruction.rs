/// A recorded mapping from a dotted caller-facing result path
/// (`user.insert`) to the dotted path where that data lives in the raw
/// server response (`insert_user.returning`). Applying the instruction set
/// after execution is the precise inverse of the request-shape transform.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlattenInstruction {
    pub result_path: String,
    pub response_path: String,
}

impl FlattenInstruction {
    pub fn new(
        result_path: impl Into<String>,
        response_path: impl Into<String>,
    ) -> Self {
        Self {
            result_path: result_path.into(),
            response_path: response_path.into(),
        }
    }
}
