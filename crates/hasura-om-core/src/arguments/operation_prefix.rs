/// The operation kind a set of arguments is being bound for. The prefix
/// letter namespaces every generated variable (`s_user_where` vs
/// `u_user_where`) so that one assembled document can carry several
/// operations over the same table without variable collisions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationPrefix {
    Select,
    Aggregate,
    Insert,
    Update,
    Delete,
}

impl OperationPrefix {
    pub fn letter(&self) -> &'static str {
        match self {
            OperationPrefix::Select => "s",
            OperationPrefix::Aggregate => "a",
            OperationPrefix::Insert => "i",
            OperationPrefix::Update => "u",
            OperationPrefix::Delete => "d",
        }
    }

    /// Whether the `where` argument is non-nullable for this operation kind.
    pub fn where_required(&self) -> bool {
        matches!(self, OperationPrefix::Update | OperationPrefix::Delete)
    }
}
