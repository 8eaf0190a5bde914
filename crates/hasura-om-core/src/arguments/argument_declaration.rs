/// An operation-level variable declaration: the variable's name (without the
/// leading `$`) plus the GraphQL type it is declared with
/// (e.g. `user_bool_exp`).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ArgumentDeclaration {
    graphql_type: String,
    variable: String,
}

impl ArgumentDeclaration {
    pub fn new(
        variable: impl Into<String>,
        graphql_type: impl Into<String>,
    ) -> Self {
        Self {
            graphql_type: graphql_type.into(),
            variable: variable.into(),
        }
    }

    pub fn graphql_type(&self) -> &str {
        &self.graphql_type
    }

    /// Renders the declaration as it appears in an operation's argument list
    /// (e.g. `$s_user_where: user_bool_exp`).
    pub fn render(&self) -> String {
        format!("${}: {}", self.variable, self.graphql_type)
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}
