/// One column of a [`Table`](crate::table::Table): its name, the SQL types
/// reported by introspection, and whether it is part of the primary key.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    is_primary: bool,
    name: String,
    primary_position: Option<u32>,
    sql_type: Option<String>,
    udt_name: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            is_primary: false,
            name: name.into(),
            primary_position: None,
            sql_type: None,
            udt_name: None,
        }
    }

    pub fn with_sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    pub fn with_udt_name(mut self, udt_name: impl Into<String>) -> Self {
        self.udt_name = Some(udt_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> Option<&str> {
        self.sql_type.as_deref()
    }

    pub fn udt_name(&self) -> Option<&str> {
        self.udt_name.as_deref()
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// The column's 1-based ordinal within the primary key, when primary.
    pub fn primary_position(&self) -> Option<u32> {
        self.primary_position
    }

    pub(crate) fn mark_primary(&mut self, position: u32) {
        self.is_primary = true;
        self.primary_position = Some(position);
    }
}
