use crate::arguments::ArgumentKind;
use crate::table::Returning;
use serde_json::Map;
use serde_json::Value;

/// Per-table mutation parameters. Each present kind contributes its own
/// operation field to the assembled document; the three kinds are the only
/// representable ones, so an unrecognized mutation kind cannot be requested.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationParams {
    pub insert: Option<InsertParams>,
    pub update: Option<UpdateParams>,
    pub delete: Option<DeleteParams>,
}

impl From<InsertParams> for MutationParams {
    fn from(insert: InsertParams) -> Self {
        Self {
            insert: Some(insert),
            ..Self::default()
        }
    }
}

impl From<UpdateParams> for MutationParams {
    fn from(update: UpdateParams) -> Self {
        Self {
            update: Some(update),
            ..Self::default()
        }
    }
}

impl From<DeleteParams> for MutationParams {
    fn from(delete: DeleteParams) -> Self {
        Self {
            delete: Some(delete),
            ..Self::default()
        }
    }
}

/// Parameters of one insert: the rows to insert (required by the schema's
/// `[{table}_insert_input!]!` type) and an optional conflict clause.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertParams {
    pub objects: Value,
    pub on_conflict: Option<Value>,
    pub returning: Returning,
    pub variables: Map<String, Value>,
}

impl InsertParams {
    pub fn new(objects: Value) -> Self {
        Self {
            objects,
            on_conflict: None,
            returning: Returning::default(),
            variables: Map::new(),
        }
    }

    pub(crate) fn argument_pairs(&self) -> Vec<(ArgumentKind, &Value)> {
        let mut pairs = vec![(ArgumentKind::Objects, &self.objects)];
        if let Some(on_conflict) = &self.on_conflict {
            pairs.push((ArgumentKind::OnConflict, on_conflict));
        }

        pairs
    }
}

/// Parameters of one update. The filter is required (`{table}_bool_exp!`):
/// an unfiltered update must be spelled out as `{}` explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateParams {
    pub where_clause: Value,
    pub set: Option<Value>,
    pub inc: Option<Value>,
    pub returning: Returning,
    pub variables: Map<String, Value>,
}

impl UpdateParams {
    pub fn new(where_clause: Value) -> Self {
        Self {
            where_clause,
            set: None,
            inc: None,
            returning: Returning::default(),
            variables: Map::new(),
        }
    }

    pub(crate) fn argument_pairs(&self) -> Vec<(ArgumentKind, &Value)> {
        let mut pairs = vec![(ArgumentKind::Where, &self.where_clause)];
        if let Some(set) = &self.set {
            pairs.push((ArgumentKind::Set, set));
        }
        if let Some(inc) = &self.inc {
            pairs.push((ArgumentKind::Inc, inc));
        }

        pairs
    }
}

/// Parameters of one delete; the filter is required, as for updates.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteParams {
    pub where_clause: Value,
    pub returning: Returning,
    pub variables: Map<String, Value>,
}

impl DeleteParams {
    pub fn new(where_clause: Value) -> Self {
        Self {
            where_clause,
            returning: Returning::default(),
            variables: Map::new(),
        }
    }

    pub(crate) fn argument_pairs(&self) -> Vec<(ArgumentKind, &Value)> {
        vec![(ArgumentKind::Where, &self.where_clause)]
    }
}
