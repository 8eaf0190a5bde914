use crate::arguments::ArgumentKind;
use crate::fields::FieldSpec;
use crate::table::Returning;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;

/// Per-table query parameters: an optional `select` and an optional
/// `aggregate`. A bare [`SelectParams`] converts into a query that selects
/// only (the implicit-select form of the caller surface).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    pub select: Option<SelectParams>,
    pub aggregate: Option<AggregateParams>,
}

impl From<SelectParams> for QueryParams {
    fn from(select: SelectParams) -> Self {
        Self {
            select: Some(select),
            aggregate: None,
        }
    }
}

impl From<AggregateParams> for QueryParams {
    fn from(aggregate: AggregateParams) -> Self {
        Self {
            select: None,
            aggregate: Some(aggregate),
        }
    }
}

/// Parameters of one `select` over a table. Argument values are raw JSON,
/// passed through to the variables payload untouched; `variables` carries
/// values for argument declarations forwarded out of the selected
/// fragment's nested subselections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectParams {
    pub where_clause: Option<Value>,
    pub limit: Option<Value>,
    pub offset: Option<Value>,
    pub order_by: Option<Value>,
    pub distinct_on: Option<Value>,
    pub returning: Returning,
    pub variables: Map<String, Value>,
}

impl SelectParams {
    /// The present filter arguments, in binding order.
    pub(crate) fn argument_pairs(&self) -> Vec<(ArgumentKind, &Value)> {
        filter_pairs(
            &self.where_clause,
            &self.limit,
            &self.offset,
            &self.order_by,
            &self.distinct_on,
        )
    }
}

/// Parameters of one `aggregate` over a table: the same filter arguments as
/// a select, plus either explicit aggregate fields or a structured
/// [`AggregateSpec`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateParams {
    pub where_clause: Option<Value>,
    pub limit: Option<Value>,
    pub offset: Option<Value>,
    pub order_by: Option<Value>,
    pub distinct_on: Option<Value>,
    pub fields: Option<FieldSpec>,
    pub aggregate: AggregateSpec,
    pub variables: Map<String, Value>,
}

impl AggregateParams {
    pub(crate) fn argument_pairs(&self) -> Vec<(ArgumentKind, &Value)> {
        filter_pairs(
            &self.where_clause,
            &self.limit,
            &self.offset,
            &self.order_by,
            &self.distinct_on,
        )
    }
}

/// The structured aggregate selection: an optional `count` plus any of the
/// per-column aggregate functions mapped to the columns they run over.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateSpec {
    pub count: Option<CountSpec>,
    pub functions: IndexMap<AggregateFunction, Vec<String>>,
}

impl AggregateSpec {
    pub fn is_empty(&self) -> bool {
        self.count.is_none() && self.functions.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountSpec {
    pub columns: Vec<String>,
    pub distinct: bool,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AggregateFunction {
    Avg,
    Max,
    Min,
    Stddev,
    StddevPop,
    StddevSamp,
    Sum,
    VarPop,
    VarSamp,
    Variance,
}

impl AggregateFunction {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Avg => "avg",
            AggregateFunction::Max => "max",
            AggregateFunction::Min => "min",
            AggregateFunction::Stddev => "stddev",
            AggregateFunction::StddevPop => "stddev_pop",
            AggregateFunction::StddevSamp => "stddev_samp",
            AggregateFunction::Sum => "sum",
            AggregateFunction::VarPop => "var_pop",
            AggregateFunction::VarSamp => "var_samp",
            AggregateFunction::Variance => "variance",
        }
    }
}

fn filter_pairs<'params>(
    where_clause: &'params Option<Value>,
    limit: &'params Option<Value>,
    offset: &'params Option<Value>,
    order_by: &'params Option<Value>,
    distinct_on: &'params Option<Value>,
) -> Vec<(ArgumentKind, &'params Value)> {
    let candidates = [
        (ArgumentKind::Where, where_clause),
        (ArgumentKind::Limit, limit),
        (ArgumentKind::Offset, offset),
        (ArgumentKind::OrderBy, order_by),
        (ArgumentKind::DistinctOn, distinct_on),
    ];

    candidates
        .into_iter()
        .filter_map(|(kind, value)| {
            value.as_ref().map(|value| (kind, value))
        })
        .collect()
}
