use crate::arguments::ArgumentDeclaration;
use crate::arguments::ArgumentKind;
use crate::arguments::OperationPrefix;
use crate::arguments::bind;
use crate::fields::FieldSpec;
use crate::fields::FieldSpecError;
use crate::fields::compile;
use crate::fragment::Fragment;
use crate::fragment::FragmentBuildError;
use crate::fragment::FragmentBundle;
use crate::operation::OperationFragment;
use crate::operation::OperationKind;
use crate::response::FlattenInstruction;
use crate::table::AggregateParams;
use crate::table::DeleteParams;
use crate::table::Field;
use crate::table::InsertParams;
use crate::table::MutationParams;
use crate::table::QueryParams;
use crate::table::Returning;
use crate::table::SelectParams;
use crate::table::UpdateParams;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

type Result<T> = std::result::Result<T, TableBuildError>;

const BASE_FRAGMENT: &str = "base";
const PK_FRAGMENT: &str = "pk";

/// One table of the schema: its fields, its named fragments, and the pure
/// builder methods that compile per-operation selections over it.
///
/// Fields and fragments are populated during setup (introspection or
/// manually) and read-only afterwards; concurrent builds over a shared
/// table are safe, concurrent mutation is the embedding application's
/// problem to serialize.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    fields: IndexMap<String, Field>,
    fragments: IndexMap<String, Fragment>,
    kind: String,
    name: String,
}

impl Table {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            fields: IndexMap::new(),
            fragments: IndexMap::new(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Adds or replaces a column. Derived fragments are not rebuilt
    /// implicitly; call [`Table::rebuild_derived_fragments`] when done
    /// mutating.
    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn field(&self, name: &str) -> Result<&Field> {
        self.fields
            .get(name)
            .ok_or_else(|| TableBuildError::FieldNotFound {
                table: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Marks a column as part of the primary key, with its 1-based ordinal
    /// within the key.
    pub fn set_primary_key(&mut self, name: &str, position: u32) -> Result<()> {
        let field = self.fields.get_mut(name).ok_or_else(|| {
            TableBuildError::FieldNotFound {
                table: self.name.clone(),
                name: name.to_string(),
            }
        })?;
        field.mark_primary(position);

        Ok(())
    }

    pub fn fragment(&self, name: &str) -> Result<&Fragment> {
        self.fragments
            .get(name)
            .ok_or_else(|| TableBuildError::FragmentNotFound {
                table: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Defines (or redefines) a named fragment over this table.
    pub fn create_fragment(
        &mut self,
        name: &str,
        spec: &FieldSpec,
    ) -> Result<&Fragment> {
        let fragment = Fragment::new(name, &self.name, spec)?;
        self.fragments.insert(name.to_string(), fragment);

        Ok(&self.fragments[name])
    }

    /// Rebuilds the `base` fragment (all fields) and the `pk` fragment
    /// (primary-key fields in ordinal order; removed when the table has no
    /// primary key) from the current field set. Must be called again after
    /// any field or primary-key mutation.
    pub fn rebuild_derived_fragments(&mut self) -> Result<()> {
        let all = self.fields.keys().cloned().collect::<Vec<_>>();
        let base = Fragment::new(BASE_FRAGMENT, &self.name, &FieldSpec::names(all))?;
        self.fragments.insert(BASE_FRAGMENT.to_string(), base);

        let mut primary = self
            .fields
            .values()
            .filter(|field| field.is_primary())
            .collect::<Vec<_>>();
        primary.sort_by_key(|field| field.primary_position().unwrap_or(u32::MAX));

        if primary.is_empty() {
            self.fragments.shift_remove(PK_FRAGMENT);
        } else {
            let names = primary
                .into_iter()
                .map(|field| field.name().to_string())
                .collect::<Vec<_>>();
            let pk = Fragment::new(PK_FRAGMENT, &self.name, &FieldSpec::names(names))?;
            self.fragments.insert(PK_FRAGMENT.to_string(), pk);
        }

        Ok(())
    }

    /// Builds the operation fragments for a query (or subscription) over
    /// this table: one per present operation kind. Empty parameters are an
    /// implicit full select.
    pub fn build_query(
        &self,
        params: &QueryParams,
        kind: OperationKind,
    ) -> Result<Vec<OperationFragment>> {
        let mut built = Vec::new();

        if params.select.is_none() && params.aggregate.is_none() {
            built.push(self.build_select(&SelectParams::default(), kind)?);
            return Ok(built);
        }

        if let Some(select) = &params.select {
            built.push(self.build_select(select, kind)?);
        }
        if let Some(aggregate) = &params.aggregate {
            built.push(self.build_aggregate(aggregate, kind)?);
        }

        Ok(built)
    }

    pub fn build_select(
        &self,
        params: &SelectParams,
        kind: OperationKind,
    ) -> Result<OperationFragment> {
        let resolved = self.resolve_fields(&params.returning)?;
        let bound = bind(
            &params.argument_pairs(),
            &self.name,
            OperationPrefix::Select,
        );

        let letter = match kind {
            OperationKind::Subscription => "S",
            _ => "Q",
        };

        Ok(OperationFragment {
            name: format!("{letter}_{}", self.name),
            selection: format!(
                "{}{} {{\n{}\n}}",
                self.name,
                bound.usage_text(),
                resolved.text,
            ),
            declarations: merge_declarations(bound.declarations, resolved.forwarded),
            type_fragment: resolved.fragment,
            flatten: FlattenInstruction::new(
                format!("{}.select", self.name),
                self.name.clone(),
            ),
            variables: merge_variables(&params.variables, bound.variables),
        })
    }

    pub fn build_aggregate(
        &self,
        params: &AggregateParams,
        _kind: OperationKind,
    ) -> Result<OperationFragment> {
        let resolved = self.resolve_aggregate_fields(params)?;
        let bound = bind(
            &params.argument_pairs(),
            &self.name,
            OperationPrefix::Aggregate,
        );

        Ok(OperationFragment {
            name: format!("A_{}", self.name),
            selection: format!(
                "{}_aggregate{} {{\naggregate {{\n{}\n}}\n}}",
                self.name,
                bound.usage_text(),
                resolved.text,
            ),
            declarations: merge_declarations(bound.declarations, resolved.forwarded),
            type_fragment: None,
            flatten: FlattenInstruction::new(
                format!("{}.aggregate", self.name),
                format!("{}_aggregate.aggregate", self.name),
            ),
            variables: merge_variables(&params.variables, bound.variables),
        })
    }

    /// Builds one operation fragment per mutation kind present in `params`,
    /// in insert / update / delete order.
    pub fn build_mutation(
        &self,
        params: &MutationParams,
    ) -> Result<Vec<OperationFragment>> {
        let mut built = Vec::new();

        if let Some(insert) = &params.insert {
            built.push(self.build_insert(insert)?);
        }
        if let Some(update) = &params.update {
            built.push(self.build_update(update)?);
        }
        if let Some(delete) = &params.delete {
            built.push(self.build_delete(delete)?);
        }

        Ok(built)
    }

    pub fn build_insert(&self, params: &InsertParams) -> Result<OperationFragment> {
        self.build_mutation_kind(
            "insert",
            "I",
            OperationPrefix::Insert,
            &params.argument_pairs(),
            &params.returning,
            &params.variables,
        )
    }

    pub fn build_update(&self, params: &UpdateParams) -> Result<OperationFragment> {
        self.build_mutation_kind(
            "update",
            "U",
            OperationPrefix::Update,
            &params.argument_pairs(),
            &params.returning,
            &params.variables,
        )
    }

    pub fn build_delete(&self, params: &DeleteParams) -> Result<OperationFragment> {
        self.build_mutation_kind(
            "delete",
            "D",
            OperationPrefix::Delete,
            &params.argument_pairs(),
            &params.returning,
            &params.variables,
        )
    }

    fn build_mutation_kind(
        &self,
        verb: &str,
        letter: &str,
        prefix: OperationPrefix,
        pairs: &[(ArgumentKind, &Value)],
        returning: &Returning,
        caller_variables: &Map<String, Value>,
    ) -> Result<OperationFragment> {
        let resolved = self.resolve_fields(returning)?;
        let bound = bind(pairs, &self.name, prefix);

        Ok(OperationFragment {
            name: format!("{letter}_{}", self.name),
            selection: format!(
                "{verb}_{}{} {{\nreturning {{\n{}\n}}\n}}",
                self.name,
                bound.usage_text(),
                resolved.text,
            ),
            declarations: merge_declarations(bound.declarations, resolved.forwarded),
            type_fragment: resolved.fragment,
            flatten: FlattenInstruction::new(
                format!("{}.{verb}", self.name),
                format!("{verb}_{}.returning", self.name),
            ),
            variables: merge_variables(caller_variables, bound.variables),
        })
    }

    /// Resolves the returning fields of an operation. Explicit fields win;
    /// otherwise a fragment is spread and its document and forwarded
    /// arguments propagate upward.
    fn resolve_fields(&self, returning: &Returning) -> Result<ResolvedFields> {
        let fragment = match returning {
            Returning::Fields(spec) => {
                let compiled = compile(spec)?;
                if compiled.text().trim().is_empty() {
                    return Err(TableBuildError::NoReturningFields {
                        table: self.name.clone(),
                    });
                }

                return Ok(ResolvedFields {
                    text: compiled.text().to_string(),
                    forwarded: compiled.arguments().to_vec(),
                    fragment: None,
                });
            }
            Returning::Fragment(fragment) => fragment,
            Returning::FragmentName(name) => self.fragment(name)?,
            Returning::Base => self.fragments.get(BASE_FRAGMENT).ok_or_else(|| {
                TableBuildError::NoFragmentsAvailable {
                    table: self.name.clone(),
                }
            })?,
        };

        Ok(ResolvedFields {
            text: format!("...{}", fragment.name()),
            forwarded: fragment.arguments().to_vec(),
            fragment: Some(fragment.bundle()),
        })
    }

    /// Resolves the inner `aggregate { ... }` selection: explicit fields if
    /// given, otherwise rendered from the structured aggregate spec.
    fn resolve_aggregate_fields(
        &self,
        params: &AggregateParams,
    ) -> Result<ResolvedFields> {
        if let Some(spec) = &params.fields {
            let compiled = compile(spec)?;
            if compiled.text().trim().is_empty() {
                return Err(TableBuildError::NoReturningFields {
                    table: self.name.clone(),
                });
            }

            return Ok(ResolvedFields {
                text: compiled.text().to_string(),
                forwarded: compiled.arguments().to_vec(),
                fragment: None,
            });
        }

        let mut parts = Vec::new();
        if let Some(count) = &params.aggregate.count {
            let mut arguments = Vec::new();
            if !count.columns.is_empty() {
                arguments.push(format!("columns: {}", count.columns.join(",")));
            }
            if count.distinct {
                arguments.push("distinct: true".to_string());
            }

            if arguments.is_empty() {
                parts.push("count".to_string());
            } else {
                parts.push(format!("count({})", arguments.join(",")));
            }
        }
        for (function, columns) in &params.aggregate.functions {
            parts.push(format!(
                "{} {{\n{}\n}}",
                function.name(),
                columns.join("\n"),
            ));
        }

        if parts.is_empty() {
            return Err(TableBuildError::NoReturningFields {
                table: self.name.clone(),
            });
        }

        Ok(ResolvedFields {
            text: parts.join("\n"),
            forwarded: Vec::new(),
            fragment: None,
        })
    }
}

struct ResolvedFields {
    text: String,
    forwarded: Vec<ArgumentDeclaration>,
    fragment: Option<FragmentBundle>,
}

fn merge_declarations(
    bound: Vec<ArgumentDeclaration>,
    forwarded: Vec<ArgumentDeclaration>,
) -> Vec<ArgumentDeclaration> {
    let mut declarations = bound;
    declarations.extend(forwarded);
    declarations
}

/// Caller-supplied variables first, bound variables after: a caller cannot
/// shadow a bound argument.
fn merge_variables(
    caller: &Map<String, Value>,
    bound: Map<String, Value>,
) -> Map<String, Value> {
    let mut variables = caller.clone();
    for (name, value) in bound {
        variables.insert(name, value);
    }

    variables
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TableBuildError {
    #[error("field `{name}` is not defined on table `{table}`")]
    FieldNotFound { table: String, name: String },

    #[error("fragment `{name}` is not defined on table `{table}`")]
    FragmentNotFound { table: String, name: String },

    #[error("table `{table}` has no fragments; build them or pass explicit fields")]
    NoFragmentsAvailable { table: String },

    #[error("no returning fields could be resolved for table `{table}`")]
    NoReturningFields { table: String },

    #[error(transparent)]
    FieldSpec(#[from] FieldSpecError),

    #[error(transparent)]
    Fragment(#[from] FragmentBuildError),
}
