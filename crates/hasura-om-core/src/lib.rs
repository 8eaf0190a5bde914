//! The query, mutation, and fragment compiler for Hasura-convention
//! GraphQL schemas.
//!
//! This crate turns declarative, per-table field and argument
//! specifications into GraphQL document strings, a variables payload, and a
//! response-reshaping plan. It is pure and synchronous; executing the built
//! documents over HTTP or WebSocket lives in the `hasura-om` crate.

pub mod arguments;
pub mod fields;
pub mod fragment;
pub mod operation;
pub mod response;
pub mod table;

pub use arguments::ArgumentBindError;
pub use arguments::ArgumentDeclaration;
pub use arguments::ArgumentKind;
pub use arguments::NestedArguments;
pub use arguments::OperationPrefix;
pub use fields::CompiledFields;
pub use fields::FieldEntry;
pub use fields::FieldSpec;
pub use fields::FieldSpecError;
pub use fields::Selectable;
pub use fragment::Fragment;
pub use fragment::FragmentBuildError;
pub use fragment::FragmentBundle;
pub use operation::BuiltOperation;
pub use operation::DocumentBuildError;
pub use operation::DocumentBuilder;
pub use operation::OperationFragment;
pub use operation::OperationKind;
pub use response::FlattenInstruction;
pub use response::Settings;
pub use response::SettingsOverride;
pub use response::flatten;
pub use table::AggregateFunction;
pub use table::AggregateParams;
pub use table::AggregateSpec;
pub use table::CountSpec;
pub use table::DeleteParams;
pub use table::Field;
pub use table::InsertParams;
pub use table::MutationParams;
pub use table::QueryParams;
pub use table::Returning;
pub use table::SelectParams;
pub use table::Table;
pub use table::TableBuildError;
pub use table::UpdateParams;
