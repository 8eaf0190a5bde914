mod built_operation;
mod document_builder;
mod operation_fragment;
mod operation_kind;

pub use built_operation::BuiltOperation;
pub use document_builder::DocumentBuildError;
pub use document_builder::DocumentBuilder;
pub use operation_fragment::OperationFragment;
pub use operation_kind::OperationKind;
