mod argument_binder;
mod argument_declaration;
mod argument_kind;
mod nested_arguments;
mod operation_prefix;

pub use argument_binder::BoundArguments;
pub use argument_binder::bind;
pub use argument_declaration::ArgumentDeclaration;
pub use argument_kind::ArgumentBindError;
pub use argument_kind::ArgumentKind;
pub use nested_arguments::NestedArguments;
pub use operation_prefix::OperationPrefix;

#[cfg(test)]
mod tests;
