mod compiled_fields;
mod field_spec;
mod field_spec_compiler;
mod selectable;

pub use compiled_fields::CompiledFields;
pub use field_spec::FieldEntry;
pub use field_spec::FieldSpec;
pub use field_spec::FieldSpecError;
pub use field_spec_compiler::compile;
pub use selectable::Selectable;
