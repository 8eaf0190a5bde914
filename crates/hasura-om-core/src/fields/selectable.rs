use crate::arguments::ArgumentDeclaration;

/// Anything that can stand in for a compiled selection: a block of field
/// text plus the operation-level argument declarations that text depends on.
///
/// Both [`CompiledFields`](crate::fields::CompiledFields) and
/// [`Fragment`](crate::fragment::Fragment) implement this, which is what
/// lets a fragment be embedded as one branch of a larger field tree without
/// the compiler special-casing it.
pub trait Selectable {
    fn compiled_text(&self) -> &str;

    fn forwarded_arguments(&self) -> &[ArgumentDeclaration];
}
