use crate::fields::FieldSpec;
use crate::fragment::Fragment;

/// Where the returning fields of an operation come from: an explicit field
/// spec, a fragment looked up by name on the table, a fragment instance
/// passed directly, or (by default) the table's `base` fragment.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Returning {
    #[default]
    Base,
    Fields(FieldSpec),
    Fragment(Fragment),
    FragmentName(String),
}

impl From<FieldSpec> for Returning {
    fn from(spec: FieldSpec) -> Self {
        Returning::Fields(spec)
    }
}

impl From<Fragment> for Returning {
    fn from(fragment: Fragment) -> Self {
        Returning::Fragment(fragment)
    }
}

impl From<&str> for Returning {
    fn from(name: &str) -> Self {
        Returning::FragmentName(name.to_string())
    }
}
