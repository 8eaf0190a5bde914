#[allow(clippy::module_inception)]
mod fragment;
mod fragment_bundle;

pub use fragment::Fragment;
pub use fragment::FragmentBuildError;
pub use fragment_bundle::FragmentBundle;
