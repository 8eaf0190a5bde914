mod field;
mod mutation_params;
mod query_params;
mod returning;
#[allow(clippy::module_inception)]
mod table;

pub use field::Field;
pub use mutation_params::DeleteParams;
pub use mutation_params::InsertParams;
pub use mutation_params::MutationParams;
pub use mutation_params::UpdateParams;
pub use query_params::AggregateFunction;
pub use query_params::AggregateParams;
pub use query_params::AggregateSpec;
pub use query_params::CountSpec;
pub use query_params::QueryParams;
pub use query_params::SelectParams;
pub use returning::Returning;
pub use table::Table;
pub use table::TableBuildError;

#[cfg(test)]
mod tests;
