mod lineage_query;
mod predicate;
mod query;

pub use lineage_query::{LineageError, LineageQuery, LineageQueryOutput};
pub use predicate::Predicate;
pub use query::{Query, QueryError};
