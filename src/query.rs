//! Search queries over annotated cards.
//!
//! - [`filter`] - `filter:<name>` token extraction
//! - [`prepared`] - weighted clauses and card scoring

pub mod filter;
pub mod prepared;

pub use filter::extract_filters_from_query;
pub use prepared::{ClauseKind, FieldClauses, PreparedQuery, QueryClause, QueryMatch};
