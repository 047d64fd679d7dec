//! fuzzmatch-store — adapters that execute [`Predicate`] trees.
//!
//! - [`memory`]: an in-memory store of JSON records, evaluated directly.
//! - [`sql`]: renders a predicate into a parameterised SQL `WHERE` fragment.
//!
//! Neither adapter validates the predicate up front; an unknown field or
//! relation surfaces when the predicate is executed, the same way an
//! "unknown column" would from a database.

pub mod memory;
pub mod sql;

pub use fuzzmatch_core::Predicate;
pub use memory::MemoryStore;

/// Errors raised while executing a predicate against a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown field `{field}`")]
    UnknownField { field: String },

    #[error("unknown relation `{relation}`")]
    UnknownRelation { relation: String },

    #[error("relation `{relation}` must hold an object, an array of objects, or null")]
    InvalidRelation { relation: String },

    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A searchable collection of records.
///
/// Implementors translate a [`Predicate`] into their native filter and return
/// the matching records in store order.
pub trait RecordStore {
    type Record;

    fn filter(&self, predicate: &Predicate) -> Result<Vec<&Self::Record>, StoreError>;
}
