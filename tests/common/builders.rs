//! Test builders — ergonomic constructors for records, stores and scopes.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use fuzzmatch_core::{Predicate, Relation, SearchScope};
use fuzzmatch_store::{memory::Record, MemoryStore, RecordStore};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for JSON record fixtures.
///
/// # Example
///
/// ```rust
/// let ad = RecordBuilder::new()
///     .field("title", "Red bike")
///     .belongs_to("user", RecordBuilder::new().field("name", "Sara"))
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn null(mut self, key: &str) -> Self {
        self.fields.insert(key.to_string(), Value::Null);
        self
    }

    pub fn belongs_to(mut self, relation: &str, related: RecordBuilder) -> Self {
        self.fields
            .insert(relation.to_string(), Value::Object(related.build()));
        self
    }

    pub fn has_many(mut self, relation: &str, related: Vec<RecordBuilder>) -> Self {
        let items = related
            .into_iter()
            .map(|r| Value::Object(r.build()))
            .collect();
        self.fields.insert(relation.to_string(), Value::Array(items));
        self
    }

    pub fn build(self) -> Record {
        self.fields
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A store of records that only carry `field`.
pub fn store_of(field: &str, values: &[&str]) -> MemoryStore {
    MemoryStore::new(
        values
            .iter()
            .map(|v| RecordBuilder::new().field(field, *v).build())
            .collect(),
    )
}

/// Scope over plain fields, no relations.
pub fn fields(names: &[&str]) -> SearchScope {
    SearchScope::new(names.iter().copied())
}

/// Run `predicate` and collect `field` of every hit, in store order.
pub fn hits(store: &MemoryStore, predicate: &Predicate, field: &str) -> Vec<String> {
    store
        .filter(predicate)
        .expect("fixture predicate must execute")
        .into_iter()
        .map(|record| match &record[field] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// The `ads` relations used by most composer fixtures.
pub fn ad_relations() -> Vec<Relation> {
    vec![
        Relation::new("user", ["name", "email"]),
        Relation::new("category", ["name"]),
    ]
}
