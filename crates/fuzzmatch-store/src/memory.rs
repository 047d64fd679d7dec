//! In-memory record store over JSON objects.
//!
//! Field values are matched as text: strings directly, numbers and booleans
//! through their JSON form, `null` never. A relation is an object
//! (belongs-to), an array of objects (has-many) or `null` (nothing related).

use crate::{RecordStore, StoreError};
use fuzzmatch_core::Predicate;
use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of objects.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(record) => Ok(record),
                _ => Err(StoreError::NotAnObject { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    type Record = Record;

    fn filter(&self, predicate: &Predicate) -> Result<Vec<&Record>, StoreError> {
        let mut matched = Vec::new();
        for record in &self.records {
            if matches(record, predicate)? {
                matched.push(record);
            }
        }
        tracing::debug!(matched = matched.len(), total = self.records.len(), "filtered memory store");
        Ok(matched)
    }
}

/// Evaluate `predicate` against one record.
///
/// `And`/`Or` short-circuit, so an unknown name after the deciding clause
/// goes unnoticed.
pub fn matches(record: &Record, predicate: &Predicate) -> Result<bool, StoreError> {
    match predicate {
        Predicate::MatchAll => Ok(true),
        Predicate::FieldContains { field, needle } => {
            let value = record
                .get(field)
                .ok_or_else(|| StoreError::UnknownField { field: field.clone() })?;
            Ok(text_of(value).is_some_and(|text| text.contains(&needle.to_lowercase())))
        }
        Predicate::RelationExists { relation, predicate } => {
            let value = record
                .get(relation)
                .ok_or_else(|| StoreError::UnknownRelation { relation: relation.clone() })?;
            let invalid = || StoreError::InvalidRelation { relation: relation.clone() };
            match value {
                Value::Null => Ok(false),
                Value::Object(related) => matches(related, predicate),
                Value::Array(items) => {
                    for item in items {
                        let related = item.as_object().ok_or_else(invalid)?;
                        if matches(related, predicate)? {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
                _ => Err(invalid()),
            }
        }
        Predicate::And(children) => {
            for child in children {
                if !matches(record, child)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Predicate::Or(children) => {
            for child in children {
                if matches(record, child)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Lower-cased searchable text of a field value.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.to_lowercase()),
        other => Some(other.to_string().to_lowercase()),
    }
}
