//! Typed predicate tree handed to record-store adapters.
//!
//! The composer only ever builds these; executing one is the adapter's job.
//! Needles in [`Predicate::FieldContains`] are already normalized, and the
//! containment test is case-insensitive.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Always true: no filtering applied.
    MatchAll,
    /// The field's text contains `needle`, ignoring case.
    FieldContains { field: String, needle: String },
    /// At least one record reachable through `relation` satisfies `predicate`.
    RelationExists {
        relation: String,
        predicate: Box<Predicate>,
    },
    /// Every child holds. An empty `And` is true.
    And(Vec<Predicate>),
    /// Some child holds. An empty `Or` is false.
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Predicate::FieldContains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn exists(relation: impl Into<String>, predicate: Predicate) -> Self {
        Predicate::RelationExists {
            relation: relation.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Conjunction with another predicate, e.g. a host's own status filter.
    /// `MatchAll` on either side is absorbed.
    pub fn and(self, other: Predicate) -> Self {
        match (self, other) {
            (Predicate::MatchAll, p) | (p, Predicate::MatchAll) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, q) => Predicate::And(vec![p, q]),
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Predicate::MatchAll)
    }

    /// Every needle in the tree, depth-first, duplicates included.
    pub fn needles(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_needles(&mut out);
        out
    }

    fn collect_needles<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::MatchAll => {}
            Predicate::FieldContains { needle, .. } => out.push(needle),
            Predicate::RelationExists { predicate, .. } => predicate.collect_needles(out),
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    child.collect_needles(out);
                }
            }
        }
    }
}
