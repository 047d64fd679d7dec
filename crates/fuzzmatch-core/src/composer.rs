//! Predicate composer — builds the match condition for one search box.
//!
//! Short queries (below [`FUZZY_MIN_LEN`] characters) only get exact substring
//! clauses. Longer queries get a tiered OR: exact on fields, exact on
//! relations, fuzzy on fields, fuzzy on relations. The expander is only
//! consulted on the tiered path.

use crate::config::SearchSettings;
use crate::expander::{normalize, Expand, TermExpander, VariantSet};
use crate::predicate::Predicate;
use serde::{Deserialize, Serialize};

/// Queries shorter than this (in chars) skip fuzzy expansion.
pub const FUZZY_MIN_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Scope types
// ---------------------------------------------------------------------------

/// A one-hop related entity and the fields on it to search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Relation {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything one list screen searches: its own columns plus related ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchScope {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl SearchScope {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            relations: Vec::new(),
        }
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.relations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Stateless predicate builder. Generic over the expander so it can be
/// swapped out; [`Composer::new`] uses the built-in [`TermExpander`].
#[derive(Debug, Clone)]
pub struct Composer<E = TermExpander> {
    expander: E,
    fuzzy_min_len: usize,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self::with_expander(TermExpander::default())
    }

    /// Composer driven by a `[search]` config section.
    pub fn with_settings(settings: &SearchSettings) -> Self {
        Self::with_expander(TermExpander::with_limit(settings.max_variants))
            .fuzzy_min_len(settings.fuzzy_min_len)
    }
}

impl<E: Expand> Composer<E> {
    pub fn with_expander(expander: E) -> Self {
        Self {
            expander,
            fuzzy_min_len: FUZZY_MIN_LEN,
        }
    }

    pub fn fuzzy_min_len(mut self, len: usize) -> Self {
        self.fuzzy_min_len = len;
        self
    }

    /// Build the predicate for a raw search box value.
    ///
    /// Returns [`Predicate::MatchAll`] for an empty (or whitespace) query. With
    /// no fields and no relations the result is an empty `Or`, which matches
    /// nothing. Field and relation names are passed through unchecked.
    pub fn build<S: AsRef<str>>(&self, query: &str, fields: &[S], relations: &[Relation]) -> Predicate {
        let query = normalize(query);
        if query.is_empty() {
            tracing::debug!("empty query, no filtering");
            return Predicate::MatchAll;
        }

        let mut clauses = exact_clauses(&query, fields, relations);
        if query.chars().count() < self.fuzzy_min_len {
            tracing::debug!(query = %query, clauses = clauses.len(), tier = "exact", "composed predicate");
            return Predicate::Or(clauses);
        }

        let variants = self.expander.expand(&query);
        clauses.extend(fuzzy_clauses(&variants, fields, relations));
        tracing::debug!(
            query = %query,
            variants = variants.len(),
            clauses = clauses.len(),
            tier = "fuzzy",
            "composed predicate"
        );
        Predicate::Or(clauses)
    }

    /// [`Composer::build`] over a [`SearchScope`].
    pub fn build_scoped(&self, query: &str, scope: &SearchScope) -> Predicate {
        self.build(query, &scope.fields, &scope.relations)
    }
}

/// Build a predicate with the default expander and threshold.
pub fn build_predicate<S: AsRef<str>>(query: &str, fields: &[S], relations: &[Relation]) -> Predicate {
    Composer::new().build(query, fields, relations)
}

// ---------------------------------------------------------------------------
// Clause groups
// ---------------------------------------------------------------------------

/// Groups (a) and (b): the query itself on every field and every relation.
fn exact_clauses<S: AsRef<str>>(query: &str, fields: &[S], relations: &[Relation]) -> Vec<Predicate> {
    let on_fields = fields
        .iter()
        .map(|field| Predicate::contains(field.as_ref(), query));
    let on_relations = relations.iter().map(|relation| {
        let any = relation
            .fields
            .iter()
            .map(|field| Predicate::contains(field.as_str(), query))
            .collect();
        Predicate::exists(relation.name.as_str(), Predicate::Or(any))
    });
    on_fields.chain(on_relations).collect()
}

/// Groups (c) and (d): every variant on every field, then on every relation.
fn fuzzy_clauses<'a, S: AsRef<str>>(
    variants: &'a VariantSet,
    fields: &'a [S],
    relations: &'a [Relation],
) -> impl Iterator<Item = Predicate> + 'a {
    let on_fields = fields.iter().map(move |field| {
        let any = variants
            .iter()
            .map(|variant| Predicate::contains(field.as_ref(), variant.as_str()))
            .collect();
        Predicate::Or(any)
    });
    let on_relations = relations.iter().map(move |relation| {
        let any = relation
            .fields
            .iter()
            .flat_map(|field| {
                variants
                    .iter()
                    .map(move |variant| Predicate::contains(field.as_str(), variant.as_str()))
            })
            .collect();
        Predicate::exists(relation.name.as_str(), Predicate::Or(any))
    });
    on_fields.chain(on_relations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
