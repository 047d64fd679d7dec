//! Term expander — turns one query into a short list of "close enough" strings.
//!
//! Generation runs through fixed stages (seed, substitution, deletion,
//! insertion, transposition, trimming, domain typos). Each stage appends only
//! candidates not already present, and only while the cap has room. Stage
//! order therefore decides which variants survive once the cap is hit.
//!
//! Lengths are counted in `char`s, not bytes.

use crate::tables::{COMMON_LETTERS, SUBSTITUTIONS, SUBSTITUTION_ORDER, TYPOS, TYPO_ORDER};
use std::ops::Deref;

/// Maximum number of variants returned by [`expand`], the original included.
pub const MAX_VARIANTS: usize = 8;

/// No generated variant may be shorter than this. Only the seed is exempt.
const MIN_VARIANT_LEN: usize = 2;

/// Shortest query that gets deletions, so every deletion keeps at least
/// four characters.
const DELETION_MIN_QUERY_LEN: usize = 5;

/// Trim and lower-case a raw query. Every other entry point goes through this.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// VariantSet
// ---------------------------------------------------------------------------

/// Ordered, deduplicated, capped list of query variants.
///
/// The first element is always the normalized query. Dereferences to
/// `[String]` so the usual slice methods (`iter`, `contains`, indexing) apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    items: Vec<String>,
}

impl VariantSet {
    /// The normalized query the set was generated from.
    pub fn original(&self) -> &str {
        // A VariantSet is only built by `Collector::new`, which seeds it.
        &self.items[0]
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl Deref for VariantSet {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.items
    }
}

impl IntoIterator for VariantSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ---------------------------------------------------------------------------
// Expand trait + default implementation
// ---------------------------------------------------------------------------

/// Anything that can turn a query into a [`VariantSet`].
///
/// The composer is generic over this so callers (and tests) can swap in their
/// own generator.
pub trait Expand {
    fn expand(&self, query: &str) -> VariantSet;
}

impl<E: Expand + ?Sized> Expand for &E {
    fn expand(&self, query: &str) -> VariantSet {
        (**self).expand(query)
    }
}

/// The built-in staged generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermExpander {
    limit: usize,
}

impl Default for TermExpander {
    fn default() -> Self {
        Self { limit: MAX_VARIANTS }
    }
}

impl TermExpander {
    /// An expander with a non-default cap. A cap of zero is treated as one:
    /// the original query always survives.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: limit.max(1) }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Expand for TermExpander {
    fn expand(&self, query: &str) -> VariantSet {
        let seed = normalize(query);
        let chars: Vec<char> = seed.chars().collect();
        let mut out = Collector::new(seed.clone(), self.limit);

        substitutions(&seed, &mut out);
        tracing::trace!(stage = "substitution", count = out.len());
        deletions(&chars, &mut out);
        tracing::trace!(stage = "deletion", count = out.len());
        insertions(&chars, &mut out);
        tracing::trace!(stage = "insertion", count = out.len());
        transpositions(&chars, &mut out);
        tracing::trace!(stage = "transposition", count = out.len());
        trims(&chars, &mut out);
        tracing::trace!(stage = "trim", count = out.len());
        typos(&seed, &mut out);

        tracing::debug!(query = %seed, variants = out.len(), "expanded query");
        out.finish()
    }
}

/// Expand `query` with the default cap of [`MAX_VARIANTS`].
pub fn expand(query: &str) -> VariantSet {
    TermExpander::default().expand(query)
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Running variant list. Rejects duplicates, candidates below
/// [`MIN_VARIANT_LEN`] and anything past the cap, which is what makes
/// generation order the truncation order.
struct Collector {
    items: Vec<String>,
    limit: usize,
}

impl Collector {
    fn new(seed: String, limit: usize) -> Self {
        let mut items = Vec::with_capacity(limit.min(MAX_VARIANTS));
        items.push(seed);
        Self { items, limit }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }

    fn push(&mut self, candidate: String) {
        if self.is_full()
            || candidate.chars().count() < MIN_VARIANT_LEN
            || self.items.contains(&candidate)
        {
            return;
        }
        self.items.push(candidate);
    }

    fn finish(self) -> VariantSet {
        VariantSet { items: self.items }
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

fn substitutions(seed: &str, out: &mut Collector) {
    for letter in SUBSTITUTION_ORDER {
        if !seed.contains(letter) {
            continue;
        }
        let Some(replacements) = SUBSTITUTIONS.get(&letter) else {
            continue;
        };
        for replacement in replacements.iter() {
            if out.is_full() {
                return;
            }
            out.push(seed.replace(letter, replacement.encode_utf8(&mut [0; 4])));
        }
    }
}

fn deletions(chars: &[char], out: &mut Collector) {
    if chars.len() < DELETION_MIN_QUERY_LEN {
        return;
    }
    for i in 0..chars.len() {
        if out.is_full() {
            return;
        }
        let variant: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
        out.push(variant);
    }
}

// One inserted letter always stays within the original length + 2.
fn insertions(chars: &[char], out: &mut Collector) {
    if chars.len() <= 3 {
        return;
    }
    for i in 0..=chars.len() {
        for letter in COMMON_LETTERS {
            if out.is_full() {
                return;
            }
            let variant: String = chars[..i]
                .iter()
                .chain(std::iter::once(&letter))
                .chain(&chars[i..])
                .collect();
            out.push(variant);
        }
    }
}

fn transpositions(chars: &[char], out: &mut Collector) {
    if chars.len() <= 3 {
        return;
    }
    for i in 0..chars.len() - 1 {
        if out.is_full() {
            return;
        }
        let mut swapped = chars.to_vec();
        swapped.swap(i, i + 1);
        out.push(swapped.into_iter().collect());
    }
}

fn trims(chars: &[char], out: &mut Collector) {
    if chars.len() <= 3 {
        return;
    }
    let len = chars.len();
    let candidates = [&chars[..len - 1], &chars[..len - 2], &chars[1..], &chars[2..]];
    for candidate in candidates {
        out.push(candidate.iter().collect());
    }
}

fn typos(seed: &str, out: &mut Collector) {
    for word in TYPO_ORDER {
        if !seed.contains(word) {
            continue;
        }
        let Some(misspellings) = TYPOS.get(word) else {
            continue;
        };
        for typo in misspellings.iter() {
            if out.is_full() {
                return;
            }
            out.push(seed.replace(word, typo));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
