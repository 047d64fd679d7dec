//! fuzzmatch-core — typo-tolerant search predicates.
//!
//! Two pieces, evaluated in sequence for every search request:
//!
//! ```text
//! raw query ──► Composer ──► TermExpander ──► Composer ──► Predicate ──► record store
//! ```
//!
//! Both are pure and synchronous: no I/O, no shared mutable state. The
//! resulting [`Predicate`] is executed by an adapter (see `fuzzmatch-store`).

pub mod composer;
pub mod config;
pub mod expander;
pub mod predicate;
pub mod tables;

pub use composer::{build_predicate, Composer, Relation, SearchScope, FUZZY_MIN_LEN};
pub use expander::{expand, normalize, Expand, TermExpander, VariantSet, MAX_VARIANTS};
pub use predicate::Predicate;
