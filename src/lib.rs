//! fuzzmatch — typo-tolerant search predicates for admin list screens.
//!
//! The engine lives in `fuzzmatch-core` (term expansion, predicate
//! composition) and `fuzzmatch-store` (adapters that execute predicates).
//! This crate adds the command-line front end on top of both.
//!
//! # Architecture
//!
//! ```text
//! query ──► Composer ──► TermExpander
//!              │
//!              └──► Predicate ──► MemoryStore / SqlSchema
//! ```

pub mod commands;
