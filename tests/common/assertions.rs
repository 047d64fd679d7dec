//! Domain-specific assertion macros for fuzzmatch harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! variant-set invariant that was violated.

/// Assert the structural invariants every variant set must hold.
///
/// ```rust
/// assert_variant_invariants!("admin", expand("admin"));
/// ```
#[macro_export]
macro_rules! assert_variant_invariants {
    ($query:expr, $variants:expr) => {{
        let query: &str = $query;
        let variants: &[String] = &$variants;
        let normalized = fuzzmatch_core::normalize(query);

        assert_eq!(
            variants.first().map(String::as_str),
            Some(normalized.as_str()),
            "first variant must be the normalized query {:?}",
            normalized
        );
        assert!(
            variants.len() <= fuzzmatch_core::MAX_VARIANTS,
            "variant set for {:?} exceeds the cap: {:?}",
            query,
            variants
        );
        for (i, v) in variants.iter().enumerate() {
            assert!(
                !variants[..i].contains(v),
                "duplicate variant {:?} for {:?}: {:?}",
                v,
                query,
                variants
            );
        }
    }};
}

/// Assert that a store lookup returned exactly these values, in order.
#[macro_export]
macro_rules! assert_hits {
    ($actual:expr, [$($expected:expr),* $(,)?]) => {{
        let actual: Vec<String> = $actual;
        let expected: Vec<String> = vec![$($expected.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "unexpected search hits");
    }};
}
