//! Static lookup tables used by the term expander.
//!
//! All tables are compile-time constants. The `phf` maps carry no iteration
//! order of their own, so each one is paired with an explicit key order:
//! generation order decides which variants survive truncation.

use phf::phf_map;

// ---------------------------------------------------------------------------
// Character substitution (leetspeak)
// ---------------------------------------------------------------------------

/// Letter → replacement characters, tried in slice order.
pub static SUBSTITUTIONS: phf::Map<char, &'static [char]> = phf_map! {
    'a' => &['@', '4'],
    'e' => &['3'],
    'i' => &['1', '!'],
    'o' => &['0'],
    's' => &['$', '5'],
    't' => &['7'],
    'h' => &['#'],
};

/// Order in which [`SUBSTITUTIONS`] entries are applied.
pub const SUBSTITUTION_ORDER: [char; 7] = ['a', 'e', 'i', 'o', 's', 't', 'h'];

// ---------------------------------------------------------------------------
// Insertion alphabet
// ---------------------------------------------------------------------------

/// Letters tried at every insertion position.
pub const COMMON_LETTERS: [char; 10] = ['a', 'e', 'i', 'o', 'u', 'h', 'n', 'r', 's', 't'];

// ---------------------------------------------------------------------------
// Domain typos
// ---------------------------------------------------------------------------

/// Known word → known misspellings.
pub static TYPOS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "test" => &["tset", "tets", "tst", "tes"],
    "user" => &["usr", "uesr", "usre", "yser"],
    "admin" => &["admn", "amdin", "adimn", "admim"],
    "name" => &["nmae", "naem", "nam", "anme"],
    "email" => &["emial", "emal", "e-mail", "mail"],
};

/// Order in which [`TYPOS`] keys are checked against a query.
pub const TYPO_ORDER: [&str; 5] = ["test", "user", "admin", "name", "email"];
