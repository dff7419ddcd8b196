//! Common test helpers and utilities shared across test suite.

use std::sync::Arc;

use isbnr::{Isbn, RangeEntry, RangeRule, RangeTable, RegistrationGroup};

/// Parses an ISBN that the test expects to be valid.
#[allow(dead_code)]
pub fn isbn(input: &str) -> Isbn {
    Isbn::parse(input).unwrap_or_else(|e| panic!("{input:?} should parse: {e}"))
}

/// Builds a range table entry from `(length, start, end)` triples.
#[allow(dead_code)]
pub fn entry(prefix: &str, identifier: &str, name: &str, rules: &[(usize, &str, &str)]) -> RangeEntry {
    RangeEntry::new(
        RegistrationGroup::new(prefix, identifier, name),
        rules
            .iter()
            .map(|&(length, start, end)| RangeRule::new(length, start, end))
            .collect(),
    )
}

/// A two-group table: English language (978-0) and France (979-10).
#[allow(dead_code)]
pub fn small_table() -> Arc<RangeTable> {
    let table = RangeTable::from_entries(vec![
        entry(
            "978",
            "0",
            "English language",
            &[(2, "00", "19"), (3, "200", "699"), (4, "7000", "8499")],
        ),
        entry("979", "10", "France", &[(2, "00", "19"), (3, "200", "699")]),
    ])
    .expect("small table is valid");
    Arc::new(table)
}
