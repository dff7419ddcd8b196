//! The ISBN International registration group range table.
//!
//! A [`RangeTable`] is an ordered list of registration groups, each with an
//! ordered list of publisher range rules. Record order and rule order are kept
//! exactly as supplied: lookups scan in table order and the first match wins,
//! so the table is never re-sorted.
//!
//! The table is loaded from a JSON asset, either the one bundled with the
//! crate ([`RangeTable::bundled`]) or a newer file supplied by the caller.
//! The official `RangeMessage.xml` can be read directly with
//! [`RangeTable::from_range_message`].
//!
//! # Asset format
//!
//! ```json
//! {
//!   "date": "optional message date of the source RangeMessage",
//!   "groups": [
//!     {
//!       "prefix": "978",
//!       "identifier": "0",
//!       "name": "English language",
//!       "rules": [{ "length": 2, "start": "00", "end": "19" }]
//!     }
//!   ]
//! }
//! ```
//!
//! A bare array of group records is accepted as well. Rules with a length of
//! zero mark unassigned ranges and are dropped on load.

use std::fmt;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{IsbnError, Result};

/// The range table shipped with the crate.
const BUNDLED_RANGES: &str = include_str!("../data/ranges.json");

/// Longest registration group identifier or publisher range length.
const MAX_SEGMENT_LENGTH: usize = 7;

/// Digits following the EAN prefix in an ISBN-13, check digit excluded.
const BODY_DIGITS: usize = 9;

lazy_static! {
    static ref BUNDLED: Arc<RangeTable> = Arc::new(
        RangeTable::from_json_str(BUNDLED_RANGES).expect("bundled range table is valid")
    );
}

/// A country, geographic region, or language area, such as `978-1`.
///
/// Two groups are the same group when their prefix and identifier match;
/// the name does not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationGroup {
    /// The EAN prefix, either `978` or `979`.
    pub prefix: String,
    /// The group identifier following the prefix, such as `1` or `99955`.
    pub identifier: String,
    /// The agency name, such as `English language`.
    pub name: String,
}

impl RegistrationGroup {
    /// Create a new registration group.
    #[must_use]
    pub fn new(
        prefix: impl Into<String>,
        identifier: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        RegistrationGroup {
            prefix: prefix.into(),
            identifier: identifier.into(),
            name: name.into(),
        }
    }

    /// All registration groups in the bundled range table, in table order.
    #[must_use]
    pub fn all() -> Vec<RegistrationGroup> {
        RangeTable::bundled().isbn13_groups().cloned().collect()
    }
}

impl PartialEq for RegistrationGroup {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.identifier == other.identifier
    }
}

impl Eq for RegistrationGroup {}

impl Hash for RegistrationGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.prefix.hash(state);
        self.identifier.hash(state);
    }
}

impl fmt::Display for RegistrationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.identifier)
    }
}

/// A publisher range within a registration group.
///
/// Any ISBN whose next `length` digits after the group identifier fall within
/// `start..=end` has a publisher identifier of `length` digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRule {
    /// Number of digits in the publisher identifier.
    pub length: usize,
    /// First publisher identifier in the range, `length` digits.
    pub start: String,
    /// Last publisher identifier in the range, `length` digits.
    pub end: String,
}

impl RangeRule {
    /// Create a new range rule.
    #[must_use]
    pub fn new(length: usize, start: impl Into<String>, end: impl Into<String>) -> Self {
        RangeRule {
            length,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns whether a `length`-digit value falls within this range.
    ///
    /// All three strings have the same width, so string order is numeric order.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        value.len() == self.length && self.start.as_str() <= value && value <= self.end.as_str()
    }

    /// Number of publisher identifiers covered by this rule.
    #[must_use]
    pub fn span(&self) -> u64 {
        let start: u64 = self.start.parse().unwrap_or(0);
        let end: u64 = self.end.parse().unwrap_or(0);
        end.saturating_sub(start) + 1
    }
}

/// One record of the range table: a registration group and its rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEntry {
    /// The registration group.
    #[serde(flatten)]
    pub group: RegistrationGroup,
    /// Publisher range rules, in source order.
    #[serde(default)]
    pub rules: Vec<RangeRule>,
}

impl RangeEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(group: RegistrationGroup, rules: Vec<RangeRule>) -> Self {
        RangeEntry { group, rules }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RangeAsset {
    Envelope {
        #[serde(default)]
        date: Option<String>,
        groups: Vec<RangeEntry>,
    },
    List(Vec<RangeEntry>),
}

/// Summary figures for a range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeStats {
    /// Number of registration groups.
    pub group_count: usize,
    /// Number of publisher range rules across all groups.
    pub rule_count: usize,
    /// Number of ISBN-13 values that fall within a defined range.
    pub valid_isbn_count: u64,
}

/// The ordered, read-only registration group range table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeTable {
    date: Option<String>,
    entries: Vec<RangeEntry>,
}

impl RangeTable {
    /// Build a table from entries, preserving their order.
    ///
    /// Rules with a length of zero are dropped. Range bounds longer than the
    /// rule length are truncated to it, which is how the published range
    /// message expresses them.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::InvalidRangeTable`] if a prefix is not three digits,
    /// an identifier is not one to seven digits, or a rule has a length above
    /// seven or bounds that are not digit strings of at least that length.
    pub fn from_entries(entries: Vec<RangeEntry>) -> Result<Self> {
        let entries = entries
            .into_iter()
            .map(sanitize_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(RangeTable {
            date: None,
            entries,
        })
    }

    /// Parse a table from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::Json`] if the document is not a range table, or
    /// [`IsbnError::InvalidRangeTable`] if a record is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let asset: RangeAsset = serde_json::from_str(json)?;
        Self::from_asset(asset, "string")
    }

    /// Parse a table from a JSON reader.
    ///
    /// # Errors
    ///
    /// Same as [`RangeTable::from_json_str`], plus IO errors from the reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let asset: RangeAsset = serde_json::from_reader(reader)?;
        Self::from_asset(asset, "reader")
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::Io`] if the file cannot be opened, otherwise the
    /// same errors as [`RangeTable::from_json_str`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let asset: RangeAsset = serde_json::from_reader(BufReader::new(file))?;
        Self::from_asset(asset, &path.display().to_string())
    }

    /// The range table bundled with the crate.
    ///
    /// Parsed once on first use and shared for the rest of the process.
    #[must_use]
    pub fn bundled() -> Arc<RangeTable> {
        Arc::clone(&BUNDLED)
    }

    fn from_asset(asset: RangeAsset, source: &str) -> Result<Self> {
        let (date, entries) = match asset {
            RangeAsset::Envelope { date, groups } => (date, groups),
            RangeAsset::List(groups) => (None, groups),
        };

        let table = Self::from_entries(entries)?.with_date(date);

        log::debug!(
            "loaded ISBN range table from {source}: {} groups, {} rules",
            table.entries.len(),
            table.rule_count()
        );

        Ok(table)
    }

    pub(crate) fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub(crate) fn rule_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.rules.len()).sum()
    }

    /// The message date of the source range file, if the asset carried one.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// All entries in table order.
    #[must_use]
    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    /// Number of registration groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registration groups usable with ISBN-10, i.e. those under `978`.
    pub fn isbn10_groups(&self) -> impl Iterator<Item = &RegistrationGroup> {
        self.isbn13_groups().filter(|group| group.prefix == "978")
    }

    /// All registration groups, in table order.
    pub fn isbn13_groups(&self) -> impl Iterator<Item = &RegistrationGroup> {
        self.entries.iter().map(|entry| &entry.group)
    }

    /// Find a group by prefix and identifier.
    #[must_use]
    pub fn group(&self, prefix: &str, identifier: &str) -> Option<&RegistrationGroup> {
        self.isbn13_groups()
            .find(|group| group.prefix == prefix && group.identifier == identifier)
    }

    /// Count groups, rules, and the ISBN-13 values covered by the rules.
    #[must_use]
    pub fn stats(&self) -> RangeStats {
        let valid_isbn_count = self
            .entries
            .iter()
            .flat_map(|entry| {
                let group_length = entry.group.identifier.len();
                entry.rules.iter().map(move |rule| {
                    BODY_DIGITS
                        .checked_sub(group_length + rule.length)
                        .and_then(|title_digits| u32::try_from(title_digits).ok())
                        .map_or(0, |title_digits| rule.span() * 10u64.pow(title_digits))
                })
            })
            .sum();

        RangeStats {
            group_count: self.entries.len(),
            rule_count: self.rule_count(),
            valid_isbn_count,
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn sanitize_entry(mut entry: RangeEntry) -> Result<RangeEntry> {
    let group = &entry.group;

    if group.prefix.len() != 3 || !is_digits(&group.prefix) {
        return Err(IsbnError::InvalidRangeTable(format!(
            "group {group}: prefix must be 3 digits"
        )));
    }

    if group.identifier.len() > MAX_SEGMENT_LENGTH || !is_digits(&group.identifier) {
        return Err(IsbnError::InvalidRangeTable(format!(
            "group {group}: identifier must be 1 to {MAX_SEGMENT_LENGTH} digits"
        )));
    }

    let label = group.to_string();
    let rules = std::mem::take(&mut entry.rules);
    entry.rules = rules
        .into_iter()
        .filter(|rule| rule.length != 0)
        .map(|rule| sanitize_rule(&label, rule))
        .collect::<Result<Vec<_>>>()?;

    Ok(entry)
}

fn sanitize_rule(group: &str, mut rule: RangeRule) -> Result<RangeRule> {
    let length = rule.length;

    if length > MAX_SEGMENT_LENGTH {
        return Err(IsbnError::InvalidRangeTable(format!(
            "group {group}: rule length {length} exceeds {MAX_SEGMENT_LENGTH}"
        )));
    }

    for bound in [&mut rule.start, &mut rule.end] {
        if bound.len() < length || !is_digits(bound) {
            return Err(IsbnError::InvalidRangeTable(format!(
                "group {group}: range bound {bound:?} is not a {length}-digit number"
            )));
        }
        bound.truncate(length);
    }

    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table_loads() {
        let table = RangeTable::bundled();
        assert!(!table.is_empty());
        assert_eq!(table.entries()[0].group, RegistrationGroup::new("978", "0", ""));
        assert_eq!(table.entries()[0].group.name, "English language");
    }

    #[test]
    fn test_registration_group_display() {
        let group = RegistrationGroup::new("978", "1", "English language");
        assert_eq!(group.to_string(), "978-1");
    }

    #[test]
    fn test_registration_group_identity_ignores_name() {
        let a = RegistrationGroup::new("979", "12", "Italy");
        let b = RegistrationGroup::new("979", "12", "Italia");
        let c = RegistrationGroup::new("978", "12", "Italy");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rule_contains() {
        let rule = RangeRule::new(3, "200", "699");
        assert!(rule.contains("200"));
        assert!(rule.contains("699"));
        assert!(rule.contains("321"));
        assert!(!rule.contains("199"));
        assert!(!rule.contains("700"));
        assert!(!rule.contains("32"));
    }

    #[test]
    fn test_rule_span() {
        assert_eq!(RangeRule::new(2, "00", "19").span(), 20);
        assert_eq!(RangeRule::new(3, "430", "430").span(), 1);
    }

    #[test]
    fn test_from_json_list_form() {
        let table = RangeTable::from_json_str(
            r#"[{"prefix": "978", "identifier": "0", "name": "English language",
                 "rules": [{"length": 2, "start": "00", "end": "19"}]}]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.date(), None);
    }

    #[test]
    fn test_from_json_envelope_form() {
        let table = RangeTable::from_json_str(
            r#"{"date": "Sun, 1 Jan 2023 00:00:00 GMT",
                "groups": [{"prefix": "979", "identifier": "10", "name": "France", "rules": []}]}"#,
        )
        .unwrap();
        assert_eq!(table.date(), Some("Sun, 1 Jan 2023 00:00:00 GMT"));
        assert_eq!(table.entries()[0].group.to_string(), "979-10");
    }

    #[test]
    fn test_zero_length_rules_dropped_and_bounds_truncated() {
        let table = RangeTable::from_json_str(
            r#"[{"prefix": "978", "identifier": "9983", "name": "Gambia",
                 "rules": [{"length": 0, "start": "0000000", "end": "7999999"},
                           {"length": 2, "start": "8000000", "end": "9499999"}]}]"#,
        )
        .unwrap();
        assert_eq!(table.entries()[0].rules, vec![RangeRule::new(2, "80", "94")]);
    }

    #[test]
    fn test_invalid_records_rejected() {
        let bad_prefix = r#"[{"prefix": "97", "identifier": "0", "name": "x", "rules": []}]"#;
        let bad_identifier = r#"[{"prefix": "978", "identifier": "", "name": "x", "rules": []}]"#;
        let bad_length = r#"[{"prefix": "978", "identifier": "0", "name": "x",
                              "rules": [{"length": 8, "start": "00000000", "end": "99999999"}]}]"#;
        let bad_bound = r#"[{"prefix": "978", "identifier": "0", "name": "x",
                             "rules": [{"length": 3, "start": "20", "end": "699"}]}]"#;

        for json in [bad_prefix, bad_identifier, bad_length, bad_bound] {
            assert!(matches!(
                RangeTable::from_json_str(json),
                Err(IsbnError::InvalidRangeTable(_))
            ));
        }
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            RangeTable::from_json_str("not json"),
            Err(IsbnError::Json(_))
        ));
    }

    #[test]
    fn test_group_views() {
        let table = RangeTable::bundled();
        assert!(table.isbn10_groups().all(|g| g.prefix == "978"));
        assert!(table.isbn13_groups().any(|g| g.prefix == "979"));
        assert_eq!(table.isbn13_groups().count(), table.len());
        assert_eq!(
            table.group("979", "12").map(|g| g.name.as_str()),
            Some("Italy")
        );
        assert!(table.group("978", "99999").is_none());
    }

    #[test]
    fn test_stats() {
        let table = RangeTable::from_json_str(
            r#"[{"prefix": "978", "identifier": "0", "name": "English language",
                 "rules": [{"length": 2, "start": "00", "end": "19"},
                           {"length": 7, "start": "9500000", "end": "9999999"}]}]"#,
        )
        .unwrap();
        let stats = table.stats();
        assert_eq!(stats.group_count, 1);
        assert_eq!(stats.rule_count, 2);
        // 20 publishers * 10^6 titles + 500000 publishers * 10^1 titles
        assert_eq!(stats.valid_isbn_count, 20_000_000 + 5_000_000);
    }
}
