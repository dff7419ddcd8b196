//! Splitting an ISBN into its parts using the range table.
//!
//! A lookup has three outcomes:
//!
//! - no registration group matches (`None`),
//! - a group matches but none of its publisher ranges do
//!   (`Some(RangeInfo { parts: None, .. })`),
//! - both match, and the ISBN can be hyphenated
//!   (`Some(RangeInfo { parts: Some(_), .. })`).
//!
//! Every group and range query on [`crate::Isbn`] is a projection of this result.

use smallvec::{smallvec, SmallVec};

use crate::converter::CONVERTIBLE_PREFIX;
use crate::normalize::{is_isbn10_format, is_isbn13_format};
use crate::range_table::{RangeEntry, RangeTable, RegistrationGroup};

/// The hyphen-separated parts of an ISBN: 4 for ISBN-10, 5 for ISBN-13.
pub type Parts = SmallVec<[String; 5]>;

/// The result of looking up an ISBN in the range table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeInfo {
    /// The registration group the ISBN belongs to.
    pub group: RegistrationGroup,
    /// The ISBN parts, or `None` if no publisher range within the group matched.
    pub parts: Option<Parts>,
}

impl RangeTable {
    /// Look up an unformatted ISBN-10 or ISBN-13.
    ///
    /// Input that is not a bare, uppercase ISBN-10 or ISBN-13 digit string has
    /// no group and returns `None`. Groups are scanned in table order and the first one whose prefix and
    /// identifier match is used, even if a later group would also match.
    /// Within that group, the first rule whose range contains the next
    /// `length` digits wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use isbnr::RangeTable;
    ///
    /// let table = RangeTable::bundled();
    /// let info = table.lookup("0001234560").unwrap();
    /// assert_eq!(info.group.name, "English language");
    /// assert_eq!(info.parts.unwrap().join("-"), "0-00-123456-0");
    /// ```
    #[must_use]
    pub fn lookup(&self, isbn: &str) -> Option<RangeInfo> {
        let is13 = is_isbn13_format(isbn);
        if !is13 && !is_isbn10_format(isbn) {
            log::trace!("not an unformatted ISBN: {isbn:?}");
            return None;
        }

        let (prefix, digits) = if is13 {
            isbn.split_at(3)
        } else {
            (CONVERTIBLE_PREFIX, isbn)
        };

        let Some(entry) = self
            .entries()
            .iter()
            .find(|entry| entry.group.prefix == prefix && digits.starts_with(&entry.group.identifier))
        else {
            log::trace!("no registration group for ISBN {isbn}");
            return None;
        };

        let parts = split_parts(entry, prefix, digits, is13);
        if parts.is_none() {
            log::trace!("ISBN {isbn} is in group {} but in no known range", entry.group);
        }

        Some(RangeInfo {
            group: entry.group.clone(),
            parts,
        })
    }

    /// Hyphenate an unformatted ISBN.
    ///
    /// Returns the input unchanged if it is not in a known group and range,
    /// or is not an unformatted ISBN at all.
    #[must_use]
    pub fn format(&self, isbn: &str) -> String {
        match self.lookup(isbn) {
            Some(RangeInfo {
                parts: Some(parts), ..
            }) => parts.join("-"),
            _ => isbn.to_string(),
        }
    }
}

fn split_parts(entry: &RangeEntry, prefix: &str, digits: &str, is13: bool) -> Option<Parts> {
    let identifier = entry.group.identifier.as_str();
    let group_end = identifier.len();
    let check_start = digits.len() - 1;

    let (rule_end, range_value) = entry.rules.iter().find_map(|rule| {
        let rule_end = group_end + rule.length;
        if rule_end > check_start {
            return None;
        }
        let value = &digits[group_end..rule_end];
        rule.contains(value).then_some((rule_end, value))
    })?;

    let title = &digits[rule_end..check_start];
    let check = &digits[check_start..];

    let parts: Parts = if is13 {
        smallvec![
            prefix.to_string(),
            identifier.to_string(),
            range_value.to_string(),
            title.to_string(),
            check.to_string(),
        ]
    } else {
        smallvec![
            identifier.to_string(),
            range_value.to_string(),
            title.to_string(),
            check.to_string(),
        ]
    };

    Some(parts)
}
