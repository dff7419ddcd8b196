//! Reading the ISBN International `RangeMessage.xml` directly.
//!
//! The message lists each registration group as a `Group` element with a
//! hyphenated `Prefix` such as `978-0`, an `Agency` name, and `Rule` elements
//! whose `Range` holds two seven-digit bounds joined by a hyphen. Rules are
//! passed through the same checks as the JSON asset, so zero-length rules are
//! dropped and bounds are truncated to the rule length.
//!
//! # Example
//!
//! ```
//! use isbnr::RangeTable;
//!
//! let xml = r#"<ISBNRangeMessage>
//!   <MessageDate>Sun, 18 Oct 2026 10:00:00 GMT</MessageDate>
//!   <RegistrationGroups>
//!     <Group>
//!       <Prefix>978-0</Prefix>
//!       <Agency>English language</Agency>
//!       <Rules>
//!         <Rule><Range>0000000-1999999</Range><Length>2</Length></Rule>
//!       </Rules>
//!     </Group>
//!   </RegistrationGroups>
//! </ISBNRangeMessage>"#;
//!
//! let table = RangeTable::from_range_message(xml).unwrap();
//! assert_eq!(table.format("0001234560"), "0-00-123456-0");
//! ```

use std::fs;
use std::path::Path;

use quick_xml::de::from_str as xml_from_str;
use serde::Deserialize;

use crate::error::{IsbnError, Result};
use crate::range_table::{RangeEntry, RangeRule, RangeTable, RegistrationGroup};

#[derive(Debug, Deserialize)]
#[serde(rename = "ISBNRangeMessage")]
struct RangeMessage {
    #[serde(default, rename = "MessageDate")]
    date: Option<String>,
    #[serde(default, rename = "RegistrationGroups")]
    registration_groups: RegistrationGroups,
}

#[derive(Debug, Default, Deserialize)]
struct RegistrationGroups {
    #[serde(default, rename = "Group")]
    groups: Vec<Group>,
}

#[derive(Debug, Deserialize)]
struct Group {
    #[serde(rename = "Prefix")]
    prefix: String,
    #[serde(rename = "Agency")]
    agency: String,
    #[serde(default, rename = "Rules")]
    rules: Rules,
}

#[derive(Debug, Default, Deserialize)]
struct Rules {
    #[serde(default, rename = "Rule")]
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
struct Rule {
    #[serde(rename = "Range")]
    range: String,
    #[serde(rename = "Length")]
    length: usize,
}

impl RangeTable {
    /// Build a table from the text of a `RangeMessage.xml` document.
    ///
    /// Group order and rule order follow the document. The `MessageDate`
    /// becomes the table date.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::Xml`] if the document cannot be read as a range
    /// message, or [`IsbnError::InvalidRangeTable`] if a prefix or range is
    /// not two hyphen-joined parts or a record fails the table checks.
    pub fn from_range_message(xml: &str) -> Result<Self> {
        let message: RangeMessage = xml_from_str(xml)
            .map_err(|e| IsbnError::Xml(format!("Failed to parse RangeMessage: {e}")))?;

        let entries = message
            .registration_groups
            .groups
            .into_iter()
            .map(group_to_entry)
            .collect::<Result<Vec<_>>>()?;

        let table = Self::from_entries(entries)?.with_date(message.date);

        log::debug!(
            "loaded ISBN range message dated {}: {} groups, {} rules",
            table.date().unwrap_or("unknown"),
            table.len(),
            table.rule_count()
        );

        Ok(table)
    }

    /// Load a table from a `RangeMessage.xml` file.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`RangeTable::from_range_message`].
    pub fn from_range_message_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::from_range_message(&xml)
    }
}

fn group_to_entry(group: Group) -> Result<RangeEntry> {
    let (prefix, identifier) = split_pair(&group.prefix, "prefix")?;

    let rules = group
        .rules
        .rules
        .iter()
        .map(|rule| {
            let (start, end) = split_pair(&rule.range, "range")?;
            Ok(RangeRule::new(rule.length, start, end))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RangeEntry::new(
        RegistrationGroup::new(prefix, identifier, group.agency),
        rules,
    ))
}

fn split_pair<'a>(value: &'a str, what: &str) -> Result<(&'a str, &'a str)> {
    value
        .trim()
        .split_once('-')
        .ok_or_else(|| IsbnError::InvalidRangeTable(format!("{what} {value:?} has no hyphen")))
}
