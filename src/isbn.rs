//! The validated ISBN value type.
//!
//! An [`Isbn`] is built only through validating constructors and is immutable
//! afterwards. It is either an ISBN-10 or an ISBN-13 ([`IsbnKind`]); the two
//! forms of the same book compare equal.
//!
//! Each value is looked up in its [`RangeTable`] on the first group or range
//! query, and the result is kept for later queries. [`Isbn::parse`] uses the
//! bundled table; [`Isbn::parse_with`] takes any table.
//!
//! # Examples
//!
//! ```
//! use isbnr::Isbn;
//!
//! let isbn = Isbn::parse("0-00-123456-0")?;
//! assert!(isbn.is_10());
//! assert_eq!(isbn.to_formatted_string(), "0-00-123456-0");
//! assert_eq!(isbn.group_name()?, "English language");
//! assert_eq!(isbn.to_13().to_string(), "9780001234567");
//! # Ok::<(), isbnr::IsbnError>(())
//! ```

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::converter;
use crate::error::{IsbnError, Result};
use crate::normalize;
use crate::range_lookup::{Parts, RangeInfo};
use crate::range_table::{RangeTable, RegistrationGroup};

/// Which of the two ISBN forms a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IsbnKind {
    /// A 10-character ISBN, check digit `0`-`9` or `X`.
    Isbn10,
    /// A 13-digit ISBN in the `978` or `979` namespace.
    Isbn13,
}

impl IsbnKind {
    /// Number of characters in an unformatted ISBN of this kind.
    #[must_use]
    pub const fn digit_count(self) -> usize {
        match self {
            Self::Isbn10 => 10,
            Self::Isbn13 => 13,
        }
    }

    // Index of the publisher part; the title part follows it.
    const fn publisher_part(self) -> usize {
        match self {
            Self::Isbn10 => 1,
            Self::Isbn13 => 2,
        }
    }
}

impl fmt::Display for IsbnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isbn10 => write!(f, "ISBN-10"),
            Self::Isbn13 => write!(f, "ISBN-13"),
        }
    }
}

/// A valid ISBN-10 or ISBN-13.
#[derive(Clone)]
pub struct Isbn {
    digits: String,
    kind: IsbnKind,
    range: OnceLock<Option<RangeInfo>>,
    table: Arc<RangeTable>,
}

impl Isbn {
    /// Parse and validate an ISBN against the bundled range table.
    ///
    /// Any character that is not an ASCII letter or digit is ignored, so
    /// hyphens and spaces are allowed anywhere. A lower-case `x` check digit
    /// is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::InvalidIsbn`] if the input contains non-ASCII
    /// characters, is not 10 or 13 characters long once cleaned, or has a
    /// wrong check digit.
    pub fn parse(input: &str) -> Result<Isbn> {
        Self::parse_with(input, &RangeTable::bundled())
    }

    /// Parse and validate an ISBN against the given range table.
    ///
    /// # Errors
    ///
    /// Same as [`Isbn::parse`].
    pub fn parse_with(input: &str, table: &Arc<RangeTable>) -> Result<Isbn> {
        let (digits, kind) = normalize::normalize(input)?;
        Ok(Self::from_validated(digits, kind, Arc::clone(table)))
    }

    /// Parse an ISBN and return it as an ISBN-10.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::InvalidIsbn`] for invalid input, and
    /// [`IsbnError::NotConvertible`] for an ISBN-13 not starting with `978`.
    pub fn parse_10(input: &str) -> Result<Isbn> {
        Self::parse(input)?.to_10()
    }

    /// Parse an ISBN and return it as an ISBN-13.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::InvalidIsbn`] for invalid input.
    pub fn parse_13(input: &str) -> Result<Isbn> {
        Ok(Self::parse(input)?.to_13())
    }

    fn from_validated(digits: String, kind: IsbnKind, table: Arc<RangeTable>) -> Isbn {
        Isbn {
            digits,
            kind,
            range: OnceLock::new(),
            table,
        }
    }

    /// The form of this ISBN.
    #[must_use]
    pub const fn kind(&self) -> IsbnKind {
        self.kind
    }

    /// Returns whether this is an ISBN-10.
    #[must_use]
    pub fn is_10(&self) -> bool {
        self.kind == IsbnKind::Isbn10
    }

    /// Returns whether this is an ISBN-13.
    #[must_use]
    pub fn is_13(&self) -> bool {
        self.kind == IsbnKind::Isbn13
    }

    /// The unformatted ISBN.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The range table this ISBN is looked up in.
    #[must_use]
    pub fn table(&self) -> &Arc<RangeTable> {
        &self.table
    }

    /// Returns whether this ISBN has an ISBN-10 form.
    ///
    /// Always true for an ISBN-10; true for an ISBN-13 starting with `978`.
    #[must_use]
    pub fn is_convertible_to_10(&self) -> bool {
        match self.kind {
            IsbnKind::Isbn10 => true,
            IsbnKind::Isbn13 => converter::is_convertible_to_10(&self.digits),
        }
    }

    /// This ISBN as an ISBN-10.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::NotConvertible`] for an ISBN-13 not starting with `978`.
    pub fn to_10(&self) -> Result<Isbn> {
        match self.kind {
            IsbnKind::Isbn10 => Ok(self.clone()),
            IsbnKind::Isbn13 => {
                let digits = converter::isbn13_to_10(&self.digits)?;
                Ok(Self::from_validated(
                    digits,
                    IsbnKind::Isbn10,
                    Arc::clone(&self.table),
                ))
            }
        }
    }

    /// This ISBN as an ISBN-13.
    #[must_use]
    pub fn to_13(&self) -> Isbn {
        match self.kind {
            IsbnKind::Isbn13 => self.clone(),
            IsbnKind::Isbn10 => Self::from_validated(
                converter::widen_isbn10(&self.digits),
                IsbnKind::Isbn13,
                Arc::clone(&self.table),
            ),
        }
    }

    /// The raw lookup result, if the ISBN is in a known registration group.
    #[must_use]
    pub fn range_info(&self) -> Option<&RangeInfo> {
        self.range
            .get_or_init(|| self.table.lookup(&self.digits))
            .as_ref()
    }

    /// Returns whether this ISBN is in a known registration group.
    ///
    /// When true, the group accessors do not fail.
    #[must_use]
    pub fn has_valid_registration_group(&self) -> bool {
        self.range_info().is_some()
    }

    /// Returns whether this ISBN is in a known registration group and publisher range.
    ///
    /// When true, every accessor succeeds and the ISBN can be hyphenated.
    /// This says nothing about whether the number has been assigned to a book.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.range_info(), Some(RangeInfo { parts: Some(_), .. }))
    }

    fn known_group(&self) -> Result<&RangeInfo> {
        self.range_info()
            .ok_or_else(|| IsbnError::UnknownGroup(self.digits.clone()))
    }

    fn known_parts(&self) -> Result<&Parts> {
        self.known_group()?
            .parts
            .as_ref()
            .ok_or_else(|| IsbnError::UnknownRange(self.digits.clone()))
    }

    /// The registration group.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::UnknownGroup`] if no group matches.
    pub fn registration_group(&self) -> Result<&RegistrationGroup> {
        Ok(&self.known_group()?.group)
    }

    /// The group identifier: `"2"` for an ISBN-10, `"978-2"` for an ISBN-13.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::UnknownGroup`] if no group matches.
    pub fn group_identifier(&self) -> Result<String> {
        let group = self.registration_group()?;
        Ok(match self.kind {
            IsbnKind::Isbn10 => group.identifier.clone(),
            IsbnKind::Isbn13 => group.to_string(),
        })
    }

    /// The group name, such as `"French language"`.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::UnknownGroup`] if no group matches.
    pub fn group_name(&self) -> Result<&str> {
        Ok(&self.registration_group()?.name)
    }

    /// The publisher identifier within the group.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::UnknownGroup`] if no group matches, or
    /// [`IsbnError::UnknownRange`] if no publisher range matches.
    pub fn publisher_identifier(&self) -> Result<&str> {
        Ok(&self.known_parts()?[self.kind.publisher_part()])
    }

    /// The title identifier within the publisher.
    ///
    /// # Errors
    ///
    /// Same as [`Isbn::publisher_identifier`].
    pub fn title_identifier(&self) -> Result<&str> {
        Ok(&self.known_parts()?[self.kind.publisher_part() + 1])
    }

    /// All parts: 4 for an ISBN-10, 5 for an ISBN-13.
    ///
    /// # Errors
    ///
    /// Same as [`Isbn::publisher_identifier`].
    pub fn parts(&self) -> Result<&[String]> {
        Ok(self.known_parts()?.as_slice())
    }

    /// The check digit, `'0'`-`'9'` or `'X'`.
    #[must_use]
    pub fn check_digit(&self) -> char {
        self.digits.chars().last().unwrap_or('0')
    }

    /// The hyphenated ISBN, or the unformatted ISBN if it is not in a known range.
    #[must_use]
    pub fn to_formatted_string(&self) -> String {
        match self.known_parts() {
            Ok(parts) => parts.join("-"),
            Err(_) => self.digits.clone(),
        }
    }

    fn canonical_13(&self) -> Cow<'_, str> {
        match self.kind {
            IsbnKind::Isbn13 => Cow::Borrowed(&self.digits),
            IsbnKind::Isbn10 => Cow::Owned(converter::widen_isbn10(&self.digits)),
        }
    }

    /// Returns whether both values denote the same ISBN-13.
    ///
    /// An ISBN-10 is equal to its ISBN-13 form.
    #[must_use]
    pub fn is_equal_to(&self, other: &Isbn) -> bool {
        self.canonical_13() == other.canonical_13()
    }
}

impl fmt::Debug for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Isbn")
            .field("digits", &self.digits)
            .field("kind", &self.kind)
            .field("range", &self.range.get())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.digits
    }
}

impl PartialEq for Isbn {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}

impl Eq for Isbn {}

impl Hash for Isbn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_13().hash(state);
    }
}

impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self> {
        Isbn::parse(s)
    }
}

impl TryFrom<&str> for Isbn {
    type Error = IsbnError;

    fn try_from(value: &str) -> Result<Self> {
        Isbn::parse(value)
    }
}

impl Serialize for Isbn {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits)
    }
}

impl<'de> Deserialize<'de> for Isbn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Isbn::parse(&raw).map_err(serde::de::Error::custom)
    }
}
