//! Normalization and format validation of raw ISBN input.
//!
//! Raw input goes through three steps: a 7-bit ASCII check, removal of every
//! character that is not an ASCII letter or digit, and a format match. The
//! ISBN-13 format is tried first, on the cleaned string as-is; only then is
//! the string upper-cased and tried as an ISBN-10, so that a trailing `x`
//! becomes the `X` check digit.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use crate::check_digit;
use crate::error::{IsbnError, Result};
use crate::isbn::IsbnKind;

lazy_static! {
    /// An uppercase, unformatted ISBN-10.
    static ref ISBN10_PATTERN: Regex = Regex::new(r"^[0-9]{9}[0-9X]$").unwrap();

    /// An unformatted ISBN-13 in the `978` or `979` namespace.
    static ref ISBN13_PATTERN: Regex = Regex::new(r"^97[89][0-9]{10}$").unwrap();

    /// Any character that is not an ASCII letter or digit.
    static ref NON_ALNUM_PATTERN: Regex = Regex::new(r"[^0-9a-zA-Z]").unwrap();
}

/// Returns whether the input is a non-empty 7-bit ASCII string.
///
/// Empty input fails the check, so [`normalize`] rejects it before cleanup.
#[must_use]
pub fn is_nonempty_ascii(input: &str) -> bool {
    !input.is_empty() && input.is_ascii()
}

/// Remove every character that is not an ASCII letter or digit.
///
/// Letters are kept wherever they appear, so a stray letter in the middle of
/// the number makes the later format check fail instead of being dropped.
///
/// # Examples
///
/// ```
/// use isbnr::normalize::cleanup;
///
/// assert_eq!(cleanup(" 1-234-56789-x "), "123456789x");
/// assert_eq!(cleanup("978 0 306 40615 7"), "9780306406157");
/// ```
#[must_use]
pub fn cleanup(input: &str) -> Cow<'_, str> {
    NON_ALNUM_PATTERN.replace_all(input, "")
}

/// Returns whether the string is an unformatted, uppercase ISBN-10 (no checksum test).
#[must_use]
pub fn is_isbn10_format(isbn: &str) -> bool {
    ISBN10_PATTERN.is_match(isbn)
}

/// Returns whether the string is an unformatted ISBN-13 (no checksum test).
#[must_use]
pub fn is_isbn13_format(isbn: &str) -> bool {
    ISBN13_PATTERN.is_match(isbn)
}

/// Normalize and validate raw input into an unformatted ISBN digit string.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidIsbn`] if the input contains non-ASCII bytes,
/// matches neither format, or has a wrong check digit. The error carries the
/// cleaned string once cleanup has happened, and the raw input before that.
///
/// # Examples
///
/// ```
/// use isbnr::normalize::normalize;
/// use isbnr::IsbnKind;
///
/// let (digits, kind) = normalize(" 1-234-56789-x ").unwrap();
/// assert_eq!(digits, "123456789X");
/// assert_eq!(kind, IsbnKind::Isbn10);
/// ```
pub fn normalize(input: &str) -> Result<(String, IsbnKind)> {
    if !is_nonempty_ascii(input) {
        return Err(IsbnError::InvalidIsbn(input.to_string()));
    }

    let cleaned = cleanup(input);

    if is_isbn13_format(&cleaned) {
        if !check_digit::validate_isbn13(&cleaned) {
            return Err(IsbnError::InvalidIsbn(cleaned.into_owned()));
        }
        return Ok((cleaned.into_owned(), IsbnKind::Isbn13));
    }

    let upper = cleaned.to_ascii_uppercase();

    if is_isbn10_format(&upper) {
        if !check_digit::validate_isbn10(&upper) {
            return Err(IsbnError::InvalidIsbn(upper));
        }
        return Ok((upper, IsbnKind::Isbn10));
    }

    Err(IsbnError::InvalidIsbn(upper))
}
