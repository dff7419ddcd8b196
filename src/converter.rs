//! Conversion between ISBN-10 and ISBN-13 digit strings.
//!
//! Both directions recompute the check digit of the target form; the source
//! check digit is always discarded. Input must be unformatted: anything that
//! is not a bare ISBN-10 or ISBN-13 digit string is rejected.

use crate::check_digit::{compute_isbn10, compute_isbn13};
use crate::error::{IsbnError, Result};
use crate::normalize::{is_isbn10_format, is_isbn13_format};

/// The only EAN prefix whose ISBN-13 values have an ISBN-10 equivalent.
pub const CONVERTIBLE_PREFIX: &str = "978";

/// Convert an ISBN-10 to its `978`-prefixed ISBN-13.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidIsbn`] if the input is not an unformatted,
/// uppercase ISBN-10. The check digit itself is not verified.
///
/// # Examples
///
/// ```
/// use isbnr::converter::isbn10_to_13;
///
/// assert_eq!(isbn10_to_13("0123456789").unwrap(), "9780123456786");
/// assert_eq!(isbn10_to_13("123456789X").unwrap(), "9781234567897");
/// assert!(isbn10_to_13("0-12-345678-9").is_err());
/// ```
pub fn isbn10_to_13(isbn: &str) -> Result<String> {
    if !is_isbn10_format(isbn) {
        return Err(IsbnError::InvalidIsbn(isbn.to_string()));
    }
    Ok(widen_isbn10(isbn))
}

/// ISBN-10 to ISBN-13 for digits that already passed the format check.
pub(crate) fn widen_isbn10(isbn: &str) -> String {
    let mut isbn13 = String::with_capacity(13);
    isbn13.push_str(CONVERTIBLE_PREFIX);
    isbn13.push_str(&isbn[..9]);
    isbn13.push(compute_isbn13(&isbn13));
    isbn13
}

/// Convert a `978`-prefixed ISBN-13 to an ISBN-10.
///
/// # Errors
///
/// Returns [`IsbnError::InvalidIsbn`] if the input is not an unformatted
/// ISBN-13, and [`IsbnError::NotConvertible`] if it does not start with `978`.
///
/// # Examples
///
/// ```
/// use isbnr::converter::isbn13_to_10;
///
/// assert_eq!(isbn13_to_10("9780123456786").unwrap(), "0123456789");
/// assert!(isbn13_to_10("9791234567896").is_err());
/// ```
pub fn isbn13_to_10(isbn: &str) -> Result<String> {
    if !is_isbn13_format(isbn) {
        return Err(IsbnError::InvalidIsbn(isbn.to_string()));
    }
    if !is_convertible_to_10(isbn) {
        return Err(IsbnError::NotConvertible(isbn.to_string()));
    }

    let mut isbn10 = String::with_capacity(10);
    isbn10.push_str(&isbn[3..12]);
    isbn10.push(compute_isbn10(&isbn10));
    Ok(isbn10)
}

/// Returns whether an ISBN-13 digit string has an ISBN-10 equivalent.
#[must_use]
pub fn is_convertible_to_10(isbn: &str) -> bool {
    isbn.starts_with(CONVERTIBLE_PREFIX)
}
