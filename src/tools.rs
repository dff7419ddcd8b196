//! String-level ISBN validation, conversion, and formatting.
//!
//! [`IsbnTools`] works on plain strings rather than [`crate::Isbn`] values and is
//! tuned by [`ValidationOptions`]: whether to strip non-alphanumeric
//! characters first, and whether to verify the check digit.
//!
//! # Examples
//!
//! ```
//! use isbnr::{IsbnTools, ValidationOptions};
//!
//! let tools = IsbnTools::default();
//! assert!(tools.is_valid_isbn(" 1-23456789 x "));
//! assert_eq!(tools.format("9791090123458")?, "979-10-90123-45-8");
//!
//! let lenient = IsbnTools::new(ValidationOptions::new().with_check_digit_validation(false));
//! assert!(lenient.is_valid_isbn10("1234567890"));
//! # Ok::<(), isbnr::IsbnError>(())
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::check_digit;
use crate::converter;
use crate::error::{IsbnError, Result};
use crate::normalize;
use crate::range_table::RangeTable;

/// Options for the string-level validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Remove every character that is not an ASCII letter or digit before
    /// checking the format. Non-ASCII input is rejected outright when enabled.
    pub cleanup_before_validate: bool,

    /// Verify the check digit after the format check.
    pub validate_check_digit: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            cleanup_before_validate: true,
            validate_check_digit: true,
        }
    }
}

impl ValidationOptions {
    /// Creates options with both cleanup and check digit validation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether input is cleaned up before validation.
    #[must_use]
    pub const fn with_cleanup(mut self, enabled: bool) -> Self {
        self.cleanup_before_validate = enabled;
        self
    }

    /// Sets whether the check digit is verified.
    #[must_use]
    pub const fn with_check_digit_validation(mut self, enabled: bool) -> Self {
        self.validate_check_digit = enabled;
        self
    }
}

/// Returns whether the string is a valid ISBN-10 under the given options.
#[must_use]
pub fn is_valid_isbn10(isbn: &str, options: ValidationOptions) -> bool {
    prepare_isbn10(isbn, options).is_ok()
}

/// Returns whether the string is a valid ISBN-13 under the given options.
#[must_use]
pub fn is_valid_isbn13(isbn: &str, options: ValidationOptions) -> bool {
    prepare_isbn13(isbn, options).is_ok()
}

fn clean(isbn: &str, options: ValidationOptions) -> Result<Cow<'_, str>> {
    if !options.cleanup_before_validate {
        return Ok(Cow::Borrowed(isbn));
    }
    if !normalize::is_nonempty_ascii(isbn) {
        return Err(IsbnError::InvalidIsbn(isbn.to_string()));
    }
    Ok(normalize::cleanup(isbn))
}

fn prepare_isbn10(isbn: &str, options: ValidationOptions) -> Result<String> {
    let isbn = clean(isbn, options)?.to_ascii_uppercase();

    if !normalize::is_isbn10_format(&isbn)
        || (options.validate_check_digit && !check_digit::validate_isbn10(&isbn))
    {
        return Err(IsbnError::InvalidIsbn(isbn));
    }

    Ok(isbn)
}

fn prepare_isbn13(isbn: &str, options: ValidationOptions) -> Result<String> {
    let isbn = clean(isbn, options)?;

    if !normalize::is_isbn13_format(&isbn)
        || (options.validate_check_digit && !check_digit::validate_isbn13(&isbn))
    {
        return Err(IsbnError::InvalidIsbn(isbn.into_owned()));
    }

    Ok(isbn.into_owned())
}

/// Validate, convert, and format ISBN strings.
#[derive(Debug, Clone)]
pub struct IsbnTools {
    options: ValidationOptions,
    table: Arc<RangeTable>,
}

impl Default for IsbnTools {
    fn default() -> Self {
        Self::new(ValidationOptions::default())
    }
}

impl IsbnTools {
    /// Create tools with the given options, formatting with the bundled range table.
    #[must_use]
    pub fn new(options: ValidationOptions) -> Self {
        Self::with_table(options, RangeTable::bundled())
    }

    /// Create tools with the given options and range table.
    #[must_use]
    pub fn with_table(options: ValidationOptions, table: Arc<RangeTable>) -> Self {
        IsbnTools { options, table }
    }

    /// The options in use.
    #[must_use]
    pub const fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Returns whether the string is a valid ISBN-10 or ISBN-13.
    #[must_use]
    pub fn is_valid_isbn(&self, isbn: &str) -> bool {
        self.is_valid_isbn10(isbn) || self.is_valid_isbn13(isbn)
    }

    /// Returns whether the string is a valid ISBN-10.
    #[must_use]
    pub fn is_valid_isbn10(&self, isbn: &str) -> bool {
        is_valid_isbn10(isbn, self.options)
    }

    /// Returns whether the string is a valid ISBN-13.
    #[must_use]
    pub fn is_valid_isbn13(&self, isbn: &str) -> bool {
        is_valid_isbn13(isbn, self.options)
    }

    /// Convert an ISBN-10 string to an unformatted ISBN-13.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::InvalidIsbn`] if the input is not a valid ISBN-10.
    pub fn convert_isbn10_to_13(&self, isbn: &str) -> Result<String> {
        let isbn = prepare_isbn10(isbn, self.options)?;
        converter::isbn10_to_13(&isbn)
    }

    /// Convert an ISBN-13 string to an unformatted ISBN-10.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::InvalidIsbn`] if the input is not a valid ISBN-13,
    /// and [`IsbnError::NotConvertible`] if it does not start with `978`.
    pub fn convert_isbn13_to_10(&self, isbn: &str) -> Result<String> {
        let isbn = prepare_isbn13(isbn, self.options)?;
        converter::isbn13_to_10(&isbn)
    }

    /// Hyphenate an ISBN-10 or ISBN-13 string.
    ///
    /// A number outside every known range is returned unformatted.
    ///
    /// # Errors
    ///
    /// Returns [`IsbnError::InvalidIsbn`] if the input is neither a valid
    /// ISBN-13 nor a valid ISBN-10.
    pub fn format(&self, isbn: &str) -> Result<String> {
        let cleaned = clean(isbn, self.options)?;

        if normalize::is_isbn13_format(&cleaned) {
            if self.options.validate_check_digit && !check_digit::validate_isbn13(&cleaned) {
                return Err(IsbnError::InvalidIsbn(cleaned.into_owned()));
            }
            return Ok(self.table.format(&cleaned));
        }

        let upper = cleaned.to_ascii_uppercase();

        if normalize::is_isbn10_format(&upper) {
            if self.options.validate_check_digit && !check_digit::validate_isbn10(&upper) {
                return Err(IsbnError::InvalidIsbn(upper));
            }
            return Ok(self.table.format(&upper));
        }

        Err(IsbnError::InvalidIsbn(upper))
    }
}
