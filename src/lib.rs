#![warn(missing_docs)]

//! # ISBNR: ISBN Rust Crate
//!
//! A Rust library for validating, converting, and hyphenating ISBN-10 and
//! ISBN-13 numbers, using the registration group range table published by
//! ISBN International.
//!
//! ## Quick Start
//!
//! ### Parsing and Formatting
//!
//! ```
//! use isbnr::Isbn;
//!
//! # fn main() -> Result<(), isbnr::IsbnError> {
//! let isbn = Isbn::parse(" 978-0-912345-67-3 ")?;
//! assert!(isbn.is_13());
//! assert_eq!(isbn.to_formatted_string(), "978-0-912345-67-3");
//! assert_eq!(isbn.group_identifier()?, "978-0");
//! assert_eq!(isbn.publisher_identifier()?, "912345");
//! assert_eq!(isbn.title_identifier()?, "67");
//! assert_eq!(isbn.check_digit(), '3');
//! # Ok(())
//! # }
//! ```
//!
//! ### Converting Between ISBN-10 and ISBN-13
//!
//! ```
//! use isbnr::{Isbn, IsbnError};
//!
//! # fn main() -> Result<(), IsbnError> {
//! let isbn10 = Isbn::parse("0123456789")?;
//! let isbn13 = isbn10.to_13();
//! assert_eq!(isbn13.to_string(), "9780123456786");
//! assert_eq!(isbn10, isbn13);
//!
//! // 979 numbers have no ISBN-10 form
//! let music = Isbn::parse("9790123456785")?;
//! assert!(matches!(music.to_10(), Err(IsbnError::NotConvertible(_))));
//! # Ok(())
//! # }
//! ```
//!
//! ### Validating Strings
//!
//! ```
//! use isbnr::{is_valid_isbn10, is_valid_isbn13, ValidationOptions};
//!
//! let options = ValidationOptions::default();
//! assert!(is_valid_isbn10("0-306-40615-2", options));
//! assert!(!is_valid_isbn13("978-0-306-40615-8", options));
//! ```
//!
//! ## Modules
//!
//! - [`isbn`]: The validated [`Isbn`] value type
//! - [`range_table`]: The registration group range table and its JSON asset
//! - [`range_message`]: Reading the official `RangeMessage.xml`
//! - [`range_lookup`]: Splitting an ISBN into group, publisher, and title parts
//! - [`normalize`]: Cleanup and format checks for raw input
//! - [`check_digit`]: ISBN-10 and ISBN-13 check digits
//! - [`converter`]: ISBN-10 to ISBN-13 conversion and back
//! - [`tools`]: String-level validation, conversion, and formatting
//! - [`batch`]: Parallel parsing and formatting
//! - [`error`]: Error types and result type

pub mod batch;
pub mod check_digit;
pub mod converter;
pub mod error;
pub mod isbn;
pub mod normalize;
pub mod range_lookup;
pub mod range_message;
pub mod range_table;
pub mod tools;

pub use error::{IsbnError, Result};
pub use isbn::{Isbn, IsbnKind};
pub use range_lookup::{Parts, RangeInfo};
pub use range_table::{RangeEntry, RangeRule, RangeStats, RangeTable, RegistrationGroup};
pub use tools::{is_valid_isbn10, is_valid_isbn13, IsbnTools, ValidationOptions};

/// Parse and validate an ISBN against the bundled range table.
///
/// Shorthand for [`Isbn::parse`].
///
/// # Errors
///
/// Returns [`IsbnError::InvalidIsbn`] if the input is not a valid ISBN.
pub fn parse(input: &str) -> Result<Isbn> {
    Isbn::parse(input)
}

/// All registration groups in the bundled range table, in table order.
///
/// Use [`RangeTable::isbn10_groups`] on [`RangeTable::bundled`] for the
/// ISBN-10 view, which only has the `978` groups.
#[must_use]
pub fn list_registration_groups() -> Vec<RegistrationGroup> {
    RegistrationGroup::all()
}
