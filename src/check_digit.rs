//! ISBN check digit computation and validation.
//!
//! ISBN-10 uses a mod 11 weighted sum (weights 1 through 9 over the first nine
//! digits), where a remainder of 10 is written as `X`. ISBN-13 uses the EAN
//! mod 10 sum with alternating weights 1 and 3.
//!
//! All functions here expect input that has already passed the format check:
//! they do not fail on malformed data, they simply produce a meaningless digit.

/// Compute the ISBN-10 check digit from the first nine digits.
///
/// Only the first nine bytes of `isbn` are read, so a full ten-character
/// ISBN-10 may be passed as well.
///
/// # Examples
///
/// ```
/// use isbnr::check_digit::compute_isbn10;
///
/// assert_eq!(compute_isbn10("030640615"), '2');
/// assert_eq!(compute_isbn10("043942089"), 'X');
/// ```
#[must_use]
pub fn compute_isbn10(isbn: &str) -> char {
    let sum: u32 = isbn
        .bytes()
        .take(9)
        .zip(1u32..)
        .map(|(b, weight)| digit_value(b) * weight)
        .sum();

    match sum % 11 {
        10 => 'X',
        d => digit_char(d),
    }
}

/// Compute the ISBN-13 check digit from the first twelve digits.
///
/// # Examples
///
/// ```
/// use isbnr::check_digit::compute_isbn13;
///
/// assert_eq!(compute_isbn13("978030640615"), '7');
/// ```
#[must_use]
pub fn compute_isbn13(isbn: &str) -> char {
    let sum: u32 = isbn
        .bytes()
        .take(12)
        .enumerate()
        .map(|(i, b)| digit_value(b) * if i % 2 == 0 { 1 } else { 3 })
        .sum();

    digit_char((10 - (sum % 10)) % 10)
}

/// Returns whether the last character of an unformatted, upper-case ISBN-10
/// matches the check digit computed from its first nine digits.
#[must_use]
pub fn validate_isbn10(isbn: &str) -> bool {
    isbn.len() == 10 && isbn.chars().nth(9) == Some(compute_isbn10(isbn))
}

/// Returns whether the last character of an unformatted ISBN-13 matches the
/// check digit computed from its first twelve digits.
#[must_use]
pub fn validate_isbn13(isbn: &str) -> bool {
    isbn.len() == 13 && isbn.chars().nth(12) == Some(compute_isbn13(isbn))
}

fn digit_value(b: u8) -> u32 {
    u32::from(b.wrapping_sub(b'0'))
}

fn digit_char(d: u32) -> char {
    char::from_digit(d, 10).unwrap_or('0')
}
