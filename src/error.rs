//! Error types for ISBN operations.
//!
//! This module provides the [`IsbnError`] type for all library operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all ISBN library operations.
///
/// The first four variants describe problems with an ISBN number itself and
/// always carry the (possibly partially normalized) string that caused them.
/// The remaining variants are raised while loading a range table.
#[derive(Error, Debug)]
pub enum IsbnError {
    /// The input failed the charset check, the format check, or checksum validation.
    #[error("\"{0}\" is not a valid ISBN number.")]
    InvalidIsbn(String),

    /// An ISBN-13 without the `978` prefix was asked to become an ISBN-10.
    #[error("ISBN {0} cannot be converted to an ISBN-10.")]
    NotConvertible(String),

    /// The ISBN is valid but no registration group in the range table matches it.
    #[error("The ISBN {0} is semantically valid, but not in a recognized group.")]
    UnknownGroup(String),

    /// The ISBN belongs to a known group but to no publisher range within it.
    #[error(
        "The ISBN {0} is semantically valid and belongs to a valid group, but is not in a recognized range."
    )]
    UnknownRange(String),

    /// A range table record is malformed.
    #[error("Invalid range table: {0}")]
    InvalidRangeTable(String),

    /// A RangeMessage XML document could not be parsed.
    #[error("XML error: {0}")]
    Xml(String),

    /// The range table asset is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading a range table asset.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`IsbnError`].
pub type Result<T> = std::result::Result<T, IsbnError>;
