//! Parallel parsing and formatting of many ISBNs using Rayon.
//!
//! Each input is handled independently on Rayon's work-stealing thread pool;
//! results come back in input order. All inputs share one range table.
//!
//! # Examples
//!
//! ```
//! use isbnr::batch::format_batch;
//! use isbnr::RangeTable;
//!
//! let formatted = format_batch(&["0001234560", "not an isbn"], &RangeTable::bundled());
//! assert_eq!(formatted[0].as_deref().ok(), Some("0-00-123456-0"));
//! assert!(formatted[1].is_err());
//! ```

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::Result;
use crate::isbn::Isbn;
use crate::range_table::RangeTable;

/// Parse every input in parallel.
///
/// A failure for one input does not stop the others; each slot holds its
/// own result.
pub fn parse_batch<S>(inputs: &[S], table: &Arc<RangeTable>) -> Vec<Result<Isbn>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| Isbn::parse_with(input.as_ref(), table))
        .collect()
}

/// Parse and hyphenate every input in parallel.
///
/// Valid ISBNs outside every known range come back unformatted.
pub fn format_batch<S>(inputs: &[S], table: &Arc<RangeTable>) -> Vec<Result<String>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| Isbn::parse_with(input.as_ref(), table).map(|isbn| isbn.to_formatted_string()))
        .collect()
}

/// Parse every input in parallel, stopping at the first invalid one.
///
/// # Errors
///
/// Returns the error of an invalid input if there is one.
pub fn try_parse_batch<S>(inputs: &[S], table: &Arc<RangeTable>) -> Result<Vec<Isbn>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| Isbn::parse_with(input.as_ref(), table))
        .collect()
}
