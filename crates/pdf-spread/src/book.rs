//! Split a scanned book and merge the pages back, in one call
//!
//! The stages still talk only through the pages directory: the merge scans it
//! exactly as a separate `merge` run would.

use crate::merge::merge_images;
use crate::options::BookOptions;
use crate::split::split_pdf;
use crate::types::*;

/// Results of both stages
#[derive(Debug)]
pub struct BookReport {
    pub split: SplitReport,
    /// `None` when the split failed and the merge was not attempted
    pub merge: Option<Result<MergeOutcome>>,
}

impl BookReport {
    /// True when both stages ran without error
    pub fn is_complete(&self) -> bool {
        self.split.is_complete() && matches!(self.merge, Some(Ok(_)))
    }
}

/// Split `options.split.source`, then merge the pages directory into
/// `options.merge.output`.
///
/// A failed split skips the merge so a partial page set is never assembled.
pub async fn convert_book(options: &BookOptions) -> Result<BookReport> {
    options.validate()?;

    let split = split_pdf(&options.split).await?;
    if !split.is_complete() {
        log::warn!("Split did not finish, skipping merge");
        return Ok(BookReport { split, merge: None });
    }

    let merge = merge_images(&options.linked_merge()).await;
    Ok(BookReport {
        split,
        merge: Some(merge),
    })
}
