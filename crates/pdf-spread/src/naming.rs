//! Page file naming
//!
//! Split pages are named by a counter starting at 1, zero-padded to three
//! digits. The merge stage sorts names byte-wise, which only matches numeric
//! order while every name has the same width.

use crate::constants::{FIRST_PAGE_NUMBER, MAX_PADDED_PAGE_NUMBER, PAGE_EXTENSION, PAGE_NUMBER_WIDTH};
use std::path::{Path, PathBuf};

/// File name for a page counter value (`1` → `001.jpg`)
pub fn page_file_name(number: usize) -> String {
    format!("{:0width$}.{}", number, PAGE_EXTENSION, width = PAGE_NUMBER_WIDTH)
}

/// Whether a file name is matched by the `*.jpg` page pattern.
///
/// Hidden files are skipped, as a shell glob would.
pub fn is_page_file_name(name: &str) -> bool {
    !name.starts_with('.')
        && name
            .strip_suffix(PAGE_EXTENSION)
            .is_some_and(|stem| stem.ends_with('.'))
}

/// Monotonic output counter that hands out page file paths in a directory
#[derive(Debug, Clone)]
pub struct PageCounter {
    dir: PathBuf,
    next: usize,
    overflow_reported: bool,
}

impl PageCounter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_owned(),
            next: FIRST_PAGE_NUMBER,
            overflow_reported: false,
        }
    }

    /// The number the next page will receive
    pub fn peek(&self) -> usize {
        self.next
    }

    /// Path for the next page, without advancing
    pub fn next_path(&mut self) -> PathBuf {
        if self.peek() > MAX_PADDED_PAGE_NUMBER && !self.overflow_reported {
            log::warn!(
                "Page number {} exceeds {} digits; lexicographic merge order will no longer be numeric",
                self.peek(),
                PAGE_NUMBER_WIDTH
            );
            self.overflow_reported = true;
        }
        self.dir.join(page_file_name(self.next))
    }

    /// Advance after a page was written
    pub fn advance(&mut self) {
        self.next += 1;
    }
}
