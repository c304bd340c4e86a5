//! Shared constants for splitting and merging
//!
//! Defaults here mirror the values the two stages have always used, so a run
//! with default options produces the same directory and file names.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Resolution of PDF user space (1 point = 1/72 inch)
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Scale factor that renders a PDF page at the given DPI
#[inline]
pub fn render_scale(dpi: u32) -> f32 {
    dpi as f32 / PDF_POINTS_PER_INCH
}

/// Convert a pixel length at `resolution` pixels-per-inch to PDF points
#[inline]
pub fn px_to_pt(px: u32, resolution: f32) -> f32 {
    px as f32 * PDF_POINTS_PER_INCH / resolution
}

// =============================================================================
// Split Defaults
// =============================================================================

/// Source PDF read when no path is given
pub const DEFAULT_SOURCE_PDF: &str = "a.pdf";

/// Directory the page images are written to
pub const DEFAULT_PAGES_DIR: &str = "Temp_Pages";

/// Rendering resolution for sheets
pub const DEFAULT_DPI: u32 = 300;

/// JPEG quality for split page images
pub const DEFAULT_SPLIT_QUALITY: u8 = 95;

// =============================================================================
// Page Naming
// =============================================================================

/// First value of the output counter
pub const FIRST_PAGE_NUMBER: usize = 1;

/// Zero-padded width of page file stems (`001`)
pub const PAGE_NUMBER_WIDTH: usize = 3;

/// Largest counter that still fits in `PAGE_NUMBER_WIDTH` digits
pub const MAX_PADDED_PAGE_NUMBER: usize = 999;

/// Extension of page image files, matched case-sensitively
pub const PAGE_EXTENSION: &str = "jpg";

// =============================================================================
// Merge Defaults
// =============================================================================

/// Merged PDF written when no path is given
pub const DEFAULT_MERGED_PDF: &str = "merged_book.pdf";

/// Pixels per inch used to size merged pages
pub const DEFAULT_MERGE_RESOLUTION: f32 = 100.0;

/// JPEG quality used when re-encoding pages into the merged PDF
pub const DEFAULT_MERGE_QUALITY: u8 = 75;

/// PDF version of the merged document
pub const MERGED_PDF_VERSION: &str = "1.7";
