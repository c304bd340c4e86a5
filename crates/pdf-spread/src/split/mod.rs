//! Splitting scanned two-page sheets into single page images
//!
//! Every sheet is rendered, cut at its middle column and written as two JPEG
//! files: right half first, then left half, so the counter follows a
//! right-to-left book.

mod halves;
mod source;

pub use halves::{Columns, crop_half, encode_jpeg, half_columns, split_column};
pub use source::{PDFIUM_LIB_PATH_ENV, PdfiumSheets, SheetSource, init_pdfium};

use crate::naming::PageCounter;
use crate::options::SplitOptions;
use crate::types::*;
use halves::write_jpeg;
use log::{debug, info};
use std::path::Path;

/// Delete `dir` with everything in it, then create it empty.
///
/// There is no confirmation and nothing is kept from a previous run.
pub fn reset_output_directory(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
        info!("Removed existing output directory: {}", dir.display());
    }
    std::fs::create_dir_all(dir)?;
    info!("Created output directory: {}", dir.display());
    Ok(())
}

/// Split a scanned PDF into page images
pub async fn split_pdf(options: &SplitOptions) -> Result<SplitReport> {
    let options = options.clone();
    let report = tokio::task::spawn_blocking(move || split_pdf_blocking(&options)).await?;
    Ok(report)
}

/// Blocking form of [`split_pdf`].
///
/// Failures do not escape: they end processing and are stored in the returned
/// report together with the files written so far.
pub fn split_pdf_blocking(options: &SplitOptions) -> SplitReport {
    run_split(options, |report| {
        let pdfium = init_pdfium(options.pdfium_library.as_deref())?;
        let sheets = PdfiumSheets::open(&pdfium, &options.source)?;
        split_into(&sheets, options, report)
    })
}

/// Split the sheets of any [`SheetSource`] into `options.output_dir`.
///
/// `options.source` is only recorded in the report.
pub fn split_sheets<S: SheetSource + ?Sized>(source: &S, options: &SplitOptions) -> SplitReport {
    run_split(options, |report| split_into(source, options, report))
}

fn run_split(
    options: &SplitOptions,
    body: impl FnOnce(&mut SplitReport) -> Result<()>,
) -> SplitReport {
    let mut report = SplitReport::new(options.source.clone(), options.output_dir.clone());

    let outcome = options
        .validate()
        .and_then(|()| reset_output_directory(&options.output_dir))
        .and_then(|()| body(&mut report));
    if let Err(err) = outcome {
        report.error = Some(err);
    }

    info!(
        "Split finished: {} page images written to {}",
        report.pages_written(),
        report.output_dir.display()
    );
    report
}

fn split_into<S: SheetSource + ?Sized>(
    source: &S,
    options: &SplitOptions,
    report: &mut SplitReport,
) -> Result<()> {
    let total = source.sheet_count();
    report.sheets = Some(total);
    info!(
        "Splitting {} sheets from {} at {} dpi",
        total,
        options.source.display(),
        options.dpi
    );

    let mut counter = PageCounter::new(&options.output_dir);
    for index in 0..total {
        let sheet = source.render_sheet(index, options.dpi)?;
        debug!(
            "Rendered sheet {} → {}x{} px",
            index + 1,
            sheet.width(),
            sheet.height()
        );

        for half in Half::WRITE_ORDER {
            let page = crop_half(&sheet, half, index)?;
            let path = counter.next_path();
            write_jpeg(&page, &path, options.jpeg_quality)?;
            debug!("Wrote {:?} half of sheet {} → {}", half, index + 1, path.display());
            report.written.push(path);
            counter.advance();
        }
    }

    Ok(())
}
