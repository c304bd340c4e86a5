//! Merging page images into a single PDF
//!
//! Pages are ordered by a plain byte-wise sort of their paths. That only
//! matches reading order because split pages carry fixed-width numbers.

mod page;

pub use page::{PageImage, build_document};

use crate::naming::is_page_file_name;
use crate::options::MergeOptions;
use crate::types::*;
use lopdf::Document;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// List the `*.jpg` files directly inside `dir`, in merge order
pub fn collect_page_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        if !is_page_file_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(files)
}

/// Merge the page images found in `options.input_dir`
pub async fn merge_images(options: &MergeOptions) -> Result<MergeOutcome> {
    let options = options.clone();
    tokio::task::spawn_blocking(move || merge_images_blocking(&options)).await?
}

/// Blocking form of [`merge_images`]
pub fn merge_images_blocking(options: &MergeOptions) -> Result<MergeOutcome> {
    options.validate()?;

    let files = collect_page_images(&options.input_dir)?;
    if files.is_empty() {
        info!(
            "No JPG files found in '{}', nothing to merge",
            options.input_dir.display()
        );
        return Ok(MergeOutcome::NoImages);
    }
    info!(
        "Found {} JPG files in '{}'",
        files.len(),
        options.input_dir.display()
    );

    merge_image_files_blocking(&files, options)
}

/// Merge an explicit, already ordered list of image files.
///
/// `options.input_dir` is ignored.
pub async fn merge_image_files(files: &[PathBuf], options: &MergeOptions) -> Result<MergeOutcome> {
    let files = files.to_vec();
    let options = options.clone();
    tokio::task::spawn_blocking(move || merge_image_files_blocking(&files, &options)).await?
}

/// Blocking form of [`merge_image_files`]
pub fn merge_image_files_blocking(
    files: &[PathBuf],
    options: &MergeOptions,
) -> Result<MergeOutcome> {
    options.validate()?;
    if files.is_empty() {
        return Ok(MergeOutcome::NoImages);
    }

    // Everything is loaded before the output is touched
    info!("Merging {} images...", files.len());
    let mut pages = Vec::with_capacity(files.len());
    for path in files {
        let page = PageImage::load(path, options.jpeg_quality)?;
        debug!("Loaded {} ({}x{} px)", path.display(), page.width, page.height);
        pages.push(page);
    }

    let page_count = pages.len();
    let doc = build_document(pages, options.resolution)?;
    write_pdf(doc, &options.output)?;

    info!(
        "Merged {} images into '{}'",
        page_count,
        options.output.display()
    );
    Ok(MergeOutcome::Written {
        path: options.output.clone(),
        pages: page_count,
    })
}

/// Save the merged document
fn write_pdf(mut doc: Document, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    doc.save_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}
