//! Cutting a rendered sheet into its two book pages

use crate::types::{Half, Result, SpreadError};
use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, imageops};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column region of a sheet: `x` offset and width, spanning the full height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub x: u32,
    pub width: u32,
}

/// Split column of a sheet `width` pixels wide.
///
/// Floor division: on odd widths the left half is one column narrower than
/// the right half.
pub fn split_column(width: u32) -> u32 {
    width / 2
}

/// Column region of `half` on a sheet `width` pixels wide
pub fn half_columns(width: u32, half: Half) -> Columns {
    let mid = split_column(width);
    match half {
        Half::Right => Columns {
            x: mid,
            width: width - mid,
        },
        Half::Left => Columns { x: 0, width: mid },
    }
}

/// Crop one half out of a rendered sheet.
///
/// A sheet narrower than two pixels has an empty left half (and a sheet with
/// no columns an empty right half). Cropping an empty half fails with
/// `EmptySplit`; `sheet_index` is only used for that error. Halves are cropped
/// and written one at a time, so the right half of a one-pixel sheet is still
/// written before the left half fails.
pub fn crop_half(sheet: &RgbImage, half: Half, sheet_index: usize) -> Result<RgbImage> {
    let cols = half_columns(sheet.width(), half);
    if cols.width == 0 {
        return Err(SpreadError::EmptySplit {
            sheet: sheet_index,
            width: sheet.width(),
        });
    }
    Ok(imageops::crop_imm(sheet, cols.x, 0, cols.width, sheet.height()).to_image())
}

/// Encode a page as JPEG into memory
pub fn encode_jpeg(page: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    page.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Write a page to `path` as JPEG
pub fn write_jpeg(page: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    page.write_with_encoder(encoder)?;
    writer.flush()?;
    Ok(())
}
