use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for splitting a scanned PDF into page images
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplitOptions {
    /// Scanned PDF, one sheet (two book pages) per PDF page
    pub source: PathBuf,
    /// Directory for the page images; replaced on every run
    pub output_dir: PathBuf,
    /// Rendering resolution in dots per inch
    pub dpi: u32,
    /// JPEG quality (1-100) of the written pages
    pub jpeg_quality: u8,
    /// Explicit pdfium shared library to bind to
    pub pdfium_library: Option<PathBuf>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE_PDF),
            output_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            dpi: DEFAULT_DPI,
            jpeg_quality: DEFAULT_SPLIT_QUALITY,
            pdfium_library: None,
        }
    }
}

impl SplitOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(SpreadError::Config("DPI must be greater than zero".to_string()));
        }
        validate_quality(self.jpeg_quality)?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(SpreadError::Config("No output directory specified".to_string()));
        }
        Ok(())
    }
}

/// Settings for merging page images into a single PDF
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MergeOptions {
    /// Directory scanned (non-recursively) for `*.jpg` files
    pub input_dir: PathBuf,
    /// Merged PDF path
    pub output: PathBuf,
    /// Pixels per inch used to size each page
    pub resolution: f32,
    /// JPEG quality (1-100) used when embedding pages
    pub jpeg_quality: u8,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            output: PathBuf::from(DEFAULT_MERGED_PDF),
            resolution: DEFAULT_MERGE_RESOLUTION,
            jpeg_quality: DEFAULT_MERGE_QUALITY,
        }
    }
}

impl MergeOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(SpreadError::Config(format!(
                "Resolution must be a positive number, got {}",
                self.resolution
            )));
        }
        validate_quality(self.jpeg_quality)?;
        if self.output.as_os_str().is_empty() {
            return Err(SpreadError::Config("No output PDF specified".to_string()));
        }
        Ok(())
    }
}

/// Both stages of a book conversion: split, then merge the split pages
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookOptions {
    pub split: SplitOptions,
    pub merge: MergeOptions,
}

impl BookOptions {
    /// Merge options reading from the directory the split writes to
    pub fn linked_merge(&self) -> MergeOptions {
        MergeOptions {
            input_dir: self.split.output_dir.clone(),
            ..self.merge.clone()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| SpreadError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SpreadError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate both stages
    pub fn validate(&self) -> Result<()> {
        self.split.validate()?;
        self.linked_merge().validate()
    }
}

fn validate_quality(quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(SpreadError::Config(format!(
            "JPEG quality must be between 1 and 100, got {}",
            quality
        )));
    }
    Ok(())
}
