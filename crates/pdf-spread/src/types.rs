use pdfium_render::prelude::PdfiumError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpreadError {
    #[error("Pdfium error: {0}")]
    Pdfium(#[from] PdfiumError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("No pages to merge")]
    NoPages,
    #[error("Sheet {sheet} is {width}px wide and cannot be split into two halves")]
    EmptySplit { sheet: usize, width: u32 },
}

pub type Result<T> = std::result::Result<T, SpreadError>;

/// Which half of a sheet a page image was cropped from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// Columns `[w / 2, w)`, written first
    Right,
    /// Columns `[0, w / 2)`, written second
    Left,
}

impl Half {
    /// Halves in the order they are written for each sheet (right-to-left reading)
    pub const WRITE_ORDER: [Half; 2] = [Half::Right, Half::Left];
}

/// Outcome of a split run.
///
/// A split never rolls back: files written before a failure stay on disk and are
/// listed in `written`, in counter order. The failure itself, if any, is kept in
/// `error` so the caller can report both.
#[derive(Debug)]
pub struct SplitReport {
    /// Source PDF
    pub source: PathBuf,
    /// Directory the page images were written to
    pub output_dir: PathBuf,
    /// Number of sheets in the source, if it could be opened
    pub sheets: Option<usize>,
    /// Page image files written, in counter order
    pub written: Vec<PathBuf>,
    /// The error that stopped processing early
    pub error: Option<SpreadError>,
}

impl SplitReport {
    pub(crate) fn new(source: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            source,
            output_dir,
            sheets: None,
            written: Vec::new(),
            error: None,
        }
    }

    /// Number of page images successfully written
    pub fn pages_written(&self) -> usize {
        self.written.len()
    }

    /// True when every sheet was split and written
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, discarding the partial file list on failure.
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }
}

/// Outcome of a merge run
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// No `*.jpg` files were found; nothing was written
    NoImages,
    /// The merged PDF was written
    Written { path: PathBuf, pages: usize },
}
