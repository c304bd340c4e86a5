//! Where sheets come from
//!
//! The splitter only needs a sheet count and a way to rasterize one sheet, so
//! it is written against [`SheetSource`]. [`PdfiumSheets`] is the real
//! implementation backed by pdfium.

use crate::constants::render_scale;
use crate::types::Result;
use image::RgbImage;
use pdfium_render::prelude::*;
use std::path::Path;

/// Environment variable naming a pdfium library file or directory
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// An ordered sequence of sheets that can be rendered to opaque RGB images
pub trait SheetSource {
    /// Number of sheets
    fn sheet_count(&self) -> usize;

    /// Rasterize sheet `index` (0-based) at `dpi` dots per inch
    fn render_sheet(&self, index: usize, dpi: u32) -> Result<RgbImage>;
}

/// Sheets of a PDF document opened with pdfium.
///
/// The document handle is closed when this value is dropped.
pub struct PdfiumSheets<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumSheets<'a> {
    /// Open `path` with an already bound pdfium instance
    pub fn open(pdfium: &'a Pdfium, path: &Path) -> Result<Self> {
        let document = pdfium.load_pdf_from_file(path, None)?;
        Ok(Self { document })
    }
}

impl SheetSource for PdfiumSheets<'_> {
    fn sheet_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_sheet(&self, index: usize, dpi: u32) -> Result<RgbImage> {
        let page = self.document.pages().get(index as u16)?;
        let config = PdfRenderConfig::new().scale_page_by_factor(render_scale(dpi));
        let bitmap = page.render_with_config(&config)?;
        // Pdfium renders onto an opaque white background, dropping alpha loses nothing
        Ok(bitmap.as_image().into_rgb8())
    }
}

/// Bind to pdfium.
///
/// Tries, in order: the explicit library (file or directory), the directory or
/// file named by `PDFIUM_LIB_PATH`, `vendor/pdfium/lib` under the working
/// directory, then the system library search path.
pub fn init_pdfium(explicit: Option<&Path>) -> Result<Pdfium> {
    if let Some(path) = explicit {
        return Ok(Pdfium::new(Pdfium::bind_to_library(library_file(path))?));
    }

    if let Some(env_path) = std::env::var_os(PDFIUM_LIB_PATH_ENV) {
        let env_path = Path::new(&env_path);
        match Pdfium::bind_to_library(library_file(env_path)) {
            Ok(bindings) => return Ok(Pdfium::new(bindings)),
            Err(e) => log::warn!(
                "Could not bind pdfium from {}={}: {}",
                PDFIUM_LIB_PATH_ENV,
                env_path.display(),
                e
            ),
        }
    }

    // Vendored copy relative to the working directory
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(bindings) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            log::debug!("Bound pdfium from {}", vendor_path.display());
            return Ok(Pdfium::new(bindings));
        }
    }

    Ok(Pdfium::new(Pdfium::bind_to_system_library()?))
}

fn library_file(path: &Path) -> std::path::PathBuf {
    if path.is_dir() {
        Pdfium::pdfium_platform_library_name_at_path(path)
    } else {
        path.to_path_buf()
    }
}
