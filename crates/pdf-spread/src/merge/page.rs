//! Building the merged PDF
//!
//! Each page is a single DCT-encoded image XObject drawn over the whole
//! MediaBox. Page size comes from the pixel size and the merge resolution.

use crate::constants::{MERGED_PDF_VERSION, px_to_pt};
use crate::split::encode_jpeg;
use crate::types::{Result, SpreadError};
use image::{ImageReader, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

/// Name of the image XObject in each page's resources
const PAGE_IMAGE_NAME: &str = "Im0";

/// A page image normalized to RGB and encoded as JPEG, ready to embed
#[derive(Debug, Clone)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

impl PageImage {
    /// Encode an RGB image
    pub fn from_rgb(image: &RgbImage, quality: u8) -> Result<Self> {
        Ok(Self {
            width: image.width(),
            height: image.height(),
            jpeg: encode_jpeg(image, quality)?,
        })
    }

    /// Load an image file and normalize it to three channels.
    ///
    /// The format is detected from the file contents, so a PNG with alpha or a
    /// palette saved under a `.jpg` name is still accepted.
    pub fn load(path: &Path, quality: u8) -> Result<Self> {
        let load_err = |source| SpreadError::ImageLoad {
            path: path.to_owned(),
            source,
        };
        let image = ImageReader::open(path)
            .map_err(|e| load_err(image::ImageError::IoError(e)))?
            .with_guessed_format()
            .map_err(|e| load_err(image::ImageError::IoError(e)))?
            .decode()
            .map_err(load_err)?;
        Self::from_rgb(&image.into_rgb8(), quality)
    }

    /// Page size in points at `resolution` pixels per inch
    pub fn size_pt(&self, resolution: f32) -> (f32, f32) {
        (
            px_to_pt(self.width, resolution),
            px_to_pt(self.height, resolution),
        )
    }
}

/// Assemble a document with one page per image, in the given order
pub fn build_document(pages: Vec<PageImage>, resolution: f32) -> Result<Document> {
    if pages.is_empty() {
        return Err(SpreadError::NoPages);
    }

    let mut doc = Document::with_version(MERGED_PDF_VERSION);
    let pages_id = doc.new_object_id();

    let page_count = pages.len();
    let mut kids = Vec::with_capacity(page_count);
    for page in pages {
        let page_id = add_image_page(&mut doc, pages_id, page, resolution);
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_count as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(Dictionary::from_iter(vec![(
        "Producer",
        Object::string_literal(concat!("pdf-spread ", env!("CARGO_PKG_VERSION"))),
    )]));
    doc.trailer.set("Info", info_id);

    Ok(doc)
}

/// Add the image XObject, content stream and page dictionary for one page
fn add_image_page(
    doc: &mut Document,
    parent_pages_id: ObjectId,
    page: PageImage,
    resolution: f32,
) -> ObjectId {
    let (width_pt, height_pt) = page.size_pt(resolution);

    let mut image_dict = Dictionary::new();
    image_dict.set("Type", Object::Name(b"XObject".to_vec()));
    image_dict.set("Subtype", Object::Name(b"Image".to_vec()));
    image_dict.set("Width", Object::Integer(page.width as i64));
    image_dict.set("Height", Object::Integer(page.height as i64));
    image_dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    image_dict.set("BitsPerComponent", Object::Integer(8));
    image_dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
    // Already JPEG; lopdf must not Flate it on top
    let image_id = doc.add_object(Stream::new(image_dict, page.jpeg).with_compression(false));

    let content = format!(
        "q {} 0 0 {} 0 0 cm /{} Do Q\n",
        width_pt, height_pt, PAGE_IMAGE_NAME
    );
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set(PAGE_IMAGE_NAME, Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );
    page_dict.set("Resources", Object::Dictionary(resources));
    page_dict.set("Contents", Object::Reference(content_id));

    doc.add_object(page_dict)
}
