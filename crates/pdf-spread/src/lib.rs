pub mod constants;
pub mod merge;
pub mod naming;
mod book;
mod options;
pub mod split;
mod types;

pub use book::{BookReport, convert_book};
pub use merge::{collect_page_images, merge_image_files, merge_images};
pub use naming::{PageCounter, page_file_name};
pub use options::*;
pub use split::{SheetSource, init_pdfium, reset_output_directory, split_pdf, split_sheets};
pub use types::*;
