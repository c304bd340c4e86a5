use image::{DynamicImage, GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::{Document, Object, ObjectId};
use pdf_spread::*;
use std::path::Path;

fn write_jpeg(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

fn options_for(input: &Path, output: &Path) -> MergeOptions {
    MergeOptions {
        input_dir: input.to_path_buf(),
        output: output.to_path_buf(),
        ..Default::default()
    }
}

fn extract_number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("not a number: {:?}", other),
    }
}

/// (width, height) of a page's MediaBox in points
fn media_box(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let page = doc.get_dictionary(page_id).unwrap();
    let mb = page.get(b"MediaBox").unwrap().as_array().unwrap();
    (extract_number(&mb[2]), extract_number(&mb[3]))
}

/// The embedded image of a merged page
fn page_image(doc: &Document, page_id: ObjectId) -> (lopdf::Dictionary, DynamicImage) {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
    let stream = doc.get_object(image_id).unwrap().as_stream().unwrap();
    let decoded = image::load_from_memory(&stream.content).unwrap();
    (stream.dict.clone(), decoded)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "{} != {}",
        actual,
        expected
    );
}

#[test]
fn test_collect_sorts_bytewise_and_filters() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    for name in ["010.jpg", "002.jpg", "001.jpg", "10.jpg"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    for name in ["003.jpeg", "004.JPG", "005.png", ".006.jpg", "007.jpg.bak"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    std::fs::create_dir(dir.join("folder.jpg")).unwrap();
    std::fs::create_dir(dir.join("sub")).unwrap();
    std::fs::write(dir.join("sub").join("000.jpg"), b"x").unwrap();

    let files = collect_page_images(dir).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    // Plain string order: "10.jpg" sorts after "010.jpg"
    assert_eq!(names, vec!["001.jpg", "002.jpg", "010.jpg", "10.jpg"]);
}

#[test]
fn test_collect_missing_directory_is_error() {
    let temp = tempfile::tempdir().unwrap();
    let result = collect_page_images(temp.path().join("missing"));
    assert!(matches!(result, Err(SpreadError::Io(_))));
}

#[tokio::test]
async fn test_merge_empty_directory_is_noop() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("pages");
    std::fs::create_dir(&input).unwrap();
    std::fs::write(input.join("cover.png"), b"x").unwrap();
    let output = temp.path().join("merged.pdf");

    let outcome = merge_images(&options_for(&input, &output)).await.unwrap();

    assert_eq!(outcome, MergeOutcome::NoImages);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_merge_pages_follow_filename_order() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("pages");
    std::fs::create_dir(&input).unwrap();
    // Written out of order; distinct sizes identify each page
    write_jpeg(&input.join("003.jpg"), 50, 50, [0, 0, 255]);
    write_jpeg(&input.join("001.jpg"), 100, 200, [255, 0, 0]);
    write_jpeg(&input.join("002.jpg"), 300, 100, [0, 255, 0]);
    let output = temp.path().join("merged.pdf");

    let outcome = merge_images(&options_for(&input, &output)).await.unwrap();
    assert_eq!(
        outcome,
        MergeOutcome::Written {
            path: output.clone(),
            pages: 3
        }
    );

    let doc = Document::load(&output).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 3);

    // Resolution 100: 100px → 72pt
    let sizes: Vec<_> = pages.values().map(|&id| media_box(&doc, id)).collect();
    let expected = [(72.0, 144.0), (216.0, 72.0), (36.0, 36.0)];
    for ((w, h), (ew, eh)) in sizes.into_iter().zip(expected) {
        assert_close(w, ew);
        assert_close(h, eh);
    }

    let (dict, first) = page_image(&doc, pages[&1]);
    assert_eq!(first.width(), 100);
    assert_eq!(first.height(), 200);
    assert_eq!(dict.get(b"ColorSpace").unwrap().as_name().unwrap(), b"DeviceRGB");
    assert_eq!(dict.get(b"Filter").unwrap().as_name().unwrap(), b"DCTDecode");
}

#[tokio::test]
async fn test_merge_resolution_sets_page_size() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("pages");
    std::fs::create_dir(&input).unwrap();
    write_jpeg(&input.join("001.jpg"), 144, 72, [128, 128, 128]);
    let output = temp.path().join("merged.pdf");

    let mut options = options_for(&input, &output);
    options.resolution = 72.0;
    merge_images(&options).await.unwrap();

    let doc = Document::load(&output).unwrap();
    let (w, h) = media_box(&doc, doc.get_pages()[&1]);
    assert_close(w, 144.0);
    assert_close(h, 72.0);
}

#[tokio::test]
async fn test_merge_normalizes_alpha_images() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("pages");
    std::fs::create_dir(&input).unwrap();
    // PNG data under .jpg names: detected by content, converted to RGB
    RgbaImage::from_pixel(20, 10, Rgba([255, 0, 0, 128]))
        .save_with_format(input.join("001.jpg"), image::ImageFormat::Png)
        .unwrap();
    GrayAlphaImage::from_pixel(10, 20, LumaA([200, 50]))
        .save_with_format(input.join("002.jpg"), image::ImageFormat::Png)
        .unwrap();
    let output = temp.path().join("merged.pdf");

    let outcome = merge_images(&options_for(&input, &output)).await.unwrap();
    assert!(matches!(outcome, MergeOutcome::Written { pages: 2, .. }));

    let doc = Document::load(&output).unwrap();
    for (_, &page_id) in doc.get_pages().iter() {
        let (dict, image) = page_image(&doc, page_id);
        assert_eq!(dict.get(b"ColorSpace").unwrap().as_name().unwrap(), b"DeviceRGB");
        assert!(!image.color().has_alpha());
    }
}

#[tokio::test]
async fn test_merge_normalizes_palette_images() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("pages");
    std::fs::create_dir(&input).unwrap();
    // GIF is always palette-indexed; saved under a .jpg name
    let colors = [[255, 0, 0], [0, 160, 0], [0, 0, 255], [250, 250, 250]];
    RgbImage::from_fn(16, 8, |x, _| Rgb(colors[(x / 4) as usize]))
        .save_with_format(input.join("001.jpg"), image::ImageFormat::Gif)
        .unwrap();
    assert_eq!(&std::fs::read(input.join("001.jpg")).unwrap()[..3], b"GIF");
    let output = temp.path().join("merged.pdf");

    let outcome = merge_images(&options_for(&input, &output)).await.unwrap();
    assert!(matches!(outcome, MergeOutcome::Written { pages: 1, .. }));

    let doc = Document::load(&output).unwrap();
    let (dict, image) = page_image(&doc, doc.get_pages()[&1]);
    assert_eq!(dict.get(b"ColorSpace").unwrap().as_name().unwrap(), b"DeviceRGB");
    assert_eq!(dict.get(b"BitsPerComponent").unwrap().as_i64().unwrap(), 8);
    assert!(!image.color().has_alpha());
    assert_eq!((image.width(), image.height()), (16, 8));
}

#[tokio::test]
async fn test_merge_unreadable_image_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("pages");
    std::fs::create_dir(&input).unwrap();
    write_jpeg(&input.join("001.jpg"), 10, 10, [0, 0, 0]);
    std::fs::write(input.join("002.jpg"), b"not an image").unwrap();
    let output = temp.path().join("merged.pdf");

    let result = merge_images(&options_for(&input, &output)).await;

    match result {
        Err(SpreadError::ImageLoad { path, .. }) => assert!(path.ends_with("002.jpg")),
        other => panic!("Expected ImageLoad error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn test_merge_explicit_file_list_keeps_given_order() {
    let temp = tempfile::tempdir().unwrap();
    let a = temp.path().join("a.jpg");
    let b = temp.path().join("b.jpg");
    write_jpeg(&a, 100, 100, [255, 255, 255]);
    write_jpeg(&b, 200, 100, [0, 0, 0]);
    let output = temp.path().join("merged.pdf");

    let options = options_for(temp.path(), &output);
    merge_image_files(&[b.clone(), a.clone()], &options)
        .await
        .unwrap();

    let doc = Document::load(&output).unwrap();
    let pages = doc.get_pages();
    assert_close(media_box(&doc, pages[&1]).0, 144.0);
    assert_close(media_box(&doc, pages[&2]).0, 72.0);
}

#[tokio::test]
async fn test_merge_rejects_invalid_resolution() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = options_for(temp.path(), &temp.path().join("out.pdf"));
    options.resolution = 0.0;

    let result = merge_images(&options).await;
    assert!(matches!(result, Err(SpreadError::Config(_))));
}

#[test]
fn test_build_document_without_pages_fails() {
    let result = pdf_spread::merge::build_document(Vec::new(), 100.0);
    assert!(matches!(result, Err(SpreadError::NoPages)));
}
