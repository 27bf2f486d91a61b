//! Shared fixtures for the integration tests.
//!
//! Everything is built in memory: small PDFs with lopdf, images with the
//! image crate and OOXML packages with zip.

#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

use docfuse::InputFile;

/// Build a PDF with `pages` pages of `width` x 400 points.
pub fn pdf_bytes(pages: usize, width: i64) -> Vec<u8> {
    let mut doc = pdf_document(pages, width);
    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

fn pdf_document(pages: usize, width: i64) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            })
            .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 400.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Build a one-page PDF showing `text` in an uncompressed content stream.
pub fn pdf_text_bytes(text: &str) -> Vec<u8> {
    let mut doc = pdf_document(1, 300);
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let contents_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = pages(&doc)[0];
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set("Contents", contents_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// Build a one-page PDF whose trailer declares a standard security handler
/// with unknown owner and user keys, so the empty password does not open it.
pub fn encrypted_pdf_bytes() -> Vec<u8> {
    let mut doc = pdf_document(1, 300);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "O" => Object::string_literal(vec![0u8; 32]),
        "U" => Object::string_literal(vec![0u8; 32]),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// Encode a solid `width` x `height` PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([20, 120, 220]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// Build an in-memory ZIP package from `(part name, contents)` pairs.
pub fn package(parts: &[(&str, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in parts {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A DOCX with one paragraph per entry.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    package(&[("word/document.xml", xml)])
}

/// A PPTX with one text run per slide.
pub fn pptx_bytes(slides: &[&str]) -> Vec<u8> {
    let parts: Vec<(String, String)> = slides
        .iter()
        .enumerate()
        .map(|(i, text)| {
            (
                format!("ppt/slides/slide{}.xml", i + 1),
                format!(r#"<p:sld><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:sld>"#),
            )
        })
        .collect();
    let borrowed: Vec<(&str, String)> = parts
        .iter()
        .map(|(name, xml)| (name.as_str(), xml.clone()))
        .collect();
    package(&borrowed)
}

pub fn file(name: &str, bytes: impl Into<Vec<u8>>) -> InputFile {
    InputFile::new(name, bytes)
}

/// Parse merged output.
pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("output is a parseable PDF")
}

fn pages(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// `(width, height)` of every page, rounded to whole points.
pub fn page_sizes(bytes: &[u8]) -> Vec<(i64, i64)> {
    let doc = load(bytes);
    pages(&doc)
        .into_iter()
        .map(|id| {
            let media_box = doc
                .get_dictionary(id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()
                .clone();
            let value = |i: usize| media_box[i].as_float().unwrap().round() as i64;
            (value(2) - value(0), value(3) - value(1))
        })
        .collect()
}

/// Strings shown with `Tj` on every page, decoded as Latin-1.
pub fn page_text(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = load(bytes);
    pages(&doc)
        .into_iter()
        .map(|id| {
            let content = doc.get_page_content(id).unwrap_or_default();
            Content::decode(&content)
                .map(|c| c.operations)
                .unwrap_or_default()
                .into_iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(latin1))
                .collect()
        })
        .collect()
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
