//! The output document.
//!
//! [`OutputDocument`] owns the single PDF a merge produces. It is created
//! empty, grows by appending pages in input order, and is turned into a
//! plain [`lopdf::Document`] once with [`OutputDocument::finish`].
//!
//! Generated pages share one resource dictionary holding the two standard
//! fonts (Courier for body text, Courier-Bold for titles), so text pages
//! add nothing but their content stream and page dictionary.

pub mod content;
pub mod encoding;
pub mod pages;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

use crate::config::TextLayout;
use crate::convert::image::{ImagePlacement, NormalizedImage};
use crate::convert::text::{TextPage, TextPaginator};
use crate::error::Result;

use content::{BODY_FONT, IMAGE_NAME, TITLE_FONT};

/// Title of the merged document.
pub const DOCUMENT_TITLE: &str = "Merged document";

fn standard_font(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn literal(value: &str) -> Object {
    Object::String(value.as_bytes().to_vec(), StringFormat::Literal)
}

/// The PDF under construction.
pub struct OutputDocument {
    doc: Document,
    pages_id: ObjectId,
    text_resources_id: ObjectId,
    kids: Vec<ObjectId>,
    layout: TextLayout,
}

impl OutputDocument {
    /// Create an empty document whose text pages follow `layout`.
    pub fn new(layout: TextLayout) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let body_font = doc.add_object(standard_font("Courier"));
        let title_font = doc.add_object(standard_font("Courier-Bold"));
        let text_resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                BODY_FONT => body_font,
                TITLE_FONT => title_font,
            },
        });

        Self {
            doc,
            pages_id,
            text_resources_id,
            kids: Vec::new(),
            layout,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Whether no page has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.kids.is_empty()
    }

    fn push_page(&mut self, media_box: Object, resources: Object, contents: Vec<u8>) -> ObjectId {
        let contents_id = self.doc.add_object(Stream::new(Dictionary::new(), contents));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Resources" => resources,
            "Contents" => contents_id,
        });
        self.kids.push(page_id);
        page_id
    }

    /// Append one text page.
    pub fn add_text_page(&mut self, page: &TextPage) -> Result<()> {
        let contents = content::text_page(&self.layout, page)?;
        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(self.layout.page_width),
            Object::Real(self.layout.page_height),
        ];
        self.push_page(
            Object::Array(media_box),
            Object::Reference(self.text_resources_id),
            contents,
        );
        Ok(())
    }

    /// Append text pages in order, returning how many were added.
    pub fn add_text_pages(&mut self, pages: &[TextPage]) -> Result<usize> {
        for page in pages {
            self.add_text_page(page)?;
        }
        Ok(pages.len())
    }

    /// Append a page showing `image` edge to edge.
    ///
    /// The page is sized by [`ImagePlacement::fit`]. The JPEG data is
    /// embedded as-is with the `DCTDecode` filter and excluded from later
    /// Flate compression.
    pub fn add_image_page(&mut self, image: &NormalizedImage) -> Result<ImagePlacement> {
        let placement = ImagePlacement::fit(image.width, image.height);

        let xobject = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            image.jpeg.clone(),
        )
        .with_compression(false);
        let image_id = self.doc.add_object(xobject);

        let contents = content::image_page(placement.page_width, placement.page_height)?;
        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(placement.page_width),
            Object::Real(placement.page_height),
        ];
        let resources = dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        };
        self.push_page(
            Object::Array(media_box),
            Object::Dictionary(resources),
            contents,
        );
        Ok(placement)
    }

    /// Append a one-page notice saying `name` could not be converted.
    ///
    /// The message is wrapped like any text; whatever does not fit on the
    /// first page is dropped.
    pub fn add_error_page(&mut self, name: &str, message: &str) -> Result<()> {
        let title = format!("Conversion failed: {name}");
        let mut pages = TextPaginator::new(self.layout).paginate(message, Some(&title));
        pages.truncate(1);
        self.add_text_pages(&pages)?;
        Ok(())
    }

    /// Append every page of a source PDF, in its reading order.
    ///
    /// Returns the number of pages copied.
    pub fn append_pdf(&mut self, source: Document) -> Result<usize> {
        let page_ids = pages::import_pages(&mut self.doc, source, self.pages_id)?;
        let count = page_ids.len();
        self.kids.extend(page_ids);
        Ok(count)
    }

    /// Close the page tree, add the catalog and document info, and hand
    /// back the finished document.
    pub fn finish(self) -> Document {
        let Self {
            mut doc,
            pages_id,
            kids,
            ..
        } = self;

        let count = kids.len() as i64;
        let kids: Vec<Object> = kids.into_iter().map(Object::Reference).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let info_id = doc.add_object(dictionary! {
            "Producer" => literal(&format!("{} {}", crate::NAME, crate::VERSION)),
            "Title" => literal(DOCUMENT_TITLE),
            "CreationDate" => literal(&created),
        });
        doc.trailer.set("Info", info_id);

        doc
    }
}
