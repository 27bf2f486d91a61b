//! Content streams for generated pages.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

use super::encoding::encode_winansi;
use crate::config::TextLayout;
use crate::convert::TextPage;
use crate::error::Result;

/// Resource name of the body font.
pub const BODY_FONT: &str = "F1";
/// Resource name of the title font.
pub const TITLE_FONT: &str = "F2";
/// Resource name of the image on an image page.
pub const IMAGE_NAME: &str = "Im1";

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn text(value: &str) -> Object {
    Object::String(encode_winansi(value), StringFormat::Literal)
}

/// Draw the title banner and body lines of a text page.
///
/// The title baseline sits one title size below the top margin. The body
/// starts one body size below the top margin, pushed down further by the
/// reserved title height when a title is present.
pub fn text_page(layout: &TextLayout, page: &TextPage) -> Result<Vec<u8>> {
    let top = layout.page_height - layout.margin;
    let mut operations = Vec::new();

    let mut body_top = top;
    if let Some(title) = &page.title {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![name(TITLE_FONT), Object::Real(layout.title_font_size)],
            ),
            Operation::new(
                "Td",
                vec![
                    Object::Real(layout.margin),
                    Object::Real(top - layout.title_font_size),
                ],
            ),
            Operation::new("Tj", vec![text(title)]),
            Operation::new("ET", vec![]),
        ]);
        body_top -= layout.title_reserved();
    }

    operations.extend([
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![name(BODY_FONT), Object::Real(layout.font_size)],
        ),
        Operation::new("TL", vec![Object::Real(layout.line_height())]),
        Operation::new(
            "Td",
            vec![
                Object::Real(layout.margin),
                Object::Real(body_top - layout.font_size),
            ],
        ),
    ]);
    for (index, line) in page.lines.iter().enumerate() {
        if index > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        if !line.is_empty() {
            operations.push(Operation::new("Tj", vec![text(line)]));
        }
    }
    operations.push(Operation::new("ET", vec![]));

    Ok(Content { operations }.encode()?)
}

/// Paint the page image across a `width` x `height` page.
pub fn image_page(width: f32, height: f32) -> Result<Vec<u8>> {
    let operations = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                Object::Real(width),
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(height),
                Object::Integer(0),
                Object::Integer(0),
            ],
        ),
        Operation::new("Do", vec![name(IMAGE_NAME)]),
        Operation::new("Q", vec![]),
    ];
    Ok(Content { operations }.encode()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<Operation> {
        Content::decode(bytes).unwrap().operations
    }

    fn operators(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn test_text_page_with_title() {
        let page = TextPage {
            title: Some("notes.txt".to_string()),
            lines: vec!["one".to_string(), String::new(), "three".to_string()],
        };
        let ops = decode(&text_page(&TextLayout::default(), &page).unwrap());

        assert_eq!(
            operators(&ops),
            vec!["BT", "Tf", "Td", "Tj", "ET", "BT", "Tf", "TL", "Td", "Tj", "T*", "T*", "Tj", "ET"]
        );
        assert_eq!(ops[1].operands[0].as_name().unwrap(), TITLE_FONT.as_bytes());
        assert_eq!(ops[3].operands[0].as_str().unwrap(), b"notes.txt");

        // 792 - 50 - 28 - 10
        assert_eq!(ops[8].operands[1].as_float().unwrap(), 704.0);
    }

    #[test]
    fn test_text_page_without_title() {
        let page = TextPage {
            title: None,
            lines: vec!["only".to_string()],
        };
        let ops = decode(&text_page(&TextLayout::default(), &page).unwrap());
        assert_eq!(operators(&ops), vec!["BT", "Tf", "TL", "Td", "Tj", "ET"]);
        assert_eq!(ops[1].operands[0].as_name().unwrap(), BODY_FONT.as_bytes());
        assert_eq!(ops[3].operands[1].as_float().unwrap(), 732.0);
    }

    #[test]
    fn test_image_page_fills_page() {
        let ops = decode(&image_page(300.0, 200.0).unwrap());
        assert_eq!(operators(&ops), vec!["q", "cm", "Do", "Q"]);
        assert_eq!(ops[1].operands[0].as_float().unwrap(), 300.0);
        assert_eq!(ops[1].operands[3].as_float().unwrap(), 200.0);
    }
}
