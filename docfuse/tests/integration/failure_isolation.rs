//! One bad file never takes the rest of the batch down.

use docfuse::{FileOutcome, MergeConfig, Merger};

use crate::common::{file, page_sizes, page_text, png_bytes};

#[tokio::test]
async fn test_corrupt_image_replaced_in_place() {
    let files = vec![
        file("one.png", png_bytes(101, 102)),
        file("two.png", png_bytes(103, 104)),
        file("corrupt.png", b"\x89PNG\r\n\x1a\n truncated".to_vec()),
        file("four.png", png_bytes(105, 106)),
    ];

    let merger = Merger::new(MergeConfig::default()).unwrap();
    let output = merger.merge(files).await.unwrap();

    assert_eq!(
        page_sizes(&output.bytes),
        vec![(101, 102), (103, 104), (612, 792), (105, 106)]
    );
    assert_eq!(output.statistics.files_converted, 3);
    assert_eq!(output.statistics.files_failed, 1);

    let notice = &page_text(&output.bytes)[2];
    assert_eq!(notice[0], "Conversion failed: corrupt.png");
    assert!(matches!(
        output.reports[2].outcome,
        FileOutcome::ErrorPage { .. }
    ));
}

#[tokio::test]
async fn test_broken_spreadsheet_still_renders_text() {
    let files = vec![file("broken.xlsx", b"PK junk".to_vec()), file("ok.txt", "fine")];

    let merger = Merger::new(MergeConfig::default()).unwrap();
    let output = merger.merge(files).await.unwrap();

    let text = page_text(&output.bytes);
    assert_eq!(text.len(), 2);
    assert_eq!(text[0][0], "broken.xlsx");
    assert!(text[0][1].starts_with("Error reading spreadsheet:"));
    assert_eq!(output.statistics.files_failed, 0);
}
