//! Output page order follows input order.

use docfuse::{InputFile, MergeConfig, Merger, QualityTier, sort_natural};
use rstest::rstest;

use crate::common::{file, page_sizes, pdf_bytes, png_bytes};

const LETTER: (i64, i64) = (612, 792);

/// Four files that each produce pages of a recognizable size.
fn batch() -> Vec<(InputFile, Vec<(i64, i64)>)> {
    vec![
        (file("two-pages.pdf", pdf_bytes(2, 201)), vec![(201, 400), (201, 400)]),
        (file("small.png", png_bytes(150, 160)), vec![(150, 160)]),
        (file("notes.txt", "some notes"), vec![LETTER]),
        (file("tall.png", png_bytes(170, 380)), vec![(170, 380)]),
    ]
}

#[rstest]
#[case(&[0, 1, 2, 3])]
#[case(&[3, 2, 1, 0])]
#[case(&[1, 3, 0, 2])]
#[case(&[2, 0, 3, 1])]
#[tokio::test]
async fn test_pages_follow_input_order(#[case] order: &[usize]) {
    let batch = batch();
    let files: Vec<InputFile> = order.iter().map(|&i| batch[i].0.clone()).collect();
    let expected: Vec<(i64, i64)> = order.iter().flat_map(|&i| batch[i].1.clone()).collect();

    let merger = Merger::new(MergeConfig::default()).unwrap();
    let output = merger.merge(files).await.unwrap();

    assert_eq!(page_sizes(&output.bytes), expected);
    let names: Vec<&str> = output.reports.iter().map(|r| r.name.as_str()).collect();
    let expected_names: Vec<&str> = order.iter().map(|&i| batch[i].0.name()).collect();
    assert_eq!(names, expected_names);
}

#[tokio::test]
async fn test_pdf_pages_keep_source_order() {
    let files = vec![
        file("a.pdf", pdf_bytes(3, 250)),
        file("b.pdf", pdf_bytes(2, 350)),
    ];
    let output = docfuse::merge::merge_files(files, QualityTier::Medium)
        .await
        .unwrap();

    let widths: Vec<i64> = page_sizes(&output).iter().map(|s| s.0).collect();
    assert_eq!(widths, vec![250, 250, 250, 350, 350]);
}

#[tokio::test]
async fn test_natural_ordering_before_merge() {
    let mut files = vec![
        file("scan10.png", png_bytes(110, 110)),
        file("scan2.png", png_bytes(120, 120)),
        file("scan1.png", png_bytes(130, 130)),
    ];
    sort_natural(&mut files);

    let merger = Merger::new(MergeConfig::default()).unwrap();
    let output = merger.merge(files).await.unwrap();
    assert_eq!(
        page_sizes(&output.bytes),
        vec![(130, 130), (120, 120), (110, 110)]
    );
}
