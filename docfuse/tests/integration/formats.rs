//! Every document format ends up as text pages with the file name on top.

use docfuse::{FileCategory, MergeConfig, Merger};

use crate::common::{docx_bytes, file, page_text, pptx_bytes};

async fn merge_one(name: &str, bytes: Vec<u8>) -> Vec<Vec<String>> {
    let merger = Merger::new(MergeConfig::default()).unwrap();
    let output = merger.merge(vec![file(name, bytes)]).await.unwrap();
    page_text(&output.bytes)
}

#[tokio::test]
async fn test_docx() {
    let pages = merge_one("letter.docx", docx_bytes(&["Dear reader,", "Thanks."])).await;
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0], vec!["letter.docx", "Dear reader,", "Thanks."]);
}

#[tokio::test]
async fn test_csv_table() {
    let pages = merge_one("prices.csv", b"item,price\ntea,3\n".to_vec()).await;
    assert_eq!(
        pages[0],
        vec![
            "prices.csv",
            "=== Sheet: Sheet1 ===",
            "item | price",
            "-----+------",
            "tea  | 3    ",
        ]
    );
}

#[tokio::test]
async fn test_markdown() {
    let pages = merge_one("readme.md", b"# Title\n\n* first\n* second\n".to_vec()).await;
    let lines = &pages[0];
    assert_eq!(lines[0], "readme.md");
    assert!(lines.contains(&"Title".to_string()));
    // bullet survives as WinAnsi 0x95
    assert!(lines.contains(&"\u{95} first".to_string()));
}

#[tokio::test]
async fn test_html() {
    let html = b"<html><script>var x = 1;</script><body><p>Hello &amp; welcome</p></body></html>";
    let pages = merge_one("page.html", html.to_vec()).await;
    assert_eq!(pages[0], vec!["page.html", "Hello & welcome"]);
}

#[tokio::test]
async fn test_pptx() {
    let pages = merge_one("deck.pptx", pptx_bytes(&["Welcome", "Agenda"])).await;
    assert_eq!(
        pages[0],
        vec!["deck.pptx", "--- Slide 1 ---", "Welcome", "--- Slide 2 ---", "Agenda"]
    );
}

#[tokio::test]
async fn test_plain_text_title_can_be_disabled() {
    let config = MergeConfig::default().with_title_plain_text(false);
    let merger = Merger::new(config).unwrap();
    let output = merger
        .merge(vec![file("raw.log", "just the log")])
        .await
        .unwrap();

    assert_eq!(page_text(&output.bytes)[0], vec!["just the log"]);
    assert_eq!(output.reports[0].category, FileCategory::Text);
}
