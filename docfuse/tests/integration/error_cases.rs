//! Batch-level failures.

use docfuse::{DocFuseError, MergeConfig, Merger};

use crate::common::{encrypted_pdf_bytes, file, page_text, pdf_bytes, pdf_text_bytes};

fn merger() -> Merger {
    Merger::new(MergeConfig::default()).unwrap()
}

#[tokio::test]
async fn test_empty_batch() {
    let err = merger().merge(Vec::new()).await.unwrap_err();
    assert!(matches!(err, DocFuseError::EmptyBatch));
}

#[tokio::test]
async fn test_only_unrecognized_files() {
    let err = merger()
        .merge(vec![file("setup.exe", "MZ"), file("README", "hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, DocFuseError::EmptyBatch));
}

#[tokio::test]
async fn test_encrypted_pdf_aborts_batch() {
    let files = vec![
        file("before.txt", "rendered first"),
        file("locked.pdf", encrypted_pdf_bytes()),
        file("after.txt", "never rendered"),
    ];
    let err = merger().merge(files).await.unwrap_err();

    assert!(matches!(err, DocFuseError::EncryptedPdf { ref name } if name == "locked.pdf"));
    assert!(err.is_encryption());
    assert!(err.to_string().contains(docfuse::ENCRYPTED_PDF_HINT));
}

#[tokio::test]
async fn test_unreadable_pdf_aborts_batch() {
    let files = vec![file("a.txt", "ok"), file("broken.pdf", b"%PDF-1.4\n%garbage".to_vec())];
    let err = merger().merge(files).await.unwrap_err();

    assert!(matches!(err, DocFuseError::SourceDocument { .. }));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_encrypted_pdf_after_valid_pdf_aborts_batch() {
    let files = vec![
        file("open.pdf", pdf_bytes(1, 300)),
        file("locked.pdf", encrypted_pdf_bytes()),
    ];
    let err = merger().merge(files).await.unwrap_err();
    assert!(err.is_encryption());
}

#[tokio::test]
async fn test_pdf_text_mentioning_encrypt_is_merged() {
    let notes = pdf_text_bytes("Set the /Encrypt entry in the trailer");
    let files = vec![file("pdf-notes.pdf", notes), file("a.txt", "after")];
    let output = merger().merge(files).await.unwrap();

    assert_eq!(output.statistics.total_pages, 2);
    let text = page_text(&output.bytes);
    assert_eq!(text[0], vec!["Set the /Encrypt entry in the trailer"]);
}

#[tokio::test]
async fn test_encryption_words_in_name_are_not_encryption() {
    let err = merger()
        .merge(vec![file("passwords.pdf", b"not a pdf".to_vec())])
        .await
        .unwrap_err();

    assert!(matches!(err, DocFuseError::SourceDocument { .. }));
    assert!(!err.is_encryption());
}
