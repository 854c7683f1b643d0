//! Integration test verifying the upload-and-analysis flow end-to-end

use docrisk_core::{
    AnalysisStore, DocumentStore, FileType, MemoryStore, RiskAnalyzer, TextExtractor,
};
use uuid::Uuid;

#[tokio::test]
async fn test_upload_analysis_flow() {
    let store = MemoryStore::new();
    let extractor = TextExtractor::new();
    let analyzer = RiskAnalyzer::new();

    // Upload
    let content = b"The vendor settled a bribery case. Separate litigation is still pending.";
    let document = store.store_document(content, "due-diligence.txt").await.unwrap();
    assert_eq!(document.file_type, FileType::Text);

    // Analyze
    let bytes = store.get_content(document.id).await.unwrap().unwrap();
    let text = extractor.extract(&bytes, &document.file_type);
    let result = analyzer.analyze(document.id, &text).unwrap();

    assert_eq!(result.file_id, document.id);
    assert!(result.risk_score.is_finite());
    // bribery (15) + litigation (10)
    assert!((result.risk_score - 0.25).abs() < f32::EPSILON);
    assert_eq!(result.details.flagged_terms, vec!["bribery", "litigation"]);
    assert!(result.summary.contains("bribery case"));

    // Store and fetch the result back
    store.store_analysis(&result).await.unwrap();
    let fetched = store.get_analysis(document.id).await.unwrap().unwrap();
    assert_eq!(fetched.file_id, document.id);
    assert_eq!(fetched.details.flagged_terms, result.details.flagged_terms);
}

#[tokio::test]
async fn test_analysis_for_unknown_document() {
    let store = MemoryStore::new();

    let missing = Uuid::new_v4();
    assert!(store.get_document(missing).await.unwrap().is_none());
    assert!(store.get_analysis(missing).await.unwrap().is_none());
}

#[tokio::test]
async fn test_repeated_uploads_are_distinct() {
    let store = MemoryStore::new();

    let first = store.store_document(b"identical", "one.txt").await.unwrap();
    let second = store.store_document(b"identical", "two.txt").await.unwrap();

    assert_ne!(first.id, second.id);

    let listed = store.list_documents().await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_pdf_upload_degrades_to_preview_scan() {
    let store = MemoryStore::new();
    let extractor = TextExtractor::new();
    let analyzer = RiskAnalyzer::new();

    // A PDF wrapper whose visible header mentions a risk term
    let content = b"%PDF-1.4 fraud disclosure attachment";
    let document = store.store_document(content, "report.pdf").await.unwrap();
    assert_eq!(document.file_type, FileType::Pdf);

    let bytes = store.get_content(document.id).await.unwrap().unwrap();
    let text = extractor.extract(&bytes, &document.file_type);
    let result = analyzer.analyze(document.id, &text).unwrap();

    // The preview fallback still surfaces the term
    assert_eq!(result.details.flagged_terms, vec!["fraud"]);
}

#[tokio::test]
async fn test_local_file_analysis_with_fixture() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Regulators flagged potential money laundering activity.").unwrap();

    let data = std::fs::read(&path).unwrap();
    let file_type = FileType::sniff(&data, "notes.txt");
    let text = TextExtractor::new().extract(&data, &file_type);
    let result = RiskAnalyzer::new().analyze(Uuid::new_v4(), &text).unwrap();

    assert_eq!(result.details.flagged_terms, vec!["money laundering"]);
    assert!((result.risk_score - 0.30).abs() < f32::EPSILON);
}
