//! Reference scenarios over in-memory buffers.

use crate::common::test_utils::pseudo_random_bytes;
use staticlens::analysis::{NoProgress, ProgressEvent, Stage};
use staticlens::{analyze_bytes, AnalysisError};

#[test]
fn empty_input_yields_zeroed_report() {
    let report = analyze_bytes("empty.bin", "", b"", &mut NoProgress).unwrap();

    assert_eq!(report.file_info.size, 0);
    assert_eq!(
        report.hashes.sha256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(report.entropy, 0.0);
    assert!(report.strings.is_empty());
    assert!(report.suspicious_keywords.is_empty());
    assert!(report.extracted_urls.is_empty());
    assert!(report.text_content.is_none());
    assert!(report.archive_contents.is_none());

    let json = report.to_json_string().unwrap();
    assert!(!json.contains("archiveContents"));
    assert!(!json.contains("textContent"));
}

#[test]
fn repeated_payload_counts_keywords_and_dedups_url() {
    let line = b"hello eval( http://evil.test/x ) world\x00";
    let data: Vec<u8> = line.iter().copied().cycle().take(line.len() * 5).collect();

    let report = analyze_bytes("payload.bin", "application/octet-stream", data, &mut NoProgress)
        .unwrap();

    assert_eq!(report.strings.len(), 5);
    assert!(report
        .strings
        .iter()
        .all(|s| s == "hello eval( http://evil.test/x ) world"));

    let eval = report
        .suspicious_keywords
        .iter()
        .find(|h| h.keyword == "eval")
        .expect("eval counted");
    assert_eq!(eval.count, 5);
    let http = report
        .suspicious_keywords
        .iter()
        .find(|h| h.keyword == "http://")
        .expect("http:// counted");
    assert_eq!(http.count, 5);

    assert_eq!(report.extracted_urls, vec!["http://evil.test/x".to_string()]);
}

#[test]
fn random_bytes_are_high_entropy() {
    let data = pseudo_random_bytes(10_000, 0x5eed);
    let report = analyze_bytes("noise.bin", "", data, &mut NoProgress).unwrap();

    assert!(report.entropy > 7.5, "entropy was {}", report.entropy);
    assert!(report.entropy <= 8.0);
    assert!(report.is_high_entropy(7.5));
}

#[test]
fn declared_zip_with_garbage_degrades_to_sentinel() {
    let mut events: Vec<ProgressEvent> = Vec::new();
    let report = analyze_bytes(
        "broken.zip",
        "application/zip",
        b"PK\x03\x04 definitely not a zip",
        &mut events,
    )
    .unwrap();

    assert_eq!(
        report.archive_contents,
        Some(vec!["Error reading archive contents.".to_string()])
    );
    assert_eq!(report.hashes.sha256.len(), 64);
    assert!(report.entropy > 0.0);
    assert!(!report.strings.is_empty());
    assert!(events.iter().any(|e| e.stage == Stage::ArchiveListing));
}

#[test]
fn script_text_is_captured_for_script_names() {
    let body = b"powershell -enc AAAA\r\nInvoke-Expression $x\r\n";
    let report = analyze_bytes("dropper.PS1", "", body, &mut NoProgress).unwrap();

    assert_eq!(
        report.text_content.as_deref(),
        Some("powershell -enc AAAA\r\nInvoke-Expression $x\r\n")
    );
    let keywords: Vec<&str> = report
        .suspicious_keywords
        .iter()
        .map(|h| h.keyword.as_str())
        .collect();
    assert!(keywords.contains(&"PowerShell"));
    assert!(keywords.contains(&"Invoke-"));
}

#[test]
fn progress_labels_are_human_readable() {
    let mut events: Vec<ProgressEvent> = Vec::new();
    analyze_bytes("a.js", "application/zip", b"var x = 1;", &mut events).unwrap();

    let labels: Vec<&str> = events.iter().map(|e| e.label).collect();
    assert_eq!(labels[0], "Calculating hashes...");
    assert_eq!(labels[1], "Calculating entropy...");
    assert!(labels.contains(&"Reading script content..."));
    assert!(labels.contains(&"Analyzing archive contents..."));
    assert!(labels.iter().all(|l| l.ends_with("...")));
}

#[test]
fn error_type_is_reexported() {
    let err = AnalysisError::Timeout { millis: 5 };
    assert!(err.to_string().contains('5'));
}
