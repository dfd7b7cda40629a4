//! Loading sources from disk and running analyses asynchronously.

use crate::common::test_utils::{create_temp_file, pseudo_random_bytes};
use staticlens::analysis::{CancellationToken, NoProgress, Stage};
use staticlens::io::IOLimits;
use staticlens::runtime::{analyze_async, with_deadline};
use staticlens::{analyze_path, AnalysisConfig, AnalysisError, AnalysisInput, Analyzer};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn empty_file_on_disk() {
    let file = create_temp_file(".bin", b"");
    let report = analyze_path(file.path(), &mut NoProgress).unwrap();

    assert_eq!(report.file_info.size, 0);
    assert_eq!(report.entropy, 0.0);
    assert!(report.strings.is_empty());
    assert!(report.archive_contents.is_none());
}

#[test]
fn file_name_drives_script_capture() {
    let file = create_temp_file(".vbs", b"CreateObject(\"WScript.Shell\").Run \"cmd.exe\"");
    let report = analyze_path(file.path(), &mut NoProgress).unwrap();

    let name = file.path().file_name().unwrap().to_string_lossy();
    assert_eq!(report.file_info.name, name);
    assert!(report.file_info.name.ends_with(".vbs"));
    assert_eq!(
        report.text_content.as_deref(),
        Some("CreateObject(\"WScript.Shell\").Run \"cmd.exe\"")
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = analyze_path(dir.path().join("absent.bin"), &mut NoProgress).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}

#[test]
fn oversized_file_is_rejected() {
    let file = create_temp_file(".bin", &[0x41; 128]);
    let err = AnalysisInput::from_path(file.path(), &IOLimits { max_file_size: 64 }).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::FileTooLarge {
            limit: 64,
            found: 128
        }
    ));
}

#[test]
fn analyzer_limits_apply_to_paths() {
    let mut cfg = AnalysisConfig::default();
    cfg.io.max_file_size = 8;
    let analyzer = Analyzer::new(cfg).unwrap();
    let file = create_temp_file(".bin", b"0123456789");

    let err = analyzer.analyze_path(file.path(), &mut NoProgress).unwrap_err();
    assert!(matches!(err, AnalysisError::FileTooLarge { .. }));
}

#[test]
fn mapped_and_owned_inputs_agree() {
    let data = pseudo_random_bytes(4096, 99);
    let file = create_temp_file(".bin", &data);
    let analyzer = Analyzer::with_defaults().unwrap();

    let from_disk = analyzer.analyze_path(file.path(), &mut NoProgress).unwrap();
    let in_memory = analyzer
        .analyze(&AnalysisInput::from_bytes("x.bin", data), &mut NoProgress)
        .unwrap();

    assert_eq!(from_disk.hashes, in_memory.hashes);
    assert_eq!(from_disk.entropy, in_memory.entropy);
    assert_eq!(from_disk.strings, in_memory.strings);
}

#[tokio::test]
async fn async_analyses_run_concurrently() {
    let analyzer = Arc::new(Analyzer::with_defaults().unwrap());
    let mut handles = Vec::new();
    for seed in 1..=4u64 {
        let analyzer = Arc::clone(&analyzer);
        let input = AnalysisInput::from_bytes(
            format!("job{seed}.bin"),
            pseudo_random_bytes(2048, seed),
        );
        handles.push(tokio::spawn(analyze_async(
            analyzer,
            input,
            NoProgress,
            CancellationToken::new(),
        )));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.file_info.name, format!("job{}.bin", i + 1));
    }
}

#[tokio::test]
async fn async_analysis_honours_cancellation() {
    let analyzer = Arc::new(Analyzer::with_defaults().unwrap());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let input = AnalysisInput::from_bytes("c.bin", b"eval eval".to_vec());

    let err = analyze_async(analyzer, input, NoProgress, cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancellation());
    assert!(matches!(err, AnalysisError::Cancelled { stage: Stage::Hashing }));
}

#[tokio::test]
async fn deadline_passes_through_fast_analysis() {
    let analyzer = Arc::new(Analyzer::with_defaults().unwrap());
    let cancel = CancellationToken::new();
    let input = AnalysisInput::from_bytes("f.bin", b"quick".to_vec());

    let report = with_deadline(
        Duration::from_secs(30),
        &cancel,
        analyze_async(analyzer, input, NoProgress, cancel.clone()),
    )
    .await
    .unwrap();
    assert_eq!(report.file_info.name, "f.bin");
    assert!(!cancel.is_cancelled());
}
