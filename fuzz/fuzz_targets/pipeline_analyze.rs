#![no_main]
use libfuzzer_sys::fuzz_target;
use staticlens::analysis::NoProgress;

fuzz_target!(|data: &[u8]| {
    // Script name plus ZIP MIME type runs every optional stage
    if let Ok(report) = staticlens::analyze_bytes("fuzz.js", "application/zip", data.to_vec(), &mut NoProgress) {
        assert!((0.0..=8.0).contains(&report.entropy));
        assert_eq!(report.hashes.sha256.len(), 64);
    }
});
