#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let entries = staticlens::archive::list_entries_or_sentinel(data, "sentinel");
    if staticlens::archive::list_zip_entries(data).is_err() {
        assert_eq!(entries, vec!["sentinel".to_string()]);
    }
});
