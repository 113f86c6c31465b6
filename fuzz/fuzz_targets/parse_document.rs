#![no_main]
use libfuzzer_sys::fuzz_target;

use honest_sss::parse_document;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = core::str::from_utf8(data) {
        let _document = parse_document(json);
    }
});
