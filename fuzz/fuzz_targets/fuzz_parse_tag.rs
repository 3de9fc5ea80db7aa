#![no_main]

use libfuzzer_sys::fuzz_target;

use bbcode_tag_parser::{parse_tag, ParserOptions};

// parse_tag's only precondition is that the opening bracket sits at
// `offset`; everything after it is exactly what's under test here, so the
// fuzzer's bytes become the tail of a `[...` string rather than the whole
// input.
fuzz_target!(|data: &[u8]| {
    if let Ok(rest) = std::str::from_utf8(data) {
        let text = format!("[{rest}");
        let _ = parse_tag(&text, 0, &ParserOptions::default());
    }
});
