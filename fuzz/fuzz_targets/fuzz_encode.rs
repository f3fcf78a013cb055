#![no_main]

use arbitrary::Arbitrary;
use encoding_rs::SHIFT_JIS;
use libfuzzer_sys::fuzz_target;
use ncr_fallback::{FallbackEncoder, FallbackOptions};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    max_substitute_len: u8,
}

/// Expands `&#x<hex>;` references produced by the fallback.
fn expand_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("&#x") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 3..];
        let end = tail.find(';').expect("unterminated reference");
        let code = u32::from_str_radix(&tail[..end], 16).expect("bad hex digits");
        out.push(char::from_u32(code).expect("reference to a non-scalar"));
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

fuzz_target!(|input: Input| {
    // Any budget must encode without error; the marker is always encodable.
    let bounded = FallbackEncoder::new(FallbackOptions {
        max_substitute_len: usize::from(input.max_substitute_len),
        ..Default::default()
    });
    let bytes = bounded.encode(&input.text).expect("bounded encode failed");
    let (_, had_errors) = SHIFT_JIS.decode_without_bom_handling(&bytes);
    assert!(!had_errors, "output is not valid Shift_JIS");

    // With the default budget the output round-trips.
    if input.text.contains(['&', '\u{a5}', '\u{203e}', '\u{2212}']) {
        return;
    }
    let bytes = FallbackEncoder::shift_jis()
        .encode(&input.text)
        .expect("encode failed");
    let (decoded, _) = SHIFT_JIS.decode_without_bom_handling(&bytes);
    assert_eq!(expand_references(&decoded), input.text);
});
