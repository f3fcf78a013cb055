use alloc::{string::String, vec::Vec};

use encoding_rs::SHIFT_JIS;
use quickcheck::{QuickCheck, TestResult};

use crate::FallbackEncoder;

/// Expands `&#x<hex>;` references; any other text is copied as is.
fn expand_references(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("&#x") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 3..];
        let end = tail.find(';')?;
        let code = u32::from_str_radix(&tail[..end], 16).ok()?;
        out.push(char::from_u32(code)?);
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Some(out)
}

/// Code points the WHATWG Shift_JIS encoder maps onto bytes that decode to a
/// different code point.
const NON_ROUND_TRIP: [char; 3] = ['\u{a5}', '\u{203e}', '\u{2212}'];

/// Property: decoding the Shift_JIS output and expanding the references gives
/// back the input, for any input that does not itself contain `&`.
#[test]
fn shift_jis_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> TestResult {
        if text.contains('&') || text.contains(NON_ROUND_TRIP) {
            return TestResult::discard();
        }

        let encoder = FallbackEncoder::shift_jis();
        let bytes = encoder.encode(&text).unwrap();
        let (decoded, had_errors) = SHIFT_JIS.decode_without_bom_handling(&bytes);
        if had_errors {
            return TestResult::failed();
        }
        TestResult::from_bool(expand_references(&decoded).as_deref() == Some(text.as_str()))
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(String) -> TestResult);
}

/// Property: `escape` followed by a plain Shift_JIS encode produces the same
/// bytes as encoding with the fallback directly.
#[test]
fn escape_matches_encode_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(chars: Vec<char>) -> bool {
        let text: String = chars.into_iter().collect();
        let encoder = FallbackEncoder::shift_jis();
        let escaped = encoder.escape(&text).unwrap();
        let (plain, _, had_errors) = SHIFT_JIS.encode(&escaped);
        !had_errors && plain.into_owned() == encoder.encode(&text).unwrap()
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<char>) -> bool);
}

#[test]
fn expand_references_handles_adjacent_escapes() {
    assert_eq!(
        expand_references("a&#xa9;&#x1f600;b").as_deref(),
        Some("a\u{a9}\u{1f600}b")
    );
    assert_eq!(expand_references("&#xzz;"), None);
}
