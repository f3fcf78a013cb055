use encoding_rs::{Encoding, SHIFT_JIS};

/// Length of the longest numeric character reference, `&#x10ffff;`.
pub const MAX_SUBSTITUTE_LENGTH: usize = 10;

/// Placeholder emitted when a reference would not fit the length budget.
pub const DEFAULT_GIVEUP_MARKER: &str = "\u{2605}";

/// Configuration for the numeric-character-reference fallback and the
/// encoder that drives it.
///
/// Construct one value up front and hand it to
/// [`FallbackEncoder::new`](crate::FallbackEncoder::new); the encoder keeps it
/// for every subsequent `encode` call.
///
/// # Examples
///
/// ```rust
/// use ncr_fallback::{FallbackEncoder, FallbackOptions};
///
/// let encoder = FallbackEncoder::new(FallbackOptions {
///     giveup_marker: "?",
///     ..Default::default()
/// });
/// assert_eq!(encoder.encode("\u{a9}").unwrap(), b"&#xa9;");
/// ```
///
/// # Default
///
/// Shift_JIS, a budget of [`MAX_SUBSTITUTE_LENGTH`] characters and
/// [`DEFAULT_GIVEUP_MARKER`].
#[derive(Debug, Clone, Copy)]
pub struct FallbackOptions {
    /// The legacy character set the text is encoded into.
    ///
    /// Encodings whose output encoding differs from themselves (UTF-16LE,
    /// UTF-16BE, replacement) encode to that output encoding instead, as
    /// `encoding_rs` does.
    ///
    /// # Default
    ///
    /// `SHIFT_JIS`
    pub target_encoding: &'static Encoding,

    /// Upper bound, in characters, on a formatted reference.
    ///
    /// A reference longer than this is replaced with `giveup_marker`. The
    /// default admits every Unicode scalar value; lower values are useful when
    /// the consumer cannot store long escapes.
    ///
    /// # Default
    ///
    /// `10`
    pub max_substitute_len: usize,

    /// Text emitted in place of a reference that exceeds `max_substitute_len`.
    ///
    /// Every character of the marker must itself be encodable in
    /// `target_encoding`, otherwise encoding fails with
    /// [`EncodeError::UnencodableSubstitute`](crate::EncodeError::UnencodableSubstitute).
    ///
    /// An empty marker makes the buffer decline over-long references, so the
    /// engine drops that input unit without output.
    ///
    /// # Default
    ///
    /// `"★"` (U+2605)
    pub giveup_marker: &'static str,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            target_encoding: SHIFT_JIS,
            max_substitute_len: MAX_SUBSTITUTE_LENGTH,
            giveup_marker: DEFAULT_GIVEUP_MARKER,
        }
    }
}

/// Configuration for [`ReplacementFallback`](crate::ReplacementFallback).
///
/// # Default
///
/// A replacement of `"?"`.
#[derive(Debug, Clone, Copy)]
pub struct ReplacementOptions {
    /// Text emitted for every unencodable input unit.
    ///
    /// An empty replacement drops unencodable input without output.
    ///
    /// # Default
    ///
    /// `"?"`
    pub replacement: &'static str,
}

impl Default for ReplacementOptions {
    fn default() -> Self {
        Self { replacement: "?" }
    }
}
