//! Encoding engine that plugs a [`EncoderFallback`] into `encoding_rs`.
//!
//! `encoding_rs` reports unmappable input instead of calling back into a
//! fallback, so [`FallbackEncoder`] runs the encoder without replacement and
//! services every [`EncoderResult::Unmappable`] itself: the unit is handed to
//! the fallback buffer and the buffer is drained character by character
//! through the same encoder.

use alloc::{borrow::Cow, string::String, vec, vec::Vec};

use encoding_rs::{Encoder, EncoderResult, Encoding, SHIFT_JIS};

use crate::{
    error::EncodeError,
    fallback::{EncoderFallback, FallbackBuffer},
    ncr::NcrFallback,
    options::FallbackOptions,
};

/// Large enough for any single character in any `encoding_rs` encoder,
/// including ISO-2022-JP escape sequences.
const CHAR_SCRATCH_LEN: usize = 16;

/// Encodes text into a legacy encoding, substituting unencodable characters
/// through a fallback policy.
///
/// The encoder is immutable; build it once and share it by reference. Every
/// call gets its own fallback buffer.
///
/// ```rust
/// use ncr_fallback::FallbackEncoder;
///
/// let encoder = FallbackEncoder::shift_jis();
/// let bytes = encoder.encode("\u{3251}\u{1f600}\u{29e3d}").unwrap();
/// assert_eq!(bytes, b"&#x3251;&#x1f600;&#x29e3d;");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FallbackEncoder<F = NcrFallback> {
    target: &'static Encoding,
    fallback: F,
}

impl FallbackEncoder<NcrFallback> {
    /// Creates an encoder substituting numeric character references.
    #[must_use]
    pub fn new(options: FallbackOptions) -> Self {
        Self {
            target: options.target_encoding,
            fallback: NcrFallback::new(options),
        }
    }

    /// Shift_JIS with numeric character references and default limits.
    #[must_use]
    pub fn shift_jis() -> Self {
        Self::new(FallbackOptions {
            target_encoding: SHIFT_JIS,
            ..Default::default()
        })
    }
}

impl<F: EncoderFallback> FallbackEncoder<F> {
    /// Creates an encoder for `target` using an arbitrary fallback policy.
    #[must_use]
    pub fn with_fallback(target: &'static Encoding, fallback: F) -> Self {
        Self { target, fallback }
    }

    /// The encoding that bytes are produced in.
    #[must_use]
    pub fn target(&self) -> &'static Encoding {
        self.target.output_encoding()
    }

    /// The fallback policy.
    #[must_use]
    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Encodes `text`, substituting every character the target cannot
    /// represent.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnencodableSubstitute`] if substitute text contains a
    ///   character the target cannot represent either.
    /// - [`EncodeError::Fallback`] if the fallback buffer rejects a request.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, EncodeError> {
        let src: Vec<u16> = text.encode_utf16().collect();
        let mut encoder = self.target.new_encoder();
        let mut buffer = self.fallback.create_buffer();
        let capacity = encoder
            .max_buffer_length_from_utf16_without_replacement(src.len())
            .unwrap_or(src.len());
        let mut sink = ByteSink::with_capacity(capacity);

        tracing::debug!(
            encoding = self.target().name(),
            units = src.len(),
            "encoding with fallback"
        );

        let mut read_total = 0;
        loop {
            let (result, read, written) = encoder.encode_from_utf16_without_replacement(
                &src[read_total..],
                sink.spare(),
                false,
            );
            read_total += read;
            sink.advance(written);
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => sink.grow(),
                EncoderResult::Unmappable(ch) => {
                    let index = read_total - ch.len_utf16();
                    let queued = match &src[index..read_total] {
                        &[high, low] => buffer.fallback_pair(high, low, index)?,
                        &[unit] => buffer.fallback_single(unit, index)?,
                        _ => unreachable!("a char is one or two UTF-16 units"),
                    };
                    if queued {
                        self.drain(&mut encoder, &mut buffer, &mut sink, index)?;
                    }
                }
            }
        }

        // Flush any trailing state, e.g. the ISO-2022-JP return to ASCII.
        loop {
            let (result, _, written) =
                encoder.encode_from_utf16_without_replacement(&[], sink.spare(), true);
            sink.advance(written);
            match result {
                EncoderResult::OutputFull => sink.grow(),
                _ => break,
            }
        }

        Ok(sink.into_vec())
    }

    /// Replaces every character the target cannot represent with its
    /// substitute text, leaving the rest untouched.
    ///
    /// The result can be handed to any standard encoder for the target.
    /// Nothing is allocated when every character is encodable.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode).
    pub fn escape<'a>(&self, text: &'a str) -> Result<Cow<'a, str>, EncodeError> {
        let mut encoder = self.target.new_encoder();
        let mut buffer = self.fallback.create_buffer();
        let mut escaped: Option<String> = None;
        let mut index = 0;

        for (pos, ch) in text.char_indices() {
            if self.is_encodable(&mut encoder, ch) {
                if let Some(out) = escaped.as_mut() {
                    out.push(ch);
                }
            } else {
                let out = escaped.get_or_insert_with(|| {
                    let capacity = text.len() + self.fallback.max_char_count();
                    let mut out = String::with_capacity(capacity);
                    out.push_str(&text[..pos]);
                    out
                });
                let mut units = [0u16; 2];
                let queued = match ch.encode_utf16(&mut units) {
                    &mut [high, low] => buffer.fallback_pair(high, low, index)?,
                    &mut [unit] => buffer.fallback_single(unit, index)?,
                    _ => unreachable!("a char is one or two UTF-16 units"),
                };
                if queued {
                    while let Some(sub) = buffer.next_char() {
                        if !self.is_encodable(&mut encoder, sub) {
                            return Err(self.unencodable_substitute(sub, index));
                        }
                        out.push(sub);
                    }
                }
            }
            index += ch.len_utf16();
        }

        Ok(escaped.map_or(Cow::Borrowed(text), Cow::Owned))
    }

    /// Pulls the queued substitute for the unit at `index` into `sink`.
    fn drain(
        &self,
        encoder: &mut Encoder,
        buffer: &mut F::Buffer,
        sink: &mut ByteSink,
        index: usize,
    ) -> Result<(), EncodeError> {
        let mut units = [0u16; 2];
        while let Some(ch) = buffer.next_char() {
            let (result, _, written) = encoder.encode_from_utf16_without_replacement(
                ch.encode_utf16(&mut units),
                sink.spare(),
                false,
            );
            sink.advance(written);
            match result {
                EncoderResult::InputEmpty => {}
                EncoderResult::OutputFull => {
                    // Hand the character back and retry it with more room.
                    buffer.move_previous();
                    sink.grow();
                }
                EncoderResult::Unmappable(sub) => {
                    buffer.reset();
                    return Err(self.unencodable_substitute(sub, index));
                }
            }
        }
        Ok(())
    }

    fn is_encodable(&self, encoder: &mut Encoder, ch: char) -> bool {
        let mut units = [0u16; 2];
        let mut scratch = [0u8; CHAR_SCRATCH_LEN];
        let (result, _, _) = encoder.encode_from_utf16_without_replacement(
            ch.encode_utf16(&mut units),
            &mut scratch,
            false,
        );
        !matches!(result, EncoderResult::Unmappable(_))
    }

    fn unencodable_substitute(&self, ch: char, index: usize) -> EncodeError {
        tracing::warn!(?ch, index, "substitute text is not encodable");
        EncodeError::UnencodableSubstitute {
            ch,
            index,
            encoding: self.target().name(),
        }
    }
}

/// Growable output with a zeroed spare region for the encoder to write into.
struct ByteSink {
    bytes: Vec<u8>,
    len: usize,
}

impl ByteSink {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity],
            len: 0,
        }
    }

    #[inline]
    fn spare(&mut self) -> &mut [u8] {
        &mut self.bytes[self.len..]
    }

    #[inline]
    fn advance(&mut self, written: usize) {
        self.len += written;
    }

    fn grow(&mut self) {
        let new_len = (self.bytes.len() * 2).max(CHAR_SCRATCH_LEN);
        self.bytes.resize(new_len, 0);
    }

    fn into_vec(mut self) -> Vec<u8> {
        self.bytes.truncate(self.len);
        self.bytes
    }
}
