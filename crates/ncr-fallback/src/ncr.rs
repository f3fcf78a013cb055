//! Numeric character reference fallback.
//!
//! [`NcrFallback`] replaces every unencodable code point with a hexadecimal
//! numeric character reference: `&#x`, the code point in lowercase hex without
//! leading zeros, and `;`. U+00A9 becomes `&#xa9;` and U+29E3D becomes
//! `&#x29e3d;`. The references survive any ASCII-compatible legacy encoding and
//! can be expanded back by an HTML or XML consumer.
//!
//! A reference longer than the configured budget (ten characters by default,
//! enough for `&#x10ffff;`) is replaced by the giveup marker. With the default
//! budget this only happens for the meaningless scalars produced by a
//! malformed surrogate pair.
//!
//! # Errors
//!
//! Requesting a substitution while the previous one is still being pulled
//! returns [`FallbackError::ProtocolViolation`] and leaves the pending text
//! untouched.

use alloc::format;

use crate::{
    error::FallbackError,
    fallback::{EncoderFallback, FallbackBuffer, Pending, combine_surrogates},
    options::FallbackOptions,
};

/// Fallback policy producing numeric character references.
#[derive(Debug, Clone, Copy, Default)]
pub struct NcrFallback {
    options: FallbackOptions,
}

impl NcrFallback {
    /// Creates the policy from `options`.
    #[must_use]
    pub fn new(options: FallbackOptions) -> Self {
        Self { options }
    }

    /// The options this policy was built with.
    #[must_use]
    pub fn options(&self) -> &FallbackOptions {
        &self.options
    }
}

impl EncoderFallback for NcrFallback {
    type Buffer = NcrFallbackBuffer;

    fn max_char_count(&self) -> usize {
        self.options
            .max_substitute_len
            .max(self.options.giveup_marker.chars().count())
    }

    fn create_buffer(&self) -> NcrFallbackBuffer {
        NcrFallbackBuffer::new(self.options.max_substitute_len, self.options.giveup_marker)
    }
}

/// Buffer serving one numeric character reference at a time.
#[derive(Debug)]
pub struct NcrFallbackBuffer {
    pending: Pending,
    max_len: usize,
    giveup_marker: &'static str,
}

impl NcrFallbackBuffer {
    fn new(max_len: usize, giveup_marker: &'static str) -> Self {
        Self {
            pending: Pending::new(),
            max_len,
            giveup_marker,
        }
    }

    fn queue_reference(&mut self, code: u32, index: usize) -> Result<bool, FallbackError> {
        self.pending.ensure_drained(index)?;

        let reference = format!("&#x{code:x};");
        if reference.len() > self.max_len {
            tracing::warn!(
                code,
                index,
                limit = self.max_len,
                "character reference exceeds limit, using giveup marker"
            );
            if self.giveup_marker.is_empty() {
                return Ok(false);
            }
            self.pending.fill(self.giveup_marker);
        } else {
            tracing::debug!(code, index, %reference, "substituting unencodable character");
            self.pending.fill(&reference);
        }
        Ok(true)
    }
}

impl FallbackBuffer for NcrFallbackBuffer {
    fn fallback_single(&mut self, unit: u16, index: usize) -> Result<bool, FallbackError> {
        self.queue_reference(u32::from(unit), index)
    }

    fn fallback_pair(&mut self, high: u16, low: u16, index: usize) -> Result<bool, FallbackError> {
        self.queue_reference(combine_surrogates(high, low), index)
    }

    fn remaining(&self) -> usize {
        self.pending.remaining()
    }

    fn next_char(&mut self) -> Option<char> {
        self.pending.next_char()
    }

    fn move_previous(&mut self) -> bool {
        let moved = self.pending.move_previous();
        tracing::trace!(moved, "fallback buffer stepped back");
        moved
    }

    fn reset(&mut self) {
        self.pending.reset();
    }
}
