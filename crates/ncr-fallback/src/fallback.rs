use crate::error::FallbackError;

/// Policy an encoding engine consults when it meets input the target
/// encoding cannot represent.
///
/// The policy itself is immutable. Each encoding pass asks it for a fresh
/// [`FallbackBuffer`] and drives that buffer until the pass ends.
pub trait EncoderFallback {
    /// Buffer handed out for each encoding pass.
    type Buffer: FallbackBuffer;

    /// Longest substitute, in characters, any buffer of this policy produces.
    fn max_char_count(&self) -> usize;

    /// Creates a buffer in its idle state.
    fn create_buffer(&self) -> Self::Buffer;
}

/// Pull-based holder of the substitute text for one unencodable input unit.
///
/// An engine calls [`fallback_single`](Self::fallback_single) or
/// [`fallback_pair`](Self::fallback_pair), then pulls characters with
/// [`next_char`](Self::next_char) until it returns `None`, stepping back with
/// [`move_previous`](Self::move_previous) when it has to retry a character.
///
/// A substitution is accepted only once the previous one has been fully
/// pulled; anything else is a bug in the engine and yields
/// [`FallbackError::ProtocolViolation`].
pub trait FallbackBuffer {
    /// Queues the substitute for a single UTF-16 code unit found at `index`.
    ///
    /// `Ok(true)` means substitute text is queued. `Ok(false)` asks the
    /// engine to drop the input unit without output.
    ///
    /// # Errors
    ///
    /// [`FallbackError::ProtocolViolation`] if characters are still pending.
    fn fallback_single(&mut self, unit: u16, index: usize) -> Result<bool, FallbackError>;

    /// Queues the substitute for a surrogate pair found at `index`.
    ///
    /// The caller is responsible for passing a high and a low surrogate.
    ///
    /// # Errors
    ///
    /// [`FallbackError::ProtocolViolation`] if characters are still pending.
    fn fallback_pair(&mut self, high: u16, low: u16, index: usize) -> Result<bool, FallbackError>;

    /// Number of queued characters not yet pulled.
    fn remaining(&self) -> usize;

    /// Pulls the next substitute character, or `None` once drained.
    fn next_char(&mut self) -> Option<char>;

    /// Gives the last pulled character back. Returns `false` when nothing has
    /// been pulled since the last substitution.
    fn move_previous(&mut self) -> bool;

    /// Discards any queued text.
    fn reset(&mut self);
}

/// Combines a surrogate pair into the scalar value it encodes.
///
/// Out-of-range inputs are not validated or normalized; the arithmetic wraps
/// and typically yields a scalar far above U+10FFFF.
#[inline]
pub(crate) fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x10000u32
        .wrapping_add(u32::from(high).wrapping_sub(0xD800).wrapping_mul(0x400))
        .wrapping_add(u32::from(low).wrapping_sub(0xDC00))
}

/// Cursor over a queued substitute, shared by the buffers in this crate.
///
/// Keeps `0 <= cursor <= text.len()`.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    text: alloc::vec::Vec<char>,
    cursor: usize,
}

impl Pending {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fails unless every queued character has been pulled.
    pub(crate) fn ensure_drained(&self, index: usize) -> Result<(), FallbackError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(FallbackError::ProtocolViolation { index, remaining }),
        }
    }

    pub(crate) fn fill(&mut self, text: &str) {
        self.text.clear();
        self.text.extend(text.chars());
        self.cursor = 0;
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.text.len() - self.cursor
    }

    #[inline]
    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.text.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(ch)
    }

    #[inline]
    pub(crate) fn move_previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}
