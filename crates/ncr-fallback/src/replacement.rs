use crate::{
    error::FallbackError,
    fallback::{EncoderFallback, FallbackBuffer, Pending},
    options::ReplacementOptions,
};

/// Fallback policy replacing every unencodable unit with fixed text.
///
/// A surrogate pair is one unit and gets a single copy of the replacement.
/// An empty replacement makes the buffer decline every unit, so the engine
/// drops unencodable input silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplacementFallback {
    options: ReplacementOptions,
}

impl ReplacementFallback {
    /// Creates the policy from `options`.
    #[must_use]
    pub fn new(options: ReplacementOptions) -> Self {
        Self { options }
    }
}

impl EncoderFallback for ReplacementFallback {
    type Buffer = ReplacementFallbackBuffer;

    fn max_char_count(&self) -> usize {
        self.options.replacement.chars().count()
    }

    fn create_buffer(&self) -> ReplacementFallbackBuffer {
        ReplacementFallbackBuffer {
            pending: Pending::new(),
            replacement: self.options.replacement,
        }
    }
}

/// Buffer serving the replacement text of a [`ReplacementFallback`].
#[derive(Debug)]
pub struct ReplacementFallbackBuffer {
    pending: Pending,
    replacement: &'static str,
}

impl ReplacementFallbackBuffer {
    fn queue(&mut self, index: usize) -> Result<bool, FallbackError> {
        self.pending.ensure_drained(index)?;
        if self.replacement.is_empty() {
            tracing::debug!(index, "dropping unencodable character");
            return Ok(false);
        }
        tracing::debug!(
            index,
            replacement = self.replacement,
            "replacing unencodable character"
        );
        self.pending.fill(self.replacement);
        Ok(true)
    }
}

impl FallbackBuffer for ReplacementFallbackBuffer {
    fn fallback_single(&mut self, _unit: u16, index: usize) -> Result<bool, FallbackError> {
        self.queue(index)
    }

    fn fallback_pair(&mut self, _high: u16, _low: u16, index: usize) -> Result<bool, FallbackError> {
        self.queue(index)
    }

    fn remaining(&self) -> usize {
        self.pending.remaining()
    }

    fn next_char(&mut self) -> Option<char> {
        self.pending.next_char()
    }

    fn move_previous(&mut self) -> bool {
        self.pending.move_previous()
    }

    fn reset(&mut self) {
        self.pending.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::ReplacementFallback;
    use crate::{
        error::FallbackError,
        fallback::{EncoderFallback, FallbackBuffer},
        options::ReplacementOptions,
    };

    #[test]
    fn pair_gets_one_replacement() {
        let policy = ReplacementFallback::default();
        assert_eq!(policy.max_char_count(), 1);

        let mut buf = policy.create_buffer();
        assert_eq!(buf.fallback_pair(0xD83D, 0xDE00, 0), Ok(true));
        assert_eq!(buf.remaining(), 1);
        assert_eq!(buf.next_char(), Some('?'));
        assert_eq!(buf.next_char(), None);
    }

    #[test]
    fn empty_replacement_declines() {
        let policy = ReplacementFallback::new(ReplacementOptions { replacement: "" });
        let mut buf = policy.create_buffer();
        assert_eq!(buf.fallback_single(0xA9, 0), Ok(false));
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.next_char(), None);
    }

    #[test]
    fn rejects_fallback_while_pending() {
        let policy = ReplacementFallback::new(ReplacementOptions { replacement: "<?>" });
        let mut buf = policy.create_buffer();
        buf.fallback_single(0xA9, 0).unwrap();
        assert_eq!(buf.next_char(), Some('<'));
        assert_eq!(
            buf.fallback_single(0xA9, 1),
            Err(FallbackError::ProtocolViolation {
                index: 1,
                remaining: 2
            })
        );
    }
}
