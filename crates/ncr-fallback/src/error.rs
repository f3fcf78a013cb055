use thiserror::Error;

/// Errors raised by a [`FallbackBuffer`](crate::FallbackBuffer) when the
/// engine driving it breaks the buffer's calling contract.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackError {
    /// A new substitution was requested while characters of the previous one
    /// were still waiting to be pulled.
    #[error(
        "fallback requested for input at index {index} while {remaining} substitute character(s) are still pending"
    )]
    ProtocolViolation {
        /// Position of the rejected input unit in the source text.
        index: usize,
        /// Characters of the previous substitute that were never pulled.
        remaining: usize,
    },
}

/// Errors returned by [`FallbackEncoder`](crate::FallbackEncoder).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The fallback buffer rejected a substitution request.
    #[error("fallback error: {0}")]
    Fallback(#[from] FallbackError),
    /// The substitute text itself contains a character the target encoding
    /// cannot represent.
    #[error("substitute character {ch:?} for input at index {index} is not encodable in {encoding}")]
    UnencodableSubstitute {
        /// The offending substitute character.
        ch: char,
        /// Position of the input unit whose substitute failed.
        index: usize,
        /// Name of the target encoding.
        encoding: &'static str,
    },
}
