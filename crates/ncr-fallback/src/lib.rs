//! Encoder fallback that keeps unencodable characters as numeric character
//! references when converting text into Shift_JIS and other legacy encodings.
//!
//! The heart of the crate is [`NcrFallbackBuffer`], a small pull-based state
//! machine an encoding engine drives once per unencodable character: it queues
//! `&#x<hex>;` for the character and hands it back one `char` at a time.
//! [`FallbackEncoder`] is such an engine, built on `encoding_rs`.
//!
//! ```rust
//! use ncr_fallback::{FallbackEncoder, FallbackOptions};
//!
//! let encoder = FallbackEncoder::new(FallbackOptions::default());
//! let bytes = encoder.encode("\u{65e5}\u{672c} \u{a9}").unwrap();
//!
//! let (text, _, _) = encoding_rs::SHIFT_JIS.decode(&bytes);
//! assert_eq!(text, "\u{65e5}\u{672c} &#xa9;");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod encoder;
mod error;
mod fallback;
mod ncr;
mod options;
mod replacement;

#[cfg(test)]
mod tests;

pub use encoder::FallbackEncoder;
pub use error::{EncodeError, FallbackError};
pub use fallback::{EncoderFallback, FallbackBuffer};
pub use ncr::{NcrFallback, NcrFallbackBuffer};
pub use options::{
    DEFAULT_GIVEUP_MARKER, FallbackOptions, MAX_SUBSTITUTE_LENGTH, ReplacementOptions,
};
pub use replacement::{ReplacementFallback, ReplacementFallbackBuffer};
