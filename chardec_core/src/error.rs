//! Error types for the decoding engine.
//!
//! Malformed remote data never surfaces here: it is reported through the
//! `CharSink` and decoding continues. These errors cover caller-side
//! mistakes and the codec adapter's per-sequence failure.

/// Errors produced by `chardec_core`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The codec adapter received a byte sequence that is illegal in the
    /// configured encoding. `pending` holds the bytes of the failed sequence.
    #[error("invalid byte sequence for the configured encoding: {pending:02X?}")]
    InvalidEncoding { pending: Vec<u8> },

    /// An encoding name that does not match any supported profile.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// A byte fragment descriptor that points outside its backing buffer.
    #[error("fragment {offset}+{len} exceeds buffer of {available} bytes")]
    FragmentOutOfBounds { offset: usize, len: usize, available: usize },
}

/// Result alias for `chardec_core` operations.
pub type Result<T> = std::result::Result<T, Error>;
