//! Downstream character sink.
//!
//! Decoded characters flow outward from the decoder to whatever owns the
//! screen model. The `CharSink` trait decouples `CharDecoder<S>` from any
//! specific terminal: tests record into a buffer, the CLI writes to stdout.

use std::fmt;

/// Something the decoder reported to its sink.
///
/// Not used by the decoder itself; sinks that want to keep a log of what
/// they received (tests, the CLI's diagnostics) store these.
#[derive(Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// A decoded character.
    Char(char),
    /// Bytes that were illegal in the configured encoding.
    InvalidChar(Vec<u8>),
    /// The final byte of a character-set designator this engine does not know.
    UnsupportedCharset(u8),
}

impl fmt::Debug for SinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "Char({c:?})"),
            Self::InvalidChar(bytes) => write!(f, "InvalidChar({bytes:02X?})"),
            Self::UnsupportedCharset(b) => write!(f, "UnsupportedCharset({:?})", char::from(*b)),
        }
    }
}

/// Receives decoded characters and decode diagnostics from `CharDecoder<S>`.
///
/// Only `emit_char` is required; the diagnostic hooks default to no-ops.
pub trait CharSink {
    /// Handle one decoded character.
    fn emit_char(&mut self, ch: char);

    /// A byte sequence was illegal in the configured encoding. The decoder
    /// has already resynchronized; `pending` is for reporting only.
    fn invalid_char(&mut self, _pending: &[u8]) {}

    /// A designator named a character set this engine does not support.
    /// The sequence bytes are replayed as ordinary data after this call.
    fn unsupported_charset(&mut self, _designator: u8) {}

    /// True while the sink is itself consuming an escape sequence. Every
    /// byte is then handed to `emit_char` unchanged, bypassing ISO-2022
    /// interpretation.
    fn is_mid_escape_replay(&self) -> bool {
        false
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    fn emit_char(&mut self, ch: char) {
        (**self).emit_char(ch);
    }

    fn invalid_char(&mut self, pending: &[u8]) {
        (**self).invalid_char(pending);
    }

    fn unsupported_charset(&mut self, designator: u8) {
        (**self).unsupported_charset(designator);
    }

    fn is_mid_escape_replay(&self) -> bool {
        (**self).is_mid_escape_replay()
    }
}

/// Collects decoded characters into a `String`, ignoring diagnostics.
impl CharSink for String {
    fn emit_char(&mut self, ch: char) {
        self.push(ch);
    }
}

/// Records every sink call in order.
impl CharSink for Vec<SinkEvent> {
    fn emit_char(&mut self, ch: char) {
        self.push(SinkEvent::Char(ch));
    }

    fn invalid_char(&mut self, pending: &[u8]) {
        self.push(SinkEvent::InvalidChar(pending.to_vec()));
    }

    fn unsupported_charset(&mut self, designator: u8) {
        self.push(SinkEvent::UnsupportedCharset(designator));
    }
}

/// Discards everything. For benchmarks and headless state tracking.
pub struct VoidSink;

impl CharSink for VoidSink {
    fn emit_char(&mut self, _ch: char) {}
}

#[cfg(test)]
mod tests;
