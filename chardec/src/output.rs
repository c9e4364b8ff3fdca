//! Text sink for the command-line front end.
//!
//! `TextSink` accumulates decoded characters until the caller drains them
//! with `take`. Rejected byte sequences are rendered according to the
//! configured `InvalidPolicy`. With `strip_escapes` on, the character
//! stream runs through a `vte::Parser` and only printable text plus line
//! structure survives.

use std::fmt::Write as _;

use chardec_core::CharSink;

use crate::config::{InvalidPolicy, OutputConfig};

/// Buffers decoded text for stdout.
pub struct TextSink {
    text: String,
    invalid: InvalidPolicy,
    warn_unsupported: bool,
    stripper: Option<EscapeStripper>,
    invalid_sequences: usize,
    unsupported_designators: usize,
}

impl TextSink {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            text: String::new(),
            invalid: config.invalid,
            warn_unsupported: config.unsupported_charset_warning,
            stripper: config.strip_escapes.then(EscapeStripper::new),
            invalid_sequences: 0,
            unsupported_designators: 0,
        }
    }

    /// Drain the text accumulated since the last call.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Rejected byte sequences seen so far.
    pub fn invalid_sequences(&self) -> usize {
        self.invalid_sequences
    }

    /// Unsupported designators seen so far.
    pub fn unsupported_designators(&self) -> usize {
        self.unsupported_designators
    }
}

impl CharSink for TextSink {
    fn emit_char(&mut self, ch: char) {
        match &mut self.stripper {
            Some(stripper) => stripper.feed(ch, &mut self.text),
            None => self.text.push(ch),
        }
    }

    fn invalid_char(&mut self, pending: &[u8]) {
        self.invalid_sequences += 1;
        match self.invalid {
            InvalidPolicy::Replace => self.text.push(char::REPLACEMENT_CHARACTER),
            InvalidPolicy::Skip => {}
            InvalidPolicy::Hex => {
                for b in pending {
                    let _ = write!(self.text, "<{b:02X}>");
                }
            }
        }
    }

    fn unsupported_charset(&mut self, designator: u8) {
        self.unsupported_designators += 1;
        if self.warn_unsupported {
            log::warn!("unsupported character set designator {:?}", char::from(designator));
        }
    }

    fn is_mid_escape_replay(&self) -> bool {
        self.stripper.as_ref().is_some_and(|s| s.in_sequence)
    }
}

/// Drops control sequences from a character stream.
///
/// `in_sequence` is set once a character leaves the parser without any
/// callback firing, i.e. it opened or continued a sequence.
struct EscapeStripper {
    parser: vte::Parser,
    in_sequence: bool,
    in_passthrough: bool,
}

impl EscapeStripper {
    fn new() -> Self {
        Self {
            parser: vte::Parser::new(),
            in_sequence: false,
            in_passthrough: false,
        }
    }

    fn feed(&mut self, ch: char, out: &mut String) {
        let mut printer = Printer {
            out,
            settled: false,
            in_passthrough: self.in_passthrough,
        };
        let mut utf8 = [0u8; 4];
        self.parser.advance(&mut printer, ch.encode_utf8(&mut utf8).as_bytes());
        self.in_passthrough = printer.in_passthrough;
        self.in_sequence = !printer.settled || self.in_passthrough;
    }
}

/// `vte::Perform` that keeps text and line structure only.
struct Printer<'a> {
    out: &'a mut String,
    settled: bool,
    in_passthrough: bool,
}

impl vte::Perform for Printer<'_> {
    fn print(&mut self, c: char) {
        self.out.push(c);
        self.settled = true;
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.out.push(char::from(byte));
        }
        self.settled = true;
    }

    fn hook(&mut self, _params: &vte::Params, _intermediates: &[u8], _ignore: bool, _action: char) {
        self.in_passthrough = true;
        self.settled = true;
    }

    fn put(&mut self, _byte: u8) {
        self.settled = true;
    }

    fn unhook(&mut self) {
        self.in_passthrough = false;
        self.settled = true;
    }

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {
        self.settled = true;
    }

    fn csi_dispatch(&mut self, _params: &vte::Params, _intermediates: &[u8], _ignore: bool, _action: char) {
        self.settled = true;
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {
        self.settled = true;
    }
}

#[cfg(test)]
mod tests;
