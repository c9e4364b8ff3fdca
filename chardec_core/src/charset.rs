//! Byte-set processors for the ISO-2022 graphic sets.
//!
//! A `ByteSet` is what gets designated into G0/G1. Single-byte sets map each
//! byte straight to a character; the CJK sets collect bytes into the
//! decoder's `ScratchBuffer` and decode the whole run when flushed.

use crate::cjk;
use crate::sink::CharSink;

/// DEC special graphics for bytes `0x60..=0x7F`.
const DEC_SPECIAL_CHARACTERS: [char; 32] = [
    '\u{2666}', // 60 black diamond suit
    '\u{2592}', // 61 medium shade
    '\u{2409}', // 62 HT symbol
    '\u{240C}', // 63 FF symbol
    '\u{240D}', // 64 CR symbol
    '\u{240A}', // 65 LF symbol
    '\u{00B0}', // 66 degree sign
    '\u{00B1}', // 67 plus-minus
    '\u{2424}', // 68 NL symbol
    '\u{240B}', // 69 VT symbol
    '\u{2518}', // 6A ┘
    '\u{2510}', // 6B ┐
    '\u{250C}', // 6C ┌
    '\u{2514}', // 6D └
    '\u{253C}', // 6E ┼
    '\u{23BA}', // 6F scan line 1
    '\u{23BB}', // 70 scan line 3
    '\u{2500}', // 71 ─
    '\u{23BC}', // 72 scan line 7
    '\u{23BD}', // 73 scan line 9
    '\u{251C}', // 74 ├
    '\u{2524}', // 75 ┤
    '\u{2534}', // 76 ┴
    '\u{252C}', // 77 ┬
    '\u{2502}', // 78 │
    '\u{2264}', // 79 ≤
    '\u{2265}', // 7A ≥
    '\u{03C0}', // 7B π
    '\u{2260}', // 7C ≠
    '\u{00A3}', // 7D £
    '\u{00B7}', // 7E middle dot
    '\u{2421}', // 7F DEL symbol
];

/// Byte buffer shared by the CJK byte sets.
///
/// Owned by the decoder and lent to whichever CJK set is active. Only one
/// set is active at a time and the outgoing set is always flushed before
/// the incoming one initializes, so the buffer never mixes two sets' bytes.
#[derive(Debug, Clone, Default)]
pub struct ScratchBuffer {
    bytes: Vec<u8>,
}

impl ScratchBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { bytes: Vec::with_capacity(0x1000) }
    }

    /// Bytes collected so far, including any leading escape prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn reset(&mut self) {
        self.bytes.clear();
    }
}

/// A character set that can be designated into a graphic-set slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteSet {
    /// ASCII / Latin-1 pass-through (`ESC ( B`, `ESC ( J`).
    #[default]
    Ascii,
    /// DEC special graphics line drawing (`ESC ( 0`).
    DecSpecialLine,
    /// ISO-2022-JP, JIS X 0208 (`ESC $ B`, `ESC $ @`, `ESC $ ( D`).
    Iso2022Jp,
    /// ISO-2022-JP, JIS X 0201 katakana (`ESC $ ( I`).
    Iso2022JpKana,
    /// ISO-2022-KR, KS X 1001 (`ESC $ ( C`, `ESC $ ) C`).
    Iso2022Kr,
}

impl ByteSet {
    /// Escape prefix that puts the legacy codec into this set's state.
    fn leading_bytes(self) -> Option<&'static [u8]> {
        match self {
            Self::Ascii | Self::DecSpecialLine => None,
            Self::Iso2022Jp => Some(cjk::ISO2022JP_PREFIX),
            Self::Iso2022JpKana => Some(cjk::ISO2022JP_KANA_PREFIX),
            Self::Iso2022Kr => Some(cjk::ISO2022KR_PREFIX),
        }
    }

    /// Called when this set becomes active.
    ///
    /// CJK sets reset the shared buffer and write their leading prefix so
    /// the legacy codec sees the right context on flush.
    pub fn init(self, buf: &mut ScratchBuffer) {
        if let Some(prefix) = self.leading_bytes() {
            buf.reset();
            buf.bytes.extend_from_slice(prefix);
        }
    }

    /// Consume one byte of ordinary data.
    pub fn process<S: CharSink + ?Sized>(self, b: u8, buf: &mut ScratchBuffer, sink: &mut S) {
        match self {
            Self::Ascii => sink.emit_char(char::from(b)),
            Self::DecSpecialLine => sink.emit_char(dec_special(b).unwrap_or(char::from(b))),
            Self::Iso2022Jp | Self::Iso2022JpKana | Self::Iso2022Kr => buf.bytes.push(b),
        }
    }

    /// Called when this set is about to become inactive. CJK sets decode
    /// everything buffered since `init` and emit it in order.
    pub fn flush<S: CharSink + ?Sized>(self, buf: &mut ScratchBuffer, sink: &mut S) {
        let text = match self {
            Self::Ascii | Self::DecSpecialLine => return,
            Self::Iso2022Jp | Self::Iso2022JpKana => cjk::decode_iso2022_jp(buf.as_bytes()),
            Self::Iso2022Kr => cjk::decode_iso2022_kr(buf.as_bytes()),
        };
        buf.reset();
        for ch in text.chars() {
            sink.emit_char(ch);
        }
    }

    /// Character `code` maps to, without consuming it.
    ///
    /// Mirrors `process` for the single-byte sets. Multi-byte sets cannot be
    /// resolved one byte at a time and answer with pass-through semantics.
    pub fn lookup(self, code: u8) -> Option<char> {
        match self {
            Self::DecSpecialLine => dec_special(code).or_else(|| passthrough(code)),
            Self::Ascii | Self::Iso2022Jp | Self::Iso2022JpKana | Self::Iso2022Kr => {
                passthrough(code)
            }
        }
    }
}

/// Printable pass-through mapping: `0x20..=0x7E` and `0xA0..=0xFF`.
fn passthrough(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(char::from(code)),
        _ => None,
    }
}

fn dec_special(code: u8) -> Option<char> {
    match code {
        0x60..=0x7F => Some(DEC_SPECIAL_CHARACTERS[usize::from(code - 0x60)]),
        _ => None,
    }
}
