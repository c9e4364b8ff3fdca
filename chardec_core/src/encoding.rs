//! Encoding profiles and the byte-at-a-time codec adapter.
//!
//! An `EncodingType` names the single text encoding a session was configured
//! with. `MbcsDecoder` wraps it behind a one-byte-per-call contract: the
//! first byte of a sequence fixes how many bytes to collect, and the
//! completed sequence is decoded strictly through `encoding_rs`.

use std::fmt;
use std::str::FromStr;

use encoding_rs::{BIG5, EUC_JP, EUC_KR, Encoding, GBK, SHIFT_JIS, UTF_8};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Longest sequence any profile collects (UTF-8 lead bits allow six).
const MAX_SEQUENCE: usize = 6;

/// Supported session encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingType {
    Iso8859_1,
    ShiftJis,
    EucJp,
    #[default]
    Utf8,
    /// UTF-8 where CJK ambiguous-width characters stay narrow.
    Utf8Latin,
    Gb2312,
    Big5,
    EucCn,
    EucKr,
}

impl EncodingType {
    /// Every supported profile, in display order.
    pub const ALL: [Self; 9] = [
        Self::Iso8859_1,
        Self::ShiftJis,
        Self::EucJp,
        Self::Utf8,
        Self::Utf8Latin,
        Self::Gb2312,
        Self::Big5,
        Self::EucCn,
        Self::EucKr,
    ];

    /// Canonical name, as accepted by `FromStr` and written by serde.
    pub fn name(self) -> &'static str {
        match self {
            Self::Iso8859_1 => "iso-8859-1",
            Self::ShiftJis => "shift_jis",
            Self::EucJp => "euc-jp",
            Self::Utf8 => "utf-8",
            Self::Utf8Latin => "utf-8-latin",
            Self::Gb2312 => "gb2312",
            Self::Big5 => "big5",
            Self::EucCn => "euc-cn",
            Self::EucKr => "euc-kr",
        }
    }

    /// Whether the screen should treat CJK ambiguous-width characters as wide.
    pub fn prefers_cjk_width(self) -> bool {
        !matches!(self, Self::Iso8859_1 | Self::Utf8Latin)
    }

    /// Whether `b` starts a sequence this profile decodes.
    pub fn is_lead_byte(self, b: u8) -> bool {
        match self {
            Self::Iso8859_1 => b >= 0xA0,
            Self::ShiftJis => (0x81..=0xFC).contains(&b),
            Self::EucJp => (0x8E..=0xFE).contains(&b),
            Self::Utf8 | Self::Utf8Latin => b >= 0x80,
            Self::Gb2312 | Self::EucCn => (0xA1..=0xF7).contains(&b),
            Self::Big5 => (0x81..=0xFE).contains(&b),
            Self::EucKr => (0xA1..=0xFE).contains(&b),
        }
    }

    /// Number of bytes in the sequence that starts with `b`.
    pub fn sequence_len(self, b: u8) -> usize {
        match self {
            Self::Iso8859_1 => 1,
            Self::ShiftJis => {
                if (0xA1..=0xDF).contains(&b) {
                    1
                } else {
                    2
                }
            }
            Self::EucJp => {
                if b == 0x8F {
                    3
                } else if b >= 0x8E {
                    2
                } else {
                    1
                }
            }
            Self::Utf8 | Self::Utf8Latin => utf8_sequence_len(b),
            Self::Gb2312 | Self::Big5 | Self::EucCn | Self::EucKr => 2,
        }
    }

    /// The `encoding_rs` codec behind this profile, if it needs one.
    fn codec(self) -> Option<&'static Encoding> {
        match self {
            Self::Iso8859_1 => None,
            Self::ShiftJis => Some(SHIFT_JIS),
            Self::EucJp => Some(EUC_JP),
            Self::Utf8 | Self::Utf8Latin => Some(UTF_8),
            Self::Gb2312 | Self::EucCn => Some(GBK),
            Self::Big5 => Some(BIG5),
            Self::EucKr => Some(EUC_KR),
        }
    }

    /// Whether a decoded character is dropped instead of emitted.
    fn is_ignorable(self, ch: char) -> bool {
        match self {
            Self::Utf8 | Self::Utf8Latin => matches!(
                ch,
                '\u{FFF9}'..='\u{FFFB}'
                    | '\u{FFFE}'
                    | '\u{FFFF}'
                    | '\u{FEFF}'
                    | '\u{FE00}'..='\u{FE0F}'
                    | '\u{E0100}'..='\u{E01EF}'
            ),
            _ => false,
        }
    }
}

/// Sequence length implied by a UTF-8 lead byte. Invalid leads count as one
/// byte so the strict decode rejects them immediately.
fn utf8_sequence_len(b: u8) -> usize {
    match b.leading_ones() {
        0 | 1 => 1,
        n @ 2..=6 => n as usize,
        _ => 1,
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let ty = match lower.as_str() {
            "iso-8859-1" | "iso8859-1" | "latin1" => Self::Iso8859_1,
            "shift_jis" | "shift-jis" | "sjis" => Self::ShiftJis,
            "euc-jp" => Self::EucJp,
            "utf-8" | "utf8" => Self::Utf8,
            "utf-8-latin" | "utf8-latin" => Self::Utf8Latin,
            "gb2312" => Self::Gb2312,
            "big5" => Self::Big5,
            "euc-cn" => Self::EucCn,
            "euc-kr" => Self::EucKr,
            _ => return Err(Error::UnknownEncoding(s.to_owned())),
        };
        Ok(ty)
    }
}

impl Serialize for EncodingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EncodingType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Characters produced by a single `MbcsDecoder::put` call.
///
/// Capacity two: a few legacy sequences (Big5 HKSCS) decode to a base
/// character plus a combining mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoded {
    chars: [char; 2],
    len: usize,
}

impl Decoded {
    /// Number of characters produced.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the byte only extended a pending sequence (or was ignored).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The produced characters in order.
    pub fn as_slice(&self) -> &[char] {
        &self.chars[..self.len]
    }

    fn push(&mut self, ch: char) -> bool {
        if self.len < self.chars.len() {
            self.chars[self.len] = ch;
            self.len += 1;
            true
        } else {
            false
        }
    }
}

/// Byte-at-a-time decoder for the configured session encoding.
#[derive(Debug, Clone)]
pub struct MbcsDecoder {
    encoding: EncodingType,
    /// Bytes of the sequence being collected.
    buf: [u8; MAX_SEQUENCE],
    /// Number of valid bytes in `buf`.
    len: usize,
    /// Length the current sequence needs, fixed by its first byte.
    needed: usize,
}

impl MbcsDecoder {
    /// Create an idle decoder for `encoding`.
    pub fn new(encoding: EncodingType) -> Self {
        Self {
            encoding,
            buf: [0; MAX_SEQUENCE],
            len: 0,
            needed: 0,
        }
    }

    /// The profile this decoder was built for.
    pub fn encoding(&self) -> EncodingType {
        self.encoding
    }

    /// Drop any partially collected sequence.
    pub fn reset(&mut self) {
        self.len = 0;
        self.needed = 0;
    }

    /// Whether `b` should be fed to this decoder instead of being
    /// interpreted as ISO-2022 data.
    ///
    /// Mid-sequence, anything above space is taken so an interleaved escape
    /// sequence can still interrupt a broken multi-byte character.
    pub fn is_interesting(&self, b: u8) -> bool {
        if self.len == 0 {
            self.encoding.is_lead_byte(b)
        } else {
            b >= 0x21
        }
    }

    /// Bytes collected for the sequence in progress.
    pub fn pending(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Append one byte.
    ///
    /// Returns the characters completed by this byte (often none). On an
    /// illegal sequence returns `Error::InvalidEncoding`; the failed bytes
    /// stay in `pending()` until the caller calls `reset()`.
    pub fn put(&mut self, b: u8) -> Result<Decoded> {
        if self.len == 0 {
            self.needed = self.encoding.sequence_len(b);
        }
        if self.len == MAX_SEQUENCE {
            return Err(Error::InvalidEncoding { pending: self.pending().to_vec() });
        }
        self.buf[self.len] = b;
        self.len += 1;
        if self.len < self.needed {
            return Ok(Decoded::default());
        }

        let decoded = self.decode_pending()?;
        self.reset();
        Ok(decoded)
    }

    fn decode_pending(&self) -> Result<Decoded> {
        let bytes = self.pending();
        let mut out = Decoded::default();
        match self.encoding.codec() {
            None => {
                for &b in bytes {
                    out.push(char::from(b));
                }
            }
            Some(codec) => {
                let text = codec
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .ok_or_else(|| Error::InvalidEncoding { pending: bytes.to_vec() })?;
                for ch in text.chars() {
                    if !out.push(ch) {
                        return Err(Error::InvalidEncoding { pending: bytes.to_vec() });
                    }
                }
            }
        }

        if out.len == 1 && self.encoding.is_ignorable(out.chars[0]) {
            return Ok(Decoded::default());
        }
        Ok(out)
    }
}
