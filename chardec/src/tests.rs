//! Stream pump tests.

use std::io::{self, Read};

use chardec_core::{ByteSet, CharDecoder, EncodingType};

use super::decode_stream;
use crate::config::OutputConfig;
use crate::output::TextSink;

/// Hands out at most `step` bytes per read, with an `Interrupted` error
/// before the first one.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
    interrupted: bool,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn pump(data: &[u8], step: usize, encoding: EncodingType) -> (String, CharDecoder<TextSink>) {
    let mut decoder = CharDecoder::new(encoding, TextSink::new(&OutputConfig::default()));
    let mut out = Vec::new();
    let input = Trickle { data, step, interrupted: false };
    decode_stream(input, &mut decoder, &mut out).expect("pump");
    (String::from_utf8(out).expect("utf-8 output"), decoder)
}

#[test]
fn utf8_split_across_reads() {
    let (text, _) = pump("漢字 and ascii".as_bytes(), 1, EncodingType::Utf8);
    assert_eq!(text, "漢字 and ascii");
}

#[test]
fn shift_jis_input_becomes_utf8() {
    let (text, _) = pump(&[0x82, 0xA0, b'!', 0xB1], 3, EncodingType::ShiftJis);
    assert_eq!(text, "あ!ｱ");
}

#[test]
fn unterminated_iso2022jp_is_flushed_at_eof() {
    let (text, decoder) = pump(b"x\x1b$B$\"$$", 2, EncodingType::Utf8);
    assert_eq!(text, "xあい");
    assert_eq!(decoder.active_byte_set(), ByteSet::Iso2022Jp);
}

#[test]
fn line_drawing_box() {
    let (text, _) = pump(b"\x1b(0lqk\r\nmqj\x1b(B", 4, EncodingType::Utf8);
    assert_eq!(text, "┌─┐\r\n└─┘");
}
