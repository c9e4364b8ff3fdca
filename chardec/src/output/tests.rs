//! Text sink tests, driven through a real decoder.

use chardec_core::{CharDecoder, CharSink, EncodingType};

use super::TextSink;
use crate::config::{InvalidPolicy, OutputConfig};

fn decoder(config: &OutputConfig) -> CharDecoder<TextSink> {
    CharDecoder::new(EncodingType::Utf8, TextSink::new(config))
}

fn stripping() -> OutputConfig {
    OutputConfig { strip_escapes: true, ..OutputConfig::default() }
}

#[test]
fn plain_text_passes_through() {
    let mut d = decoder(&OutputConfig::default());
    d.advance("hello 世界\r\n".as_bytes());
    assert_eq!(d.sink_mut().take(), "hello 世界\r\n");
    assert_eq!(d.sink_mut().take(), "");
}

#[test]
fn escapes_are_kept_without_stripping() {
    let mut d = decoder(&OutputConfig::default());
    d.advance(b"\x1b[1mx");
    assert_eq!(d.sink_mut().take(), "\x1b[1mx");
}

#[test]
fn invalid_bytes_follow_policy() {
    let cases = [
        (InvalidPolicy::Replace, "a\u{FFFD}b"),
        (InvalidPolicy::Skip, "ab"),
        (InvalidPolicy::Hex, "a<80>b"),
    ];
    for (policy, expected) in cases {
        let config = OutputConfig { invalid: policy, ..OutputConfig::default() };
        let mut d = decoder(&config);
        d.advance(&[b'a', 0x80, b'b']);
        assert_eq!(d.sink_mut().take(), expected, "{policy:?}");
        assert_eq!(d.sink().invalid_sequences(), 1);
    }
}

#[test]
fn hex_policy_prints_every_pending_byte() {
    let config = OutputConfig { invalid: InvalidPolicy::Hex, ..OutputConfig::default() };
    let mut d = decoder(&config);
    d.advance(&[0xC3, 0x28]);
    assert_eq!(d.sink_mut().take(), "<C3><28>");
}

#[test]
fn unsupported_designators_are_counted() {
    let config = OutputConfig { unsupported_charset_warning: false, ..OutputConfig::default() };
    let mut d = decoder(&config);
    d.advance(b"\x1b(Ax");
    assert_eq!(d.sink().unsupported_designators(), 1);
    assert_eq!(d.sink_mut().take(), "\x1b(Ax");
}

#[test]
fn stripping_removes_sgr() {
    let mut d = decoder(&stripping());
    d.advance(b"\x1b[1;31mred\x1b[0m plain\r\n");
    assert_eq!(d.sink_mut().take(), "red plain\r\n");
}

#[test]
fn stripping_removes_osc_title() {
    let mut d = decoder(&stripping());
    d.advance("\x1b]0;タイトル\x07text".as_bytes());
    assert_eq!(d.sink_mut().take(), "text");
}

#[test]
fn csi_parameters_bypass_line_drawing() {
    // DEC special is active; `1` and `m` inside the CSI must reach the
    // parser as-is or the sequence would never terminate.
    let mut d = decoder(&stripping());
    d.advance(b"\x1b(0q\x1b[1mq\x1b(Bq");
    assert_eq!(d.sink_mut().take(), "──q");
    assert!(!d.sink().is_mid_escape_replay());
}

#[test]
fn sequence_split_across_reads() {
    let mut d = decoder(&stripping());
    d.advance(b"ab\x1b[3");
    d.advance(b"8;5;1");
    d.advance(b"2mcd");
    assert_eq!(d.sink_mut().take(), "abcd");
}

#[test]
fn stripping_keeps_line_structure_and_drops_other_controls() {
    let mut d = decoder(&stripping());
    d.advance(b"a\tb\x07\x08c\r\n");
    assert_eq!(d.sink_mut().take(), "a\tbc\r\n");
}

#[test]
fn iso2022jp_text_is_decoded_before_stripping() {
    let mut d = decoder(&stripping());
    d.advance(b"\x1b$B$\"$$\x1b(B!");
    assert_eq!(d.sink_mut().take(), "あい!");
}
