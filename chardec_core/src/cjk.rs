//! Whole-buffer decoding for the ISO-2022 CJK byte sets.
//!
//! The CJK processors collect raw bytes while active and decode them in one
//! pass when flushed. Japanese goes through the `encoding_rs` ISO-2022-JP
//! decoder. `encoding_rs` maps ISO-2022-KR to the replacement encoding, so
//! Korean is unshifted here and decoded as EUC-KR.
//!
//! Control bytes and escape sequences the state machine replayed into the
//! buffer come out verbatim in every set, in stream order.

use encoding_rs::{EUC_KR, ISO_2022_JP};

const ESC: u8 = 0x1B;
const SO: u8 = 0x0E;
const SI: u8 = 0x0F;
const SPACE: u8 = 0x20;
const DEL: u8 = 0x7F;

/// `ESC $ B`: JIS X 0208 into the ISO-2022-JP decoder.
pub const ISO2022JP_PREFIX: &[u8] = b"\x1b$B";

/// `ESC ( I`: JIS X 0201 katakana into the ISO-2022-JP decoder.
pub const ISO2022JP_KANA_PREFIX: &[u8] = b"\x1b(I";

/// `ESC $ ) C` designator followed by SO, so buffered bytes decode as
/// KS X 1001.
pub const ISO2022KR_PREFIX: &[u8] = b"\x1b$)C\x0e";

const KR_DESIGNATOR: &[u8] = b"\x1b$)C";

/// Designators the ISO-2022-JP decoder switches on.
const JP_DESIGNATORS: [&[u8]; 5] = [b"\x1b(B", b"\x1b(J", b"\x1b(I", b"\x1b$@", b"\x1b$B"];

/// Decode an ISO-2022-JP byte stream. Malformed input becomes U+FFFD.
///
/// The JIS X 0208 and katakana states accept only graphic bytes, so the
/// stream is cut at controls, space, DEL and unrecognized escape sequences.
/// Those are emitted as-is and each graphic run is decoded on its own under
/// the designator in effect.
pub fn decode_iso2022_jp(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut designator: &[u8] = &[];
    let mut run = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let rest = &bytes[i..];
        if rest[0] == ESC {
            flush_jp_run(designator, &mut run, &mut out);
            if let Some(d) = JP_DESIGNATORS.iter().find(|d| rest.starts_with(d)) {
                designator = *d;
                i += d.len();
            } else {
                let len = escape_len(rest);
                out.extend(rest[..len].iter().map(|&b| char::from(b)));
                i += len;
            }
            continue;
        }
        match rest[0] {
            b @ (0x00..=SPACE | DEL) => {
                flush_jp_run(designator, &mut run, &mut out);
                out.push(char::from(b));
            }
            b => run.push(b),
        }
        i += 1;
    }
    flush_jp_run(designator, &mut run, &mut out);
    out
}

/// Decode `designator` + `run` and drain `run`. Empty runs emit nothing.
fn flush_jp_run(designator: &[u8], run: &mut Vec<u8>, out: &mut String) {
    if run.is_empty() {
        return;
    }
    let mut segment = Vec::with_capacity(designator.len() + run.len());
    segment.extend_from_slice(designator);
    segment.append(run);
    let (text, _had_errors) = ISO_2022_JP.decode_without_bom_handling(&segment);
    out.push_str(&text);
}

/// Decode an ISO-2022-KR byte stream. Malformed input becomes U+FFFD.
///
/// Tracks SO/SI: shifted graphic bytes (`0x21..=0x7E`) are raised to their
/// EUC-KR form; everything else passes through as ASCII. The `ESC $ ) C`
/// announcer is dropped wherever it appears; other escape sequences pass
/// through unshifted.
pub fn decode_iso2022_kr(bytes: &[u8]) -> String {
    let mut euc = Vec::with_capacity(bytes.len());
    let mut shifted = false;
    let mut i = 0;
    while i < bytes.len() {
        let rest = &bytes[i..];
        if rest.starts_with(KR_DESIGNATOR) {
            i += KR_DESIGNATOR.len();
            continue;
        }
        match rest[0] {
            ESC => {
                let len = escape_len(rest);
                euc.extend_from_slice(&rest[..len]);
                i += len;
                continue;
            }
            SO => shifted = true,
            SI => shifted = false,
            b @ 0x21..=0x7E if shifted => euc.push(b | 0x80),
            b => euc.push(b),
        }
        i += 1;
    }
    let (text, _had_errors) = EUC_KR.decode_without_bom_handling(&euc);
    text.into_owned()
}

/// Length of the escape sequence at the start of `seq`: ESC, any
/// intermediates (`0x20..=0x2F`), then one final byte (`0x30..=0x7E`) if
/// present.
fn escape_len(seq: &[u8]) -> usize {
    let intermediates = seq
        .iter()
        .skip(1)
        .take_while(|b| (0x20..=0x2F).contains(*b))
        .count();
    let len = 1 + intermediates;
    match seq.get(len) {
        Some(0x30..=0x7E) => len + 1,
        _ => len,
    }
}
