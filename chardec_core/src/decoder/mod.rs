//! ISO-2022 decoding state machine.
//!
//! `CharDecoder<S: CharSink>` owns the G0/G1 designations, the invoked
//! slot, the codec adapter for the session encoding, and the downstream
//! sink. Bytes the session encoding claims go straight to the codec
//! adapter; everything else is interpreted as ISO-2022 (ESC designators,
//! SO/SI) or handed to the active byte set.

use crate::charset::{ByteSet, ScratchBuffer};
use crate::config::DecoderConfig;
use crate::encoding::{EncodingType, MbcsDecoder};
use crate::error::{Error, Result};
use crate::sink::CharSink;
use crate::snapshot::{ByteSetId, CharsetMapping};

const ESC: u8 = 0x1B;
const SO: u8 = 0x0E;
const SI: u8 = 0x0F;

/// Capacity of the escape-sequence accumulator.
const ESCAPE_CAPACITY: usize = 10;

/// A contiguous run of received bytes inside a larger buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteFragment<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteFragment<'a> {
    /// Describe `len` bytes of `buffer` starting at `offset`.
    pub fn new(buffer: &'a [u8], offset: usize, len: usize) -> Result<Self> {
        offset
            .checked_add(len)
            .and_then(|end| buffer.get(offset..end))
            .map(|bytes| Self { bytes })
            .ok_or(Error::FragmentOutOfBounds {
                offset,
                len,
                available: buffer.len(),
            })
    }

    /// The bytes this fragment covers.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for ByteFragment<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

/// Position inside an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Normal,
    /// After `ESC`.
    Escape,
    /// After `ESC $`.
    EscapeDollar,
    /// After `ESC (`.
    EscapeBracket,
    /// After `ESC )`.
    EscapeEndBracket,
    /// After `ESC $ (`.
    EscapeDollarBracket,
    /// After `ESC $ )`.
    EscapeDollarEndBracket,
}

/// Bytes of the escape sequence in progress, kept for replay if the
/// sequence turns out to be one this engine does not handle.
#[derive(Debug, Clone, Default)]
struct EscapeSequenceBuffer {
    buf: [u8; ESCAPE_CAPACITY],
    len: usize,
}

impl EscapeSequenceBuffer {
    /// Append a byte; silently drops bytes past capacity.
    fn push(&mut self, b: u8) {
        if self.len < ESCAPE_CAPACITY {
            self.buf[self.len] = b;
            self.len += 1;
        }
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// The character-set decoder for one session.
#[derive(Debug)]
pub struct CharDecoder<S: CharSink> {
    /// Escape-sequence phase.
    state: State,
    /// Accumulated escape sequence bytes.
    escseq: EscapeSequenceBuffer,
    /// Codec adapter for the session encoding.
    mbcs: MbcsDecoder,
    /// Byte sets designated into G0 and G1.
    slots: [ByteSet; 2],
    /// Invoked slot (GL): 0 or 1.
    invoked: usize,
    /// The byte set currently consuming ordinary bytes.
    active: ByteSet,
    /// Buffer lent to the active CJK byte set.
    scratch: ScratchBuffer,
    /// Downstream character processor.
    sink: S,
}

impl<S: CharSink> CharDecoder<S> {
    /// Create a decoder for `encoding` with G0 = G1 = ASCII and G0 invoked.
    pub fn new(encoding: EncodingType, sink: S) -> Self {
        Self {
            state: State::Normal,
            escseq: EscapeSequenceBuffer::default(),
            mbcs: MbcsDecoder::new(encoding),
            slots: [ByteSet::Ascii; 2],
            invoked: 0,
            active: ByteSet::Ascii,
            scratch: ScratchBuffer::new(),
            sink,
        }
    }

    /// Create a decoder from configuration.
    pub fn with_config(config: &DecoderConfig, sink: S) -> Self {
        Self::new(config.encoding, sink)
    }

    /// The session encoding.
    pub fn encoding(&self) -> EncodingType {
        self.mbcs.encoding()
    }

    /// Reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the decoder, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Byte set consuming ordinary bytes right now.
    pub fn active_byte_set(&self) -> ByteSet {
        self.active
    }

    /// Invoked slot (0 = G0, 1 = G1).
    pub fn invoked(&self) -> usize {
        self.invoked
    }

    /// Byte set designated into `slot`, for G0/G1 only.
    pub fn designation(&self, slot: usize) -> Option<ByteSet> {
        self.slots.get(slot).copied()
    }

    /// Decode every byte of `fragment`.
    pub fn on_reception(&mut self, fragment: ByteFragment<'_>) {
        for &b in fragment.bytes() {
            self.process_byte(b);
        }
    }

    /// Decode a whole slice.
    pub fn advance(&mut self, bytes: &[u8]) {
        self.on_reception(ByteFragment::from(bytes));
    }

    /// Drop any half-read escape sequence and partial multi-byte character.
    /// Designations and the invoked slot are kept.
    pub fn reset(&mut self) {
        self.state = State::Normal;
        self.escseq.clear();
        self.mbcs.reset();
    }

    /// End of stream: emit whatever the active byte set has buffered, then
    /// re-initialize it so decoding can continue.
    pub fn finish(&mut self) {
        self.active.flush(&mut self.scratch, &mut self.sink);
        self.active.init(&mut self.scratch);
    }

    /// Capture G0/G1 designations and the invoked slot.
    pub fn capture(&self) -> CharsetMapping {
        CharsetMapping {
            g0: ByteSetId::from(self.slots[0]),
            g1: ByteSetId::from(self.slots[1]),
            invoked: self.invoked as u8,
        }
    }

    /// Full-state restore, used when a session view is rebuilt from saved
    /// state.
    ///
    /// Always performs an invocation switch: the active set is flushed and
    /// the restored one initialized, even if the invoked slot is unchanged.
    pub fn restore(&mut self, mapping: &CharsetMapping) {
        self.slots = [mapping.g0.resolve(), mapping.g1.resolve()];
        self.invoke(mapping.invoked_slot());
    }

    /// Snapshot-object restore, used by cursor restore (DECRC).
    ///
    /// Switches (flush + initialize) only when the invoked slot differs.
    /// Otherwise the restored set replaces the active one in place, with no
    /// flush of buffered bytes and no initialization.
    pub fn restore_mapping(&mut self, mapping: &CharsetMapping) {
        self.slots = [mapping.g0.resolve(), mapping.g1.resolve()];
        let slot = mapping.invoked_slot();
        if slot == self.invoked {
            self.active = self.slots[slot];
        } else {
            self.invoke(slot);
        }
    }

    fn process_byte(&mut self, b: u8) {
        if self.sink.is_mid_escape_replay() {
            self.sink.emit_char(char::from(b));
            return;
        }

        if self.state == State::Normal && !is_control(b) && self.mbcs.is_interesting(b) {
            self.put_mbcs_byte(b);
            return;
        }

        match self.state {
            State::Normal => match b {
                ESC => {
                    self.escseq.clear();
                    self.escseq.push(b);
                    self.state = State::Escape;
                }
                SO => self.invoke(1),
                SI => self.invoke(0),
                _ => self.active.process(b, &mut self.scratch, &mut self.sink),
            },
            State::Escape => {
                self.escseq.push(b);
                match b {
                    b'$' => self.state = State::EscapeDollar,
                    b'(' => self.state = State::EscapeBracket,
                    b')' => self.state = State::EscapeEndBracket,
                    _ => self.replay_escape(),
                }
            }
            State::EscapeBracket => {
                self.escseq.push(b);
                match b {
                    b'0' => self.designate(0, ByteSet::DecSpecialLine),
                    b'B' | b'J' => self.designate(0, ByteSet::Ascii),
                    _ => self.reject(b),
                }
            }
            State::EscapeEndBracket => {
                self.escseq.push(b);
                match b {
                    b'0' => self.designate(1, ByteSet::DecSpecialLine),
                    b'B' | b'J' => self.designate(1, ByteSet::Ascii),
                    _ => self.replay_escape(),
                }
            }
            State::EscapeDollar => {
                self.escseq.push(b);
                match b {
                    b'(' => self.state = State::EscapeDollarBracket,
                    b')' => self.state = State::EscapeDollarEndBracket,
                    b'B' | b'@' => self.designate(0, ByteSet::Iso2022Jp),
                    _ => self.reject(b),
                }
            }
            State::EscapeDollarBracket => {
                self.escseq.push(b);
                match b {
                    b'C' => self.designate(0, ByteSet::Iso2022Kr),
                    b'D' => self.designate(0, ByteSet::Iso2022Jp),
                    b'I' => self.designate(0, ByteSet::Iso2022JpKana),
                    _ => self.reject(b),
                }
            }
            State::EscapeDollarEndBracket => {
                self.escseq.push(b);
                match b {
                    b'C' => self.designate(1, ByteSet::Iso2022Kr),
                    _ => self.replay_escape(),
                }
            }
        }
    }

    /// Bind `set` to `slot`. Takes effect immediately only if `slot` is
    /// the invoked one.
    fn designate(&mut self, slot: usize, set: ByteSet) {
        log::debug!("designate G{slot} = {set:?}");
        self.slots[slot] = set;
        if slot == self.invoked {
            self.change_active(set);
        }
        self.state = State::Normal;
    }

    /// Invoke `slot` into GL (SO/SI).
    fn invoke(&mut self, slot: usize) {
        self.invoked = slot;
        self.change_active(self.slots[slot]);
    }

    fn change_active(&mut self, set: ByteSet) {
        self.active.flush(&mut self.scratch, &mut self.sink);
        set.init(&mut self.scratch);
        self.active = set;
        self.state = State::Normal;
    }

    /// Unsupported designator: report it, then replay.
    fn reject(&mut self, designator: u8) {
        log::debug!("unsupported character set designator {:?}", char::from(designator));
        self.sink.unsupported_charset(designator);
        self.replay_escape();
    }

    /// Feed the accumulated escape sequence to the active set as data.
    fn replay_escape(&mut self) {
        log::debug!("replaying escape sequence {:02X?}", self.escseq.as_slice());
        for &b in self.escseq.as_slice() {
            self.active.process(b, &mut self.scratch, &mut self.sink);
        }
        self.escseq.clear();
        self.state = State::Normal;
    }

    fn put_mbcs_byte(&mut self, b: u8) {
        match self.mbcs.put(b) {
            Ok(decoded) => {
                for &ch in decoded.as_slice() {
                    self.sink.emit_char(ch);
                }
            }
            Err(e) => {
                log::debug!("{e}");
                self.sink.invalid_char(self.mbcs.pending());
                self.mbcs.reset();
            }
        }
    }
}

/// C0 controls (including ESC, SO, SI) never go to the codec adapter.
fn is_control(b: u8) -> bool {
    b <= 0x1F
}
