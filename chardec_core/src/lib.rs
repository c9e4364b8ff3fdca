//! ISO-2022 character-set decoding for terminal byte streams.
//!
//! This crate turns raw bytes received from a remote host into characters:
//! a configured session encoding (UTF-8, Shift_JIS, EUC-KR, ...) takes
//! priority for ordinary text, while ESC designators and SO/SI switch the
//! G0/G1 graphic sets between ASCII, DEC special graphics and the ISO-2022
//! CJK sets. It contains no screen model, I/O, or GUI code; decoded
//! characters go to a caller-supplied `CharSink`.

#![deny(unsafe_code)]

pub mod charset;
pub mod cjk;
pub mod config;
pub mod decoder;
pub mod encoding;
pub mod error;
pub mod manager;
pub mod sink;
pub mod snapshot;

pub use charset::{ByteSet, ScratchBuffer};
pub use config::DecoderConfig;
pub use decoder::{ByteFragment, CharDecoder};
pub use encoding::{Decoded, EncodingType, MbcsDecoder};
pub use error::{Error, Result};
pub use manager::{CharacterSetManager, CharsetSizeType};
pub use sink::{CharSink, SinkEvent, VoidSink};
pub use snapshot::{ByteSetId, CharsetMapping};
