//! Read-only character-set status for terminal state reports.
//!
//! Status features (DECRQSS-style queries, saved-cursor bookkeeping) ask
//! what each graphic set holds without caring how decoding works.

use crate::charset::ByteSet;
use crate::decoder::CharDecoder;
use crate::sink::CharSink;
use crate::snapshot::CharsetMapping;

/// ISO-2022 size class of a designated character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharsetSizeType {
    /// 94-character set.
    CS94,
    /// 96-character set.
    CS96,
    /// Anything else (94x94 multi-byte sets).
    Other,
    /// The slot is not designated (or not tracked).
    NotDesignated,
}

impl CharsetSizeType {
    /// Size class of a byte set.
    pub fn of(set: ByteSet) -> Self {
        match set {
            ByteSet::Ascii | ByteSet::DecSpecialLine => Self::CS94,
            ByteSet::Iso2022Jp | ByteSet::Iso2022JpKana | ByteSet::Iso2022Kr => Self::Other,
        }
    }
}

/// Queries over the current character-set state.
pub trait CharacterSetManager {
    /// Character `code` maps to in the active set, if any.
    fn character(&self, code: u8) -> Option<char>;

    /// Size class of G`g`. G2/G3 and beyond report `NotDesignated`.
    fn character_set_size_type(&self, g: usize) -> CharsetSizeType;

    /// SCS designator of G`g` (`'B'` or `'0'`), or `None` when the set
    /// cannot be designated by a single SCS final byte.
    fn designator(&self, g: usize) -> Option<char>;

    /// Current designations and invoked slot.
    fn charset_mapping(&self) -> CharsetMapping;
}

impl<S: CharSink> CharacterSetManager for CharDecoder<S> {
    fn character(&self, code: u8) -> Option<char> {
        self.active_byte_set().lookup(code)
    }

    fn character_set_size_type(&self, g: usize) -> CharsetSizeType {
        self.designation(g).map_or(CharsetSizeType::NotDesignated, CharsetSizeType::of)
    }

    fn designator(&self, g: usize) -> Option<char> {
        match self.designation(g)? {
            ByteSet::Ascii => Some('B'),
            ByteSet::DecSpecialLine => Some('0'),
            ByteSet::Iso2022Jp | ByteSet::Iso2022JpKana | ByteSet::Iso2022Kr => None,
        }
    }

    fn charset_mapping(&self) -> CharsetMapping {
        self.capture()
    }
}

#[cfg(test)]
mod tests;
