//! Saved character-set state.
//!
//! `CharsetMapping` records which byte set sits in G0 and G1 and which slot
//! is invoked, by name rather than by reference, so it can be persisted
//! (TOML, JSON, anything serde speaks) and resolved later without
//! replaying the byte stream.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::charset::ByteSet;

/// Persistable identity of a byte set.
///
/// Serialized as a plain name. Names outside the vocabulary deserialize to
/// `Unspecified`, which resolves to pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ByteSetId {
    #[default]
    Unspecified,
    Ascii,
    DecSpecial,
    Iso2022Jp,
    Iso2022JpKana,
    Iso2022Kr,
}

impl ByteSetId {
    /// Name used in the textual form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Ascii => "ascii",
            Self::DecSpecial => "dec-special",
            Self::Iso2022Jp => "iso-2022-jp",
            Self::Iso2022JpKana => "iso-2022-jp-kana",
            Self::Iso2022Kr => "iso-2022-kr",
        }
    }

    /// Parse a name; anything unknown is `Unspecified`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ascii" => Self::Ascii,
            "dec-special" => Self::DecSpecial,
            "iso-2022-jp" => Self::Iso2022Jp,
            "iso-2022-jp-kana" => Self::Iso2022JpKana,
            "iso-2022-kr" => Self::Iso2022Kr,
            _ => Self::Unspecified,
        }
    }

    /// The byte set this identity stands for.
    pub fn resolve(self) -> ByteSet {
        match self {
            Self::Unspecified | Self::Ascii => ByteSet::Ascii,
            Self::DecSpecial => ByteSet::DecSpecialLine,
            Self::Iso2022Jp => ByteSet::Iso2022Jp,
            Self::Iso2022JpKana => ByteSet::Iso2022JpKana,
            Self::Iso2022Kr => ByteSet::Iso2022Kr,
        }
    }
}

impl From<ByteSet> for ByteSetId {
    fn from(set: ByteSet) -> Self {
        match set {
            ByteSet::Ascii => Self::Ascii,
            ByteSet::DecSpecialLine => Self::DecSpecial,
            ByteSet::Iso2022Jp => Self::Iso2022Jp,
            ByteSet::Iso2022JpKana => Self::Iso2022JpKana,
            ByteSet::Iso2022Kr => Self::Iso2022Kr,
        }
    }
}

impl From<String> for ByteSetId {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ByteSetId> for String {
    fn from(id: ByteSetId) -> Self {
        id.name().to_owned()
    }
}

impl fmt::Display for ByteSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of the G0/G1 designations and the invoked slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharsetMapping {
    pub g0: ByteSetId,
    pub g1: ByteSetId,
    /// Invoked slot (0 = G0, 1 = G1). Other values resolve to 0.
    pub invoked: u8,
}

impl CharsetMapping {
    /// Slot index to invoke on restore.
    pub fn invoked_slot(&self) -> usize {
        if self.invoked == 1 { 1 } else { 0 }
    }
}
