//! Tests for character-set status queries.

use super::{CharacterSetManager, CharsetSizeType};
use crate::decoder::CharDecoder;
use crate::encoding::EncodingType;
use crate::snapshot::{ByteSetId, CharsetMapping};

fn decoder() -> CharDecoder<String> {
    CharDecoder::new(EncodingType::Utf8, String::new())
}

#[test]
fn defaults_are_ascii_94_sets() {
    let d = decoder();
    assert_eq!(d.character_set_size_type(0), CharsetSizeType::CS94);
    assert_eq!(d.character_set_size_type(1), CharsetSizeType::CS94);
    assert_eq!(d.designator(0), Some('B'));
    assert_eq!(d.designator(1), Some('B'));
}

#[test]
fn g2_and_g3_are_not_designated() {
    let d = decoder();
    for g in [2, 3, 99] {
        assert_eq!(d.character_set_size_type(g), CharsetSizeType::NotDesignated);
        assert_eq!(d.designator(g), None);
    }
}

#[test]
fn dec_special_reports_zero() {
    let mut d = decoder();
    d.advance(b"\x1b)0");
    assert_eq!(d.designator(1), Some('0'));
    assert_eq!(d.character_set_size_type(1), CharsetSizeType::CS94);
}

#[test]
fn cjk_sets_have_no_scs_designator() {
    let mut d = decoder();
    d.advance(b"\x1b$B\x1b$)C");
    assert_eq!(d.character_set_size_type(0), CharsetSizeType::Other);
    assert_eq!(d.character_set_size_type(1), CharsetSizeType::Other);
    assert_eq!(d.designator(0), None);
    assert_eq!(d.designator(1), None);
}

#[test]
fn character_uses_the_active_set() {
    let mut d = decoder();
    assert_eq!(d.character(b'q'), Some('q'));
    assert_eq!(d.character(0x0A), None);

    d.advance(b"\x1b(0");
    assert_eq!(d.character(b'q'), Some('─'));

    // Designating G1 does not change the active set.
    d.advance(b"\x1b)B");
    assert_eq!(d.character(b'q'), Some('─'));

    d.advance(b"\x0e");
    assert_eq!(d.character(b'q'), Some('q'));
}

#[test]
fn charset_mapping_matches_capture() {
    let mut d = decoder();
    d.advance(b"\x1b$(I\x0e");
    assert_eq!(
        d.charset_mapping(),
        CharsetMapping { g0: ByteSetId::Iso2022JpKana, g1: ByteSetId::Ascii, invoked: 1 }
    );
    assert_eq!(d.charset_mapping(), d.capture());
}

#[test]
fn size_type_of_every_byte_set() {
    use crate::charset::ByteSet;
    assert_eq!(CharsetSizeType::of(ByteSet::Ascii), CharsetSizeType::CS94);
    assert_eq!(CharsetSizeType::of(ByteSet::DecSpecialLine), CharsetSizeType::CS94);
    assert_eq!(CharsetSizeType::of(ByteSet::Iso2022Jp), CharsetSizeType::Other);
    assert_eq!(CharsetSizeType::of(ByteSet::Iso2022JpKana), CharsetSizeType::Other);
    assert_eq!(CharsetSizeType::of(ByteSet::Iso2022Kr), CharsetSizeType::Other);
}
