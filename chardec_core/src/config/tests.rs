//! Decoder configuration tests.

use super::DecoderConfig;
use crate::decoder::CharDecoder;
use crate::encoding::EncodingType;

#[test]
fn default_config_is_utf8() {
    assert_eq!(DecoderConfig::default().encoding, EncodingType::Utf8);
}

#[test]
fn default_config_roundtrip() {
    let cfg = DecoderConfig::default();
    let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
    assert!(toml_str.contains("encoding = \"utf-8\""));
    let parsed: DecoderConfig = toml::from_str(&toml_str).expect("deserialize");
    assert_eq!(parsed, cfg);
}

#[test]
fn empty_toml_gives_defaults() {
    let parsed: DecoderConfig = toml::from_str("").expect("deserialize");
    assert_eq!(parsed, DecoderConfig::default());
}

#[test]
fn encoding_name_from_toml() {
    let parsed: DecoderConfig = toml::from_str("encoding = \"Shift_JIS\"").expect("deserialize");
    assert_eq!(parsed.encoding, EncodingType::ShiftJis);
}

#[test]
fn unknown_encoding_is_rejected() {
    let err = toml::from_str::<DecoderConfig>("encoding = \"ebcdic\"").expect_err("unknown");
    assert!(err.to_string().contains("unknown encoding: ebcdic"));
}

#[test]
fn decoder_built_from_config_uses_its_encoding() {
    let cfg = DecoderConfig { encoding: EncodingType::EucKr };
    let mut d = CharDecoder::with_config(&cfg, String::new());
    assert_eq!(d.encoding(), EncodingType::EucKr);
    d.advance(&[0xB0, 0xA1]);
    assert_eq!(d.sink(), "가");
}
