//! Decoder configuration.

use serde::{Deserialize, Serialize};

use crate::encoding::EncodingType;

/// Settings fixed when a decoder is constructed. Changing the encoding
/// means building a new decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Session text encoding.
    pub encoding: EncodingType,
}

#[cfg(test)]
mod tests;
