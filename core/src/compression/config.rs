//! compression/config.rs
//! Frozen codec configuration.
//!
//! Design notes:
//! - Built once, owned by the facade, handed to adapters by reference at
//!   construction. Nothing here is mutable after that.
//! - Only the LZMA properties header travels with the data; the decoder never
//!   reads these values.

use crate::compression::constants::*;

/// Match finder used by the LZMA and lzip encoders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchFinder {
    HashChain3,
    HashChain4,
    BinaryTree2,
    BinaryTree3,
    BinaryTree4,
}

impl MatchFinder {
    pub(crate) fn to_xz(self) -> xz2::stream::MatchFinder {
        use xz2::stream::MatchFinder as Mf;
        match self {
            MatchFinder::HashChain3  => Mf::HashChain3,
            MatchFinder::HashChain4  => Mf::HashChain4,
            MatchFinder::BinaryTree2 => Mf::BinaryTree2,
            MatchFinder::BinaryTree3 => Mf::BinaryTree3,
            MatchFinder::BinaryTree4 => Mf::BinaryTree4,
        }
    }
}

/// LZMA encoder tuning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LzmaConfig {
    dict_size: u32,
    pos_bits: u32,
    literal_context_bits: u32,
    literal_pos_bits: u32,
    fast_bytes: u32,
    match_finder: MatchFinder,
}

impl LzmaConfig {
    pub fn dict_size(&self) -> u32 { self.dict_size }
    pub fn pos_bits(&self) -> u32 { self.pos_bits }
    pub fn literal_context_bits(&self) -> u32 { self.literal_context_bits }
    pub fn literal_pos_bits(&self) -> u32 { self.literal_pos_bits }
    pub fn fast_bytes(&self) -> u32 { self.fast_bytes }
    pub fn match_finder(&self) -> MatchFinder { self.match_finder }

    /// Properties byte as written into the LZMA header.
    pub fn props_byte(&self) -> u8 {
        ((self.pos_bits * 5 + self.literal_pos_bits) * 9 + self.literal_context_bits) as u8
    }
}

impl Default for LzmaConfig {
    fn default() -> Self {
        Self {
            dict_size: LZMA_DICT_SIZE,
            pos_bits: LZMA_PB,
            literal_context_bits: LZMA_LC,
            literal_pos_bits: LZMA_LP,
            fast_bytes: LZMA_FAST_BYTES,
            match_finder: MatchFinder::BinaryTree4,
        }
    }
}

/// Process-wide tuning for every adapter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    lzma: LzmaConfig,
    brotli_quality: u32,
    brotli_lgwin: u32,
    bzip2_level: u32,
    deflate_level: u32,
}

impl CodecConfig {
    pub fn lzma(&self) -> &LzmaConfig { &self.lzma }
    pub fn brotli_quality(&self) -> u32 { self.brotli_quality }
    pub fn brotli_lgwin(&self) -> u32 { self.brotli_lgwin }
    pub fn bzip2_level(&self) -> u32 { self.bzip2_level }
    pub fn deflate_level(&self) -> u32 { self.deflate_level }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            lzma: LzmaConfig::default(),
            brotli_quality: BROTLI_QUALITY,
            brotli_lgwin: BROTLI_LGWIN,
            bzip2_level: BZIP2_LEVEL,
            deflate_level: DEFLATE_LEVEL,
        }
    }
}
