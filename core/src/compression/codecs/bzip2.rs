//! codecs/bzip2.rs
//! bzip2 via the `bzip2` crate (libbz2).
use std::io::Write;

use ::bzip2::{read::BzDecoder, write::BzEncoder, Compression};

use crate::compression::codecs::drain;
use crate::compression::config::CodecConfig;
use crate::compression::constants::signatures;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod};

const METHOD: CompressionMethod = CompressionMethod::Bzip2;

pub struct Bzip2Adapter {
    level: Compression,
}

impl Bzip2Adapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self { level: Compression::new(config.bzip2_level()) }
    }
}

impl CodecAdapter for Bzip2Adapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = BzEncoder::new(Vec::new(), self.level);
        enc.write_all(raw).map_err(|e| CompressionError::codec(METHOD, e))?;
        enc.finish().map_err(|e| CompressionError::codec(METHOD, e))
    }

    fn decode(&self, native: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        drain(METHOD, BzDecoder::new(native), expected_len)
    }

    /// "BZh" followed by the block size digit.
    fn looks_native(&self, native: &[u8]) -> bool {
        native.len() >= 4
            && native.starts_with(&signatures::BZIP2)
            && (b'1'..=b'9').contains(&native[3])
    }

    fn has_signature(&self) -> bool {
        true
    }
}
