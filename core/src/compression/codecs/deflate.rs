//! codecs/deflate.rs
//! Raw RFC 1951 deflate via flate2. No header, so no signature to check.
use std::io::Write;

use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};

use crate::compression::codecs::drain;
use crate::compression::config::CodecConfig;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod};

const METHOD: CompressionMethod = CompressionMethod::Deflate;

pub struct DeflateAdapter {
    level: Compression,
}

impl DeflateAdapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self { level: Compression::new(config.deflate_level()) }
    }
}

impl CodecAdapter for DeflateAdapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = DeflateEncoder::new(Vec::new(), self.level);
        enc.write_all(raw).map_err(|e| CompressionError::codec(METHOD, e))?;
        enc.finish().map_err(|e| CompressionError::codec(METHOD, e))
    }

    fn decode(&self, native: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        drain(METHOD, DeflateDecoder::new(native), expected_len)
    }
}
