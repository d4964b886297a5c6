//! codecs/brotli.rs
//! Brotli via the `brotli` crate.
//!
//! The brotli stream carries its own end marker, so the Framed Buffer is the
//! engine output byte for byte.
use std::io::Read;

use crate::compression::config::CodecConfig;
use crate::compression::constants::BROTLI_BUFFER_SIZE;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod};

const METHOD: CompressionMethod = CompressionMethod::Brotli;

pub struct BrotliAdapter {
    quality: u32,
    lgwin: u32,
}

impl BrotliAdapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            quality: config.brotli_quality(),
            lgwin: config.brotli_lgwin(),
        }
    }
}

impl CodecAdapter for BrotliAdapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::new();
        ::brotli::CompressorReader::new(raw, BROTLI_BUFFER_SIZE, self.quality, self.lgwin)
            .read_to_end(&mut out)
            .map_err(|e| CompressionError::codec(METHOD, e))?;
        Ok(out)
    }

    fn decode(&self, native: &[u8], _expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::new();
        ::brotli::Decompressor::new(native, BROTLI_BUFFER_SIZE)
            .read_to_end(&mut out)
            .map_err(|e| CompressionError::codec(METHOD, e))?;
        Ok(out)
    }
}
