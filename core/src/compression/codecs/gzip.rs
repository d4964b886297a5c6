//! codecs/gzip.rs
//! RFC 1952 gzip via flate2.
use std::io::Write;

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use crate::compression::codecs::drain;
use crate::compression::config::CodecConfig;
use crate::compression::constants::signatures;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod};

const METHOD: CompressionMethod = CompressionMethod::Gzip;

pub struct GzipAdapter {
    level: Compression,
}

impl GzipAdapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self { level: Compression::new(config.deflate_level()) }
    }
}

impl CodecAdapter for GzipAdapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = GzEncoder::new(Vec::new(), self.level);
        enc.write_all(raw).map_err(|e| CompressionError::codec(METHOD, e))?;
        enc.finish().map_err(|e| CompressionError::codec(METHOD, e))
    }

    fn decode(&self, native: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        drain(METHOD, GzDecoder::new(native), expected_len)
    }

    fn looks_native(&self, native: &[u8]) -> bool {
        native.starts_with(&signatures::GZIP)
    }

    fn has_signature(&self) -> bool {
        true
    }
}
