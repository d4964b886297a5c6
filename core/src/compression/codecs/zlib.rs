//! codecs/zlib.rs
//! RFC 1950 zlib via flate2.
use std::io::Write;

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::compression::codecs::drain;
use crate::compression::config::CodecConfig;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod};

const METHOD: CompressionMethod = CompressionMethod::Zlib;

pub struct ZlibAdapter {
    level: Compression,
}

impl ZlibAdapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self { level: Compression::new(config.deflate_level()) }
    }
}

/// CMF/FLG sanity: deflate method, window <= 32 KiB, FCHECK multiple of 31.
fn is_zlib_header(cmf: u8, flg: u8) -> bool {
    cmf & 0x0f == 8 && cmf >> 4 <= 7 && ((u16::from(cmf) << 8) | u16::from(flg)) % 31 == 0
}

impl CodecAdapter for ZlibAdapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = ZlibEncoder::new(Vec::new(), self.level);
        enc.write_all(raw).map_err(|e| CompressionError::codec(METHOD, e))?;
        enc.finish().map_err(|e| CompressionError::codec(METHOD, e))
    }

    fn decode(&self, native: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        drain(METHOD, ZlibDecoder::new(native), expected_len)
    }

    fn looks_native(&self, native: &[u8]) -> bool {
        match native {
            [cmf, flg, ..] => is_zlib_header(*cmf, *flg),
            _ => false,
        }
    }

    fn has_signature(&self) -> bool {
        true
    }
}
