//! codecs/zip.rs
//! Single-entry zip archive via the `zip` crate.
//!
//! The entry's own metadata carries the length, so no extra framing is added.
use std::io::{Cursor, Read, Write};

use ::zip::write::SimpleFileOptions;
use ::zip::{CompressionMethod as ZipCompression, ZipArchive, ZipWriter};

use crate::compression::config::CodecConfig;
use crate::compression::constants::{signatures, ZIP_ENTRY_NAME};
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod};
use crate::constants::READ_CHUNK_SIZE;

const METHOD: CompressionMethod = CompressionMethod::Zip;

pub struct ZipAdapter {
    level: i64,
}

impl ZipAdapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self { level: i64::from(config.deflate_level()) }
    }

    fn options(&self) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(ZipCompression::Deflated)
            .compression_level(Some(self.level))
    }
}

impl CodecAdapter for ZipAdapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(ZIP_ENTRY_NAME, self.options().large_file(raw.len() as u64 >= u32::MAX as u64))
            .map_err(|e| CompressionError::codec(METHOD, e))?;
        writer.write_all(raw).map_err(|e| CompressionError::codec(METHOD, e))?;
        let cursor = writer.finish().map_err(|e| CompressionError::codec(METHOD, e))?;
        Ok(cursor.into_inner())
    }

    /// Reads the first entry; any further entries are ignored.
    fn decode(&self, native: &[u8], _expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        let mut archive = ZipArchive::new(Cursor::new(native))
            .map_err(|e| CompressionError::codec(METHOD, e))?;
        if archive.is_empty() {
            return Err(CompressionError::codec(METHOD, "archive has no entries"));
        }

        let mut entry = archive.by_index(0).map_err(|e| CompressionError::codec(METHOD, e))?;
        let mut out = Vec::with_capacity(entry.size().min(READ_CHUNK_SIZE as u64) as usize);
        entry.read_to_end(&mut out).map_err(|e| CompressionError::codec(METHOD, e))?;
        Ok(out)
    }

    fn looks_native(&self, native: &[u8]) -> bool {
        native.starts_with(&signatures::ZIP_LOCAL_HEADER)
    }

    fn has_signature(&self) -> bool {
        true
    }
}
