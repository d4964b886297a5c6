//! codecs/lzip.rs
//! Single lzip member (version 1) built on liblzma's `.lzma` coder.
//!
//! The member body is the `.lzma` stream minus its 13-byte header; on decode
//! an equivalent header is synthesized from the coded dictionary size.
//!
//! Layout:
//!
//! ```text
//! [ "LZIP" (4) ][ version (1) ][ coded dict size (1) ]
//! [ LZMA1 body, lc=3 lp=0 pb=2, end-of-payload marker ]
//! [ CRC32 of data (4, LE) ][ data size (8, LE) ][ member size (8, LE) ]
//! ```
use byteorder::{LittleEndian, WriteBytesExt};

use crate::compression::codecs::lzma::{decode_alone, encode_alone, LzmaProps};
use crate::compression::config::{CodecConfig, LzmaConfig};
use crate::compression::constants::lzip::*;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod};
use crate::constants::LZMA_HEADER_SIZE;
use crate::utils::{compute_crc32, read_u32_le, read_u64_le};

const METHOD: CompressionMethod = CompressionMethod::Lzip;

/// The lzip format fixes the literal/position parameters.
const LZIP_LC: u32 = 3;
const LZIP_LP: u32 = 0;
const LZIP_PB: u32 = 2;

/// Smallest codable dictionary >= `requested`, as (coded byte, size).
pub fn encode_dict_size(requested: u32) -> (u8, u32) {
    let size = requested.clamp(DICT_MIN, DICT_MAX);
    let base_log = 32 - (size - 1).leading_zeros();
    let base = 1u32 << base_log;
    if base == size {
        return (base_log as u8, size);
    }
    let fraction = (base - size) / (base / 16);
    let coded = base_log as u8 | ((fraction as u8) << 5);
    (coded, base - fraction * (base / 16))
}

pub fn decode_dict_size(coded: u8) -> Option<u32> {
    let base_log = u32::from(coded & 0x1f);
    if !(12..=29).contains(&base_log) {
        return None;
    }
    let base = 1u32 << base_log;
    let size = base - (base / 16) * u32::from(coded >> 5);
    (DICT_MIN..=DICT_MAX).contains(&size).then_some(size)
}

pub struct LzipAdapter {
    config: LzmaConfig,
}

impl LzipAdapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self { config: *config.lzma() }
    }

    fn codec_err(msg: impl Into<String>) -> CompressionError {
        CompressionError::Codec { method: METHOD, msg: msg.into() }
    }
}

impl CodecAdapter for LzipAdapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let (coded, dict_size) = encode_dict_size(self.config.dict_size());
        let props = LzmaProps { lc: LZIP_LC, lp: LZIP_LP, pb: LZIP_PB, dict_size };

        let alone = encode_alone(METHOD, raw, &props, &self.config)?;
        let body = &alone[LZMA_HEADER_SIZE..];

        let mut out = Vec::with_capacity(HEADER_SIZE + body.len() + TRAILER_SIZE);
        out.extend_from_slice(&MAGIC);
        out.push(VERSION);
        out.push(coded);
        out.extend_from_slice(body);

        let member_size = (out.len() + TRAILER_SIZE) as u64;
        out.write_u32::<LittleEndian>(compute_crc32(raw))
            .and_then(|_| out.write_u64::<LittleEndian>(raw.len() as u64))
            .and_then(|_| out.write_u64::<LittleEndian>(member_size))
            .map_err(|e| CompressionError::codec(METHOD, e))?;
        Ok(out)
    }

    fn decode(&self, native: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        if native.len() < HEADER_SIZE + TRAILER_SIZE {
            return Err(Self::codec_err(format!("member too short: {} bytes", native.len())));
        }
        if native[..4] != MAGIC {
            return Err(Self::codec_err("bad magic"));
        }
        if native[4] != VERSION {
            return Err(Self::codec_err(format!("unsupported version {}", native[4])));
        }
        let dict_size = decode_dict_size(native[5])
            .ok_or_else(|| Self::codec_err(format!("invalid dictionary byte 0x{:02x}", native[5])))?;

        let trailer_at = native.len() - TRAILER_SIZE;
        let crc = read_u32_le(native, trailer_at).ok_or_else(|| Self::codec_err("truncated trailer"))?;
        let data_size = read_u64_le(native, trailer_at + 4).ok_or_else(|| Self::codec_err("truncated trailer"))?;
        let member_size = read_u64_le(native, trailer_at + 12).ok_or_else(|| Self::codec_err("truncated trailer"))?;
        if member_size != native.len() as u64 {
            return Err(Self::codec_err(format!(
                "member size {} != buffer {}",
                member_size,
                native.len()
            )));
        }

        let expected = match expected_len {
            Some(len) => len,
            None => usize::try_from(data_size)
                .map_err(|_| Self::codec_err(format!("data size {} exceeds address space", data_size)))?,
        };

        // Capped by the member's own data size, not the caller's hint: a shorter
        // hint still decodes a little past it to reach the end of stream.
        let mut props = LzmaProps { lc: LZIP_LC, lp: LZIP_LP, pb: LZIP_PB, dict_size };
        props.cap_dict_to(usize::try_from(data_size).unwrap_or(usize::MAX));
        let out = decode_alone(METHOD, &native[HEADER_SIZE..trailer_at], &props, Some(expected))?;

        // Only a full decode can be checked against the trailer.
        if out.len() as u64 == data_size && compute_crc32(&out) != crc {
            return Err(Self::codec_err("CRC32 mismatch"));
        }
        Ok(out)
    }

    fn looks_native(&self, native: &[u8]) -> bool {
        native.starts_with(&MAGIC)
    }

    fn has_signature(&self) -> bool {
        true
    }
}
