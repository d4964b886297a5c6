//! constants.rs
//! Stable wire identifiers and framing sizes shared across the crate.
//!
//! Design notes:
//! - Method ids follow the ordinal order of the selector and never change;
//!   hosts may persist them next to a Framed Buffer.
//! - All multi-byte framing integers are little-endian.

/// Stable method ids (u8) for hosts that persist the selector.
pub mod method_ids {
    pub const GZIP: u8    = 0x00;
    pub const DEFLATE: u8 = 0x01;
    pub const BROTLI: u8  = 0x02;
    pub const LZMA: u8    = 0x03;
    pub const ZLIB: u8    = 0x04;
    pub const ZIP: u8     = 0x05;
    pub const BZIP2: u8   = 0x06;
    pub const LZIP: u8    = 0x07;
}

/// Length prefix written in front of length-prefixed streams (u32, LE).
pub const LEN_PREFIX_SIZE: usize = 4;

/// LZMA properties header: props byte + u32 LE dictionary size.
pub const LZMA_PROPS_SIZE: usize = 5;
/// LZMA uncompressed size field (u64, LE).
pub const LZMA_SIZE_FIELD: usize = 8;
/// Minimum LZMA Framed Buffer length.
pub const LZMA_HEADER_SIZE: usize = LZMA_PROPS_SIZE + LZMA_SIZE_FIELD;
/// Size field value meaning "unknown, decode to end marker".
pub const LZMA_UNKNOWN_SIZE: u64 = u64::MAX;

/// Largest payload a u32 length prefix can describe.
pub const MAX_PREFIXED_LEN: usize = u32::MAX as usize;

/// Bounded read size used by the length-prefixed decode loop (64 KiB).
pub const READ_CHUNK_SIZE: usize = 64 * 1024;
