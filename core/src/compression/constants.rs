//! compression/constants.rs
//! Frozen engine tuning. Affects ratio and speed only, never decodability.

/// LZMA dictionary size (8 MiB).
pub const LZMA_DICT_SIZE: u32 = 1 << 23;
/// Position state bits.
pub const LZMA_PB: u32 = 2;
/// Literal context bits.
pub const LZMA_LC: u32 = 3;
/// Literal position bits.
pub const LZMA_LP: u32 = 0;
/// Match finder "fast bytes" (nice length).
pub const LZMA_FAST_BYTES: u32 = 128;
/// liblzma rejects dictionaries below 4 KiB.
pub const LZMA_DICT_MIN: u32 = 4096;
/// Largest valid properties byte: (4 * 5 + 4) * 9 + 8.
pub const LZMA_PROPS_MAX: u8 = 224;

/// Brotli quality (0..=11) and window log (10..=24).
pub const BROTLI_QUALITY: u32 = 9;
pub const BROTLI_LGWIN: u32 = 22;
pub const BROTLI_BUFFER_SIZE: usize = 4096;

/// bzip2 block size in 100k units (1..=9).
pub const BZIP2_LEVEL: u32 = 9;

/// Default deflate level for the flate2-backed adapters and the zip entry.
pub const DEFLATE_LEVEL: u32 = 6;

/// Name of the single entry inside a zip Framed Buffer.
pub const ZIP_ENTRY_NAME: &str = "data";

/// lzip member layout.
pub mod lzip {
    pub const MAGIC: [u8; 4] = *b"LZIP";
    pub const VERSION: u8 = 1;
    /// magic + version + coded dictionary size
    pub const HEADER_SIZE: usize = 6;
    /// CRC32 + data size + member size
    pub const TRAILER_SIZE: usize = 20;
    pub const DICT_MIN: u32 = 1 << 12;
    pub const DICT_MAX: u32 = 1 << 29;
}

/// Native stream signatures used for mismatch detection.
pub mod signatures {
    pub const GZIP: [u8; 2] = [0x1f, 0x8b];
    pub const BZIP2: [u8; 3] = *b"BZh";
    pub const ZIP_LOCAL_HEADER: [u8; 4] = *b"PK\x03\x04";
}
