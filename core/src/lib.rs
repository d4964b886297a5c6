//! compression-core
//!
//! Unified in-memory compression facade.
//! One call compresses a buffer with one of eight algorithms; the matching
//! call with the same method recovers the exact original bytes.
//!
//! ```no_run
//! use compression_core::{compress, decompress, CompressionMethod};
//!
//! let framed = compress(b"hello", CompressionMethod::Lzma)?;
//! assert_eq!(decompress(&framed, CompressionMethod::Lzma)?, b"hello");
//! # Ok::<(), compression_core::CompressionError>(())
//! ```

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod utils;

pub mod compression;

pub use compression::{
    compress, compress_with_id, decompress, decompress_with_id, sniff_method, CodecAdapter, CodecConfig,
    CompressionError, CompressionMethod, FramingError, FramingPolicy, LzmaConfig, SimpleCompression,
};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        compress, decompress, CompressionError, CompressionMethod, FramingError, SimpleCompression,
    };
}
