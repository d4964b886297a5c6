//! compression/codecs/mod.rs
//! One adapter per algorithm, each over a third-party engine.
//!
//! Design notes:
//! - Adapters only produce and consume codec-native bytes. The length prefix
//!   of the stream codecs is applied by the facade.
//! - LZMA writes its own header; zip and brotli need no framing at all.

pub mod brotli;
pub mod bzip2;
pub mod deflate;
pub mod gzip;
pub mod lzip;
pub mod lzma;
pub mod zip;
pub mod zlib;

pub use self::brotli::*;
pub use self::bzip2::*;
pub use self::deflate::*;
pub use self::gzip::*;
pub use self::lzip::*;
pub use self::lzma::*;
pub use self::zip::*;
pub use self::zlib::*;

use std::io::Read;

use crate::compression::framing::read_declared;
use crate::compression::types::{CompressionError, CompressionMethod};

/// Drain a decoding reader: exactly `expected_len` bytes when known,
/// otherwise to end of stream.
pub(crate) fn drain<R: Read>(
    method: CompressionMethod,
    mut reader: R,
    expected_len: Option<usize>,
) -> Result<Vec<u8>, CompressionError> {
    match expected_len {
        Some(len) => read_declared(method, reader, len),
        None => {
            let mut out = Vec::new();
            reader
                .read_to_end(&mut out)
                .map_err(|e| CompressionError::codec(method, e))?;
            Ok(out)
        }
    }
}
