//! compression/framing.rs
//! Length-prefix framing shared by the stream codecs.
//!
//! Layout:
//!
//! ```text
//! [ original length (u32 LE) ]
//! [ codec-native stream (N) ]
//! ```
use std::io::{ErrorKind, Read};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::compression::types::{CompressionError, CompressionMethod, FramingError};
use crate::constants::{LEN_PREFIX_SIZE, MAX_PREFIXED_LEN, READ_CHUNK_SIZE};
use crate::utils::read_u32_le;

/// Prepend the original length to an encoded stream.
pub fn encode_prefixed(
    method: CompressionMethod,
    original_len: usize,
    native: &[u8],
) -> Result<Vec<u8>, CompressionError> {
    let len = checked_prefix(method, original_len)?;
    let mut out = Vec::with_capacity(LEN_PREFIX_SIZE + native.len());
    out.write_u32::<LittleEndian>(len)
        .map_err(|e| CompressionError::codec(method, e))?;
    out.extend_from_slice(native);
    Ok(out)
}

/// Reject payloads a u32 prefix cannot describe, before any encoding work.
pub fn checked_prefix(method: CompressionMethod, original_len: usize) -> Result<u32, CompressionError> {
    if original_len > MAX_PREFIXED_LEN {
        return Err(CompressionError::framing(
            method,
            FramingError::InputTooLarge { len: original_len, max: MAX_PREFIXED_LEN },
        ));
    }
    Ok(original_len as u32)
}

/// Split a Framed Buffer into (declared length, native stream).
pub fn split_prefixed(
    method: CompressionMethod,
    framed: &[u8],
) -> Result<(usize, &[u8]), CompressionError> {
    match read_u32_le(framed, 0) {
        Some(len) => Ok((len as usize, &framed[LEN_PREFIX_SIZE..])),
        None => Err(CompressionError::framing(
            method,
            FramingError::BufferTooShort { have: framed.len(), need: LEN_PREFIX_SIZE },
        )),
    }
}

/// Pull exactly `declared` bytes out of a decoding reader.
///
/// Reads are bounded to [`READ_CHUNK_SIZE`] so a corrupt prefix cannot force
/// a huge allocation up front. Short reads are retried until the engine
/// reports end of stream. Once the declared bytes are in, the engine is read
/// once more so checksum trailers are verified. A declared length of zero
/// returns without reading.
pub fn read_declared<R: Read>(
    method: CompressionMethod,
    mut reader: R,
    declared: usize,
) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::with_capacity(declared.min(READ_CHUNK_SIZE));
    let mut total = 0usize;

    while total < declared {
        let want = (declared - total).min(READ_CHUNK_SIZE);
        out.resize(total + want, 0);
        match reader.read(&mut out[total..total + want]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CompressionError::codec(method, e)),
        }
    }
    out.truncate(total);

    if total < declared {
        return Err(CompressionError::TruncatedStream { method, expected: declared, actual: total });
    }
    if declared > 0 {
        finish_stream(method, &mut reader)?;
    }
    Ok(out)
}

/// One read past the declared length so the engine reaches its trailer.
///
/// End of stream means the checksum held. More output means the prefix was
/// smaller than the stream, which yields the truncated prefix as-is.
fn finish_stream<R: Read>(method: CompressionMethod, reader: &mut R) -> Result<(), CompressionError> {
    let mut scratch = [0u8; 64];
    loop {
        match reader.read(&mut scratch) {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CompressionError::codec(method, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    const M: CompressionMethod = CompressionMethod::Gzip;

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Reader that fails if touched at all.
    struct Untouchable;

    impl Read for Untouchable {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "must not be read"))
        }
    }

    #[test]
    fn prefix_is_little_endian() {
        let framed = encode_prefixed(M, 0x0102_0304, b"xyz").unwrap();
        assert_eq!(&framed[..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&framed[4..], b"xyz");

        let (len, body) = split_prefixed(M, &framed).unwrap();
        assert_eq!(len, 0x0102_0304);
        assert_eq!(body, b"xyz");
    }

    #[test]
    fn short_prefix_is_framing_error() {
        for n in 0..LEN_PREFIX_SIZE {
            let buf = vec![0u8; n];
            match split_prefixed(M, &buf) {
                Err(CompressionError::Framing { source: FramingError::BufferTooShort { have, need }, .. }) => {
                    assert_eq!(have, n);
                    assert_eq!(need, 4);
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn short_reads_are_accumulated() {
        let data: Vec<u8> = (0..=255u8).cycle().take(200_000).collect();
        let out = read_declared(M, Trickle { data: &data, step: 7 }, data.len()).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn zero_declared_never_reads() {
        assert!(read_declared(M, Untouchable, 0).unwrap().is_empty());
    }

    #[test]
    fn early_eof_is_truncated_stream() {
        let data = [1u8; 10];
        match read_declared(M, &data[..], 25) {
            Err(CompressionError::TruncatedStream { expected: 25, actual: 10, .. }) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_input_is_rejected_before_encoding() {
        match checked_prefix(M, MAX_PREFIXED_LEN + 1) {
            Err(CompressionError::Framing { source: FramingError::InputTooLarge { len, max }, .. }) => {
                assert_eq!(len, MAX_PREFIXED_LEN + 1);
                assert_eq!(max, MAX_PREFIXED_LEN);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    /// Reader that yields its data, then fails like an engine with a bad trailer.
    struct BadTrailer<'a> {
        data: &'a [u8],
    }

    impl Read for BadTrailer<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(ErrorKind::InvalidInput, "corrupt deflate stream"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn trailer_error_after_full_read_is_codec_error() {
        let data = [7u8; 100];
        match read_declared(M, BadTrailer { data: &data }, data.len()) {
            Err(CompressionError::Codec { method, msg }) => {
                assert_eq!(method, M);
                assert!(msg.contains("corrupt"), "{}", msg);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn smaller_declared_returns_prefix() {
        let data: Vec<u8> = (0..100u8).collect();
        let out = read_declared(M, &data[..], 40).unwrap();
        assert_eq!(out, &data[..40]);
    }
}
