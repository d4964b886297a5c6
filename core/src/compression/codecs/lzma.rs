//! codecs/lzma.rs
//! Self-framed LZMA on liblzma's `.lzma` (LZMA_Alone) coder via `xz2`.
//!
//! Layout:
//!
//! ```text
//! [ props (1) ]            (pb * 5 + lp) * 9 + lc
//! [ dict size (4, LE) ]
//! [ original length (8, LE) ]
//! [ LZMA1 body, terminated by an end-of-payload marker ]
//! ```
//!
//! Design notes:
//! - The header is the only thing the decoder needs; encoder tuning from
//!   `LzmaConfig` never has to be communicated out of band.
//! - A length of `u64::MAX` means unknown and decodes up to the end marker.
//! - The encoder always writes the end marker, even with a known length.
//!   The decoder is therefore always run in unknown-size mode and the real
//!   length only bounds the output.
use std::io::{Read, Write};

use xz2::read::XzDecoder;
use xz2::stream::{LzmaOptions, Mode, Stream};
use xz2::write::XzEncoder;

use crate::compression::codecs::drain;
use crate::compression::config::{CodecConfig, LzmaConfig};
use crate::compression::constants::{LZMA_DICT_MIN, LZMA_PROPS_MAX};
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod, FramingError};
use crate::constants::{LZMA_HEADER_SIZE, LZMA_PROPS_SIZE, LZMA_UNKNOWN_SIZE};
use crate::utils::{read_u32_le, read_u64_le};

const METHOD: CompressionMethod = CompressionMethod::Lzma;

/// Literal/position parameters of one LZMA1 stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LzmaProps {
    pub lc: u32,
    pub lp: u32,
    pub pb: u32,
    pub dict_size: u32,
}

impl LzmaProps {
    pub fn from_config(config: &LzmaConfig) -> Self {
        Self {
            lc: config.literal_context_bits(),
            lp: config.literal_pos_bits(),
            pb: config.pos_bits(),
            dict_size: config.dict_size(),
        }
    }

    /// Parse the 5-byte properties header.
    pub fn decode(header: &[u8]) -> Result<Self, String> {
        let (&props, _) = header.split_first().ok_or("missing properties byte")?;
        if props > LZMA_PROPS_MAX {
            return Err(format!("invalid properties byte 0x{:02x}", props));
        }
        let dict_size = read_u32_le(header, 1).ok_or("missing dictionary size")?;

        let mut d = u32::from(props);
        let lc = d % 9;
        d /= 9;
        let lp = d % 5;
        let pb = d / 5;
        Ok(Self { lc, lp, pb, dict_size })
    }

    /// A dictionary larger than the output is never referenced; don't allocate it.
    pub fn cap_dict_to(&mut self, output_len: usize) {
        let cap = u32::try_from(output_len).unwrap_or(u32::MAX);
        self.dict_size = self.dict_size.min(cap);
    }

    pub fn props_byte(&self) -> u8 {
        ((self.pb * 5 + self.lp) * 9 + self.lc) as u8
    }
}

fn lzma_options(props: &LzmaProps, tuning: &LzmaConfig) -> Result<LzmaOptions, xz2::stream::Error> {
    let mut opts = LzmaOptions::new_preset(6)?;
    opts.dict_size(props.dict_size.max(LZMA_DICT_MIN))
        .literal_context_bits(props.lc)
        .literal_position_bits(props.lp)
        .position_bits(props.pb)
        .mode(Mode::Normal)
        .nice_len(tuning.fast_bytes())
        .match_finder(tuning.match_finder().to_xz());
    Ok(opts)
}

/// Encode `raw` with liblzma's `.lzma` encoder.
///
/// The result carries the 13-byte header with an unknown size, then an
/// LZMA1 body terminated by an end-of-payload marker.
pub(crate) fn encode_alone(
    method: CompressionMethod,
    raw: &[u8],
    props: &LzmaProps,
    tuning: &LzmaConfig,
) -> Result<Vec<u8>, CompressionError> {
    let opts = lzma_options(props, tuning).map_err(|e| CompressionError::codec(method, e))?;
    let stream = Stream::new_lzma_encoder(&opts).map_err(|e| CompressionError::codec(method, e))?;

    let mut enc = XzEncoder::new_stream(Vec::with_capacity(LZMA_HEADER_SIZE + raw.len() / 2), stream);
    enc.write_all(raw).map_err(|e| CompressionError::codec(method, e))?;
    let out = enc.finish().map_err(|e| CompressionError::codec(method, e))?;

    if out.len() < LZMA_HEADER_SIZE {
        return Err(CompressionError::codec(method, format!("encoder produced {} bytes", out.len())));
    }
    Ok(out)
}

/// Decode an LZMA1 body that ends with an end-of-payload marker.
///
/// The decoder is handed a synthesized header with an unknown size, so it
/// always stops on the marker; `expected_len` bounds the output instead.
pub(crate) fn decode_alone(
    method: CompressionMethod,
    body: &[u8],
    props: &LzmaProps,
    expected_len: Option<usize>,
) -> Result<Vec<u8>, CompressionError> {
    let mut header = Vec::with_capacity(LZMA_HEADER_SIZE);
    header.push(props.props_byte());
    header.extend_from_slice(&props.dict_size.max(LZMA_DICT_MIN).to_le_bytes());
    header.extend_from_slice(&LZMA_UNKNOWN_SIZE.to_le_bytes());

    let stream = Stream::new_lzma_decoder(u64::MAX).map_err(|e| CompressionError::codec(method, e))?;
    drain(method, XzDecoder::new_stream(header.as_slice().chain(body), stream), expected_len)
}

pub struct LzmaAdapter {
    config: LzmaConfig,
}

impl LzmaAdapter {
    pub fn new(config: &CodecConfig) -> Self {
        Self { config: *config.lzma() }
    }
}

impl CodecAdapter for LzmaAdapter {
    fn method(&self) -> CompressionMethod {
        METHOD
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let props = LzmaProps::from_config(&self.config);

        let mut out = encode_alone(METHOD, raw, &props, &self.config)?;
        out[LZMA_PROPS_SIZE..LZMA_HEADER_SIZE].copy_from_slice(&(raw.len() as u64).to_le_bytes());
        Ok(out)
    }

    /// The length hint is ignored; the size field in the header is authoritative.
    fn decode(&self, native: &[u8], _expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError> {
        let size = match read_u64_le(native, LZMA_PROPS_SIZE) {
            Some(size) => size,
            None => {
                return Err(CompressionError::framing(
                    METHOD,
                    FramingError::BufferTooShort { have: native.len(), need: LZMA_HEADER_SIZE },
                ))
            }
        };
        let mut props = LzmaProps::decode(&native[..LZMA_PROPS_SIZE])
            .map_err(|msg| CompressionError::Codec { method: METHOD, msg })?;

        let expected = if size == LZMA_UNKNOWN_SIZE {
            None
        } else {
            Some(usize::try_from(size).map_err(|_| {
                CompressionError::codec(METHOD, format!("declared size {} exceeds address space", size))
            })?)
        };

        if let Some(len) = expected {
            props.cap_dict_to(len);
        }
        decode_alone(METHOD, &native[LZMA_HEADER_SIZE..], &props, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> LzmaAdapter {
        LzmaAdapter::new(&CodecConfig::default())
    }

    #[test]
    fn header_layout() {
        let native = adapter().encode(b"lzma header check").unwrap();
        assert_eq!(native[0], 0x5d);
        assert_eq!(&native[1..5], &(1u32 << 23).to_le_bytes());
        assert_eq!(&native[5..13], &17u64.to_le_bytes());
        assert_eq!(adapter().decode(&native, None).unwrap(), b"lzma header check");
    }

    #[test]
    fn capped_dictionary_still_decodes() {
        let data: Vec<u8> = b"0123456789abcdef".iter().cycle().take(300_000).copied().collect();
        let native = adapter().encode(&data).unwrap();
        let mut props = LzmaProps::decode(&native[..LZMA_PROPS_SIZE]).unwrap();
        props.cap_dict_to(data.len());
        assert_eq!(props.dict_size, 300_000);
        assert_eq!(decode_alone(METHOD, &native[LZMA_HEADER_SIZE..], &props, Some(data.len())).unwrap(), data);
    }

    #[test]
    fn props_byte_roundtrip() {
        for lc in 0..=8 {
            for lp in 0..=4 {
                for pb in 0..=4 {
                    let p = LzmaProps { lc, lp, pb, dict_size: 1 << 16 };
                    let mut header = vec![p.props_byte()];
                    header.extend_from_slice(&p.dict_size.to_le_bytes());
                    assert_eq!(LzmaProps::decode(&header).unwrap(), p);
                }
            }
        }
    }

    #[test]
    fn invalid_props_byte_is_codec_error() {
        let mut native = adapter().encode(b"abc").unwrap();
        native[0] = 0xe1;
        assert!(matches!(adapter().decode(&native, None), Err(CompressionError::Codec { .. })));
    }

    #[test]
    fn unknown_size_decodes_to_end_marker() {
        let mut native = adapter().encode(b"size unknown to the reader").unwrap();
        native[5..13].copy_from_slice(&LZMA_UNKNOWN_SIZE.to_le_bytes());
        assert_eq!(adapter().decode(&native, None).unwrap(), b"size unknown to the reader");
    }

    #[test]
    fn short_header_is_framing_error() {
        for n in 0..LZMA_HEADER_SIZE {
            let err = adapter().decode(&vec![0x5d; n], None).unwrap_err();
            assert!(err.is_framing(), "{} bytes: {:?}", n, err);
        }
    }
}
