//! compression/types.rs
//! Method selector, framing policies, error taxonomy and the adapter capability.
use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::{method_ids, LEN_PREFIX_SIZE, LZMA_HEADER_SIZE};
use crate::utils::enum_name_or_hex;

/// Closed selector over the eight supported algorithms.
///
/// The discriminant is the stable wire id (see [`method_ids`]).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CompressionMethod {
    Gzip    = method_ids::GZIP,
    Deflate = method_ids::DEFLATE,
    Brotli  = method_ids::BROTLI,
    Lzma    = method_ids::LZMA,
    Zlib    = method_ids::ZLIB,
    Zip     = method_ids::ZIP,
    Bzip2   = method_ids::BZIP2,
    Lzip    = method_ids::LZIP,
}

impl CompressionMethod {
    /// Every method, in wire-id order.
    pub const ALL: [CompressionMethod; 8] = [
        CompressionMethod::Gzip,
        CompressionMethod::Deflate,
        CompressionMethod::Brotli,
        CompressionMethod::Lzma,
        CompressionMethod::Zlib,
        CompressionMethod::Zip,
        CompressionMethod::Bzip2,
        CompressionMethod::Lzip,
    ];

    /// Resolve a raw wire id.
    pub fn from_id(raw: u8) -> Result<Self, CompressionError> {
        Self::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedMethod { raw })
    }

    pub fn verify(raw: u8) -> Result<(), CompressionError> {
        Self::from_id(raw).map(|_| ())
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            CompressionMethod::Gzip    => "gzip",
            CompressionMethod::Deflate => "deflate",
            CompressionMethod::Brotli  => "brotli",
            CompressionMethod::Lzma    => "lzma",
            CompressionMethod::Zlib    => "zlib",
            CompressionMethod::Zip     => "zip",
            CompressionMethod::Bzip2   => "bzip2",
            CompressionMethod::Lzip    => "lzip",
        }
    }

    /// How a Framed Buffer of this method is laid out.
    pub const fn framing_policy(self) -> FramingPolicy {
        match self {
            CompressionMethod::Gzip
            | CompressionMethod::Deflate
            | CompressionMethod::Zlib
            | CompressionMethod::Bzip2
            | CompressionMethod::Lzip => FramingPolicy::LengthPrefixed,
            CompressionMethod::Lzma   => FramingPolicy::SelfFramed,
            CompressionMethod::Zip    => FramingPolicy::Container,
            CompressionMethod::Brotli => FramingPolicy::Native,
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionMethod {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gzip" | "gz"     => Ok(CompressionMethod::Gzip),
            "deflate"         => Ok(CompressionMethod::Deflate),
            "brotli" | "br"   => Ok(CompressionMethod::Brotli),
            "lzma"            => Ok(CompressionMethod::Lzma),
            "zlib"            => Ok(CompressionMethod::Zlib),
            "zip"             => Ok(CompressionMethod::Zip),
            "bzip2" | "bz2"   => Ok(CompressionMethod::Bzip2),
            "lzip" | "lz"     => Ok(CompressionMethod::Lzip),
            _ => Err(CompressionError::UnknownMethodName(s.to_string())),
        }
    }
}

/// Per-method convention for recovering the original length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FramingPolicy {
    /// `[u32 LE original length][native stream]`, added by the facade.
    LengthPrefixed,
    /// `[5-byte props][u64 LE original length][body]`, written by the adapter.
    SelfFramed,
    /// Single-entry archive; length lives in entry metadata.
    Container,
    /// Engine output passed through untouched.
    Native,
}

impl FramingPolicy {
    /// Smallest Framed Buffer this policy can decode.
    pub const fn min_framed_len(self) -> usize {
        match self {
            FramingPolicy::LengthPrefixed => LEN_PREFIX_SIZE,
            FramingPolicy::SelfFramed     => LZMA_HEADER_SIZE,
            FramingPolicy::Container      => 0,
            FramingPolicy::Native         => 0,
        }
    }
}

/// Framing-layer failures. Recoverable by the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    #[error("buffer too short: {have} < {need} bytes")]
    BufferTooShort { have: usize, need: usize },

    #[error("input too large for length prefix: {len} > {max} bytes")]
    InputTooLarge { len: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unsupported compression method: {}", enum_name_or_hex::<CompressionMethod>(*raw))]
    UnsupportedMethod { raw: u8 },

    #[error("unknown compression method name: {0:?}")]
    UnknownMethodName(String),

    #[error("{method} framing error: {source}")]
    Framing {
        method: CompressionMethod,
        #[source]
        source: FramingError,
    },

    #[error("{method} stream ended early: {actual} of {expected} bytes")]
    TruncatedStream {
        method: CompressionMethod,
        expected: usize,
        actual: usize,
    },

    #[error("buffer is not a {method} stream{}", detected.map(|d| format!(" (looks like {d})")).unwrap_or_default())]
    MethodMismatch {
        method: CompressionMethod,
        detected: Option<CompressionMethod>,
    },

    #[error("codec {method} failed: {msg}")]
    Codec { method: CompressionMethod, msg: String },
}

impl CompressionError {
    pub fn framing(method: CompressionMethod, source: FramingError) -> Self {
        CompressionError::Framing { method, source }
    }

    pub fn codec(method: CompressionMethod, err: impl fmt::Display) -> Self {
        CompressionError::Codec { method, msg: err.to_string() }
    }

    pub fn is_framing(&self) -> bool {
        matches!(self, CompressionError::Framing { .. })
    }

    /// Method the failing call was made with, when known.
    pub fn method(&self) -> Option<CompressionMethod> {
        match self {
            CompressionError::UnsupportedMethod { .. } | CompressionError::UnknownMethodName(_) => None,
            CompressionError::Framing { method, .. }
            | CompressionError::TruncatedStream { method, .. }
            | CompressionError::MethodMismatch { method, .. }
            | CompressionError::Codec { method, .. } => Some(*method),
        }
    }
}

/// Uniform capability over one codec engine.
///
/// Adapters are stateless apart from frozen tuning captured at construction,
/// so a single instance serves concurrent calls.
pub trait CodecAdapter: Send + Sync {
    fn method(&self) -> CompressionMethod;

    /// Produce the codec-native bytes for `raw`.
    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Recover raw bytes. `expected_len` bounds the read for length-prefixed
    /// adapters and is ignored by the others.
    fn decode(&self, native: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, CompressionError>;

    /// Cheap signature check on codec-native bytes. Adapters without a
    /// reliable magic accept everything.
    fn looks_native(&self, _native: &[u8]) -> bool {
        true
    }

    /// Whether [`looks_native`](Self::looks_native) is a real check.
    fn has_signature(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable() {
        for (i, m) in CompressionMethod::ALL.iter().enumerate() {
            assert_eq!(m.id() as usize, i);
            assert_eq!(CompressionMethod::from_id(i as u8).unwrap(), *m);
        }
    }

    #[test]
    fn unknown_id_is_unsupported() {
        let err = CompressionMethod::from_id(8).unwrap_err();
        assert!(matches!(err, CompressionError::UnsupportedMethod { raw: 8 }));
        assert_eq!(err.to_string(), "unsupported compression method: 0x8");
        assert!(CompressionMethod::verify(0xff).is_err());
    }

    #[test]
    fn names_parse_back() {
        for m in CompressionMethod::ALL {
            assert_eq!(m.to_string().parse::<CompressionMethod>().unwrap(), m);
        }
        assert_eq!("BR".parse::<CompressionMethod>().unwrap(), CompressionMethod::Brotli);
        assert!(matches!(
            "snappy".parse::<CompressionMethod>(),
            Err(CompressionError::UnknownMethodName(_))
        ));
    }

    #[test]
    fn policies_match_methods() {
        use CompressionMethod::*;
        for m in [Gzip, Deflate, Zlib, Bzip2, Lzip] {
            assert_eq!(m.framing_policy(), FramingPolicy::LengthPrefixed);
        }
        assert_eq!(Lzma.framing_policy(), FramingPolicy::SelfFramed);
        assert_eq!(Zip.framing_policy(), FramingPolicy::Container);
        assert_eq!(Brotli.framing_policy(), FramingPolicy::Native);
        assert_eq!(Lzma.framing_policy().min_framed_len(), 13);
    }

    #[test]
    fn mismatch_message_names_detected_method() {
        let err = CompressionError::MethodMismatch {
            method: CompressionMethod::Gzip,
            detected: Some(CompressionMethod::Bzip2),
        };
        assert_eq!(err.to_string(), "buffer is not a gzip stream (looks like bzip2)");
    }
}
