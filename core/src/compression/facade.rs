//! compression/facade.rs
//! Dispatch facade: picks the adapter for a method and applies its framing.
//!
//! Design notes:
//! - The facade is the only place the u32 length prefix is written or read.
//! - No validation beyond framing; content and size limits are the adapter's
//!   concern.
//! - Errors are returned to the caller as-is, never logged or retried.
use std::sync::OnceLock;

use crate::compression::config::CodecConfig;
use crate::compression::framing::{checked_prefix, encode_prefixed, split_prefixed};
use crate::compression::registry::CodecSet;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod, FramingError, FramingPolicy};

pub struct SimpleCompression {
    config: CodecConfig,
    codecs: CodecSet,
}

impl SimpleCompression {
    pub fn new(config: CodecConfig) -> Self {
        let codecs = CodecSet::new(&config);
        Self { config, codecs }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn codecs(&self) -> &CodecSet {
        &self.codecs
    }

    /// Compress `data` into a Framed Buffer for `method`.
    pub fn compress(&self, data: &[u8], method: CompressionMethod) -> Result<Vec<u8>, CompressionError> {
        let adapter = self.codecs.get(method);

        let framed = match method.framing_policy() {
            FramingPolicy::LengthPrefixed => {
                checked_prefix(method, data.len())?;
                let native = adapter.encode(data)?;
                encode_prefixed(method, data.len(), &native)?
            }
            FramingPolicy::SelfFramed | FramingPolicy::Container | FramingPolicy::Native => adapter.encode(data)?,
        };

        log::trace!("compress {}: {} -> {} bytes", method, data.len(), framed.len());
        Ok(framed)
    }

    /// Recover the original bytes from a Framed Buffer produced with `method`.
    pub fn decompress(&self, framed: &[u8], method: CompressionMethod) -> Result<Vec<u8>, CompressionError> {
        let adapter = self.codecs.get(method);
        let policy = method.framing_policy();

        let need = policy.min_framed_len();
        if framed.len() < need {
            return Err(CompressionError::framing(
                method,
                FramingError::BufferTooShort { have: framed.len(), need },
            ));
        }

        let raw = match policy {
            FramingPolicy::LengthPrefixed => {
                let (declared, body) = split_prefixed(method, framed)?;
                if declared == 0 && body.is_empty() {
                    // Bare zero prefix: nothing to decode for any method.
                    Vec::new()
                } else {
                    self.check_signature(adapter, framed, body)?;
                    adapter.decode(body, Some(declared))?
                }
            }
            FramingPolicy::Container => {
                self.check_signature(adapter, framed, framed)?;
                adapter.decode(framed, None)?
            }
            FramingPolicy::SelfFramed | FramingPolicy::Native => adapter.decode(framed, None)?,
        };

        log::trace!("decompress {}: {} -> {} bytes", method, framed.len(), raw.len());
        Ok(raw)
    }

    /// Same as [`compress`](Self::compress), for callers holding a wire id.
    pub fn compress_with_id(&self, data: &[u8], method_id: u8) -> Result<Vec<u8>, CompressionError> {
        self.compress(data, CompressionMethod::from_id(method_id)?)
    }

    pub fn decompress_with_id(&self, framed: &[u8], method_id: u8) -> Result<Vec<u8>, CompressionError> {
        self.decompress(framed, CompressionMethod::from_id(method_id)?)
    }

    /// Best-effort guess of the method behind a Framed Buffer.
    pub fn sniff_method(&self, framed: &[u8]) -> Option<CompressionMethod> {
        self.codecs.sniff(framed)
    }

    fn check_signature(
        &self,
        adapter: &dyn CodecAdapter,
        framed: &[u8],
        native: &[u8],
    ) -> Result<(), CompressionError> {
        if adapter.has_signature() && !adapter.looks_native(native) {
            return Err(CompressionError::MethodMismatch {
                method: adapter.method(),
                detected: self.codecs.sniff(framed),
            });
        }
        Ok(())
    }
}

impl Default for SimpleCompression {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

fn shared() -> &'static SimpleCompression {
    static SHARED: OnceLock<SimpleCompression> = OnceLock::new();
    SHARED.get_or_init(SimpleCompression::default)
}

/// Compress with the process-wide default configuration.
pub fn compress(data: &[u8], method: CompressionMethod) -> Result<Vec<u8>, CompressionError> {
    shared().compress(data, method)
}

/// Decompress with the process-wide default configuration.
pub fn decompress(framed: &[u8], method: CompressionMethod) -> Result<Vec<u8>, CompressionError> {
    shared().decompress(framed, method)
}

pub fn compress_with_id(data: &[u8], method_id: u8) -> Result<Vec<u8>, CompressionError> {
    shared().compress_with_id(data, method_id)
}

pub fn decompress_with_id(framed: &[u8], method_id: u8) -> Result<Vec<u8>, CompressionError> {
    shared().decompress_with_id(framed, method_id)
}

pub fn sniff_method(framed: &[u8]) -> Option<CompressionMethod> {
    shared().sniff_method(framed)
}
