//! compression/registry.rs
//! Method registry and adapter factory.

use crate::compression::codecs::{
    BrotliAdapter, Bzip2Adapter, DeflateAdapter, GzipAdapter, LzipAdapter, LzmaAdapter, ZipAdapter, ZlibAdapter,
};
use crate::compression::config::CodecConfig;
use crate::compression::types::{CodecAdapter, CompressionError, CompressionMethod, FramingPolicy};
use crate::constants::LEN_PREFIX_SIZE;

pub struct CodecInfo {
    pub name: &'static str,
    pub policy: FramingPolicy,
    /// Bytes the facade adds on top of the engine output.
    pub facade_overhead: usize,
}

pub fn resolve(method_id: u8) -> Result<CodecInfo, CompressionError> {
    let method = CompressionMethod::from_id(method_id)?;
    let policy = method.framing_policy();
    let facade_overhead = match policy {
        FramingPolicy::LengthPrefixed => LEN_PREFIX_SIZE,
        _ => 0,
    };
    Ok(CodecInfo { name: method.as_str(), policy, facade_overhead })
}

pub fn create_adapter(method: CompressionMethod, config: &CodecConfig) -> Box<dyn CodecAdapter> {
    log::debug!("creating {} adapter", method);
    match method {
        CompressionMethod::Gzip    => Box::new(GzipAdapter::new(config)),
        CompressionMethod::Deflate => Box::new(DeflateAdapter::new(config)),
        CompressionMethod::Brotli  => Box::new(BrotliAdapter::new(config)),
        CompressionMethod::Lzma    => Box::new(LzmaAdapter::new(config)),
        CompressionMethod::Zlib    => Box::new(ZlibAdapter::new(config)),
        CompressionMethod::Zip     => Box::new(ZipAdapter::new(config)),
        CompressionMethod::Bzip2   => Box::new(Bzip2Adapter::new(config)),
        CompressionMethod::Lzip    => Box::new(LzipAdapter::new(config)),
    }
}

/// One adapter per method, built once from a frozen config.
pub struct CodecSet {
    adapters: [Box<dyn CodecAdapter>; 8],
}

impl CodecSet {
    pub fn new(config: &CodecConfig) -> Self {
        Self { adapters: CompressionMethod::ALL.map(|m| create_adapter(m, config)) }
    }

    #[inline]
    pub fn get(&self, method: CompressionMethod) -> &dyn CodecAdapter {
        self.adapters[method.id() as usize].as_ref()
    }

    /// Guess which method produced `framed` from native signatures.
    ///
    /// Only methods with a real signature can be recognised; deflate, brotli
    /// and LZMA are never reported.
    pub fn sniff(&self, framed: &[u8]) -> Option<CompressionMethod> {
        CompressionMethod::ALL.into_iter().find(|&m| {
            let adapter = self.get(m);
            if !adapter.has_signature() {
                return false;
            }
            match m.framing_policy() {
                FramingPolicy::LengthPrefixed => framed
                    .get(LEN_PREFIX_SIZE..)
                    .map_or(false, |body| adapter.looks_native(body)),
                _ => adapter.looks_native(framed),
            }
        })
    }
}
