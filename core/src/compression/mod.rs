//! compression/mod.rs
//! In-memory compression facade over eight codec engines.
//!
//! Notes:
//! - Framing policy is per method; see [`FramingPolicy`].
//! - Registry resolves method ids to adapters.

pub mod codecs;
pub mod config;
pub mod constants;
pub mod facade;
pub mod framing;
pub mod registry;
pub mod types;

pub use config::*;
pub use facade::*;
pub use registry::*;
pub use types::*;
