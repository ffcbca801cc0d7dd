//! KTX 1.1 binary codec
//!
//! # Architecture
//!
//! - `types` - Codec options (alignment mode)
//! - `header` - Fixed header and endianness detection
//! - `parser` - Best-effort decoder into a [`KtxContainer`]
//! - `writer` - Byte-exact encoder from a [`KtxContainer`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use ktx_juggle_binary::ktx::{self, BinaryOptions};
//! use ktx_juggle_core::Diagnostics;
//!
//! let data = std::fs::read("texture.ktx")?;
//! let mut diagnostics = Diagnostics::new();
//! let texture = ktx::decode(&data, &BinaryOptions::default(), &mut diagnostics)?;
//! let bytes = ktx::encode(&texture, &BinaryOptions::default())?;
//! assert_eq!(bytes, data);
//! # Ok::<(), ktx_juggle_binary::BinaryError>(())
//! ```

pub mod header;
pub mod parser;
pub mod types;
pub mod writer;

pub use header::{read_header, write_header};
pub use parser::KtxParser;
pub use types::BinaryOptions;
pub use writer::KtxEncoder;

use crate::error::Result;
use ktx_juggle_core::{DiagnosticSink, KtxContainer};
use std::fs;
use std::path::Path;

/// Decode and validate a KTX file held in memory
pub fn decode(
    data: &[u8],
    options: &BinaryOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<KtxContainer> {
    KtxParser::from_bytes(data, options, sink)
}

/// Encode a container to KTX bytes
pub fn encode(ktx: &KtxContainer, options: &BinaryOptions) -> Result<Vec<u8>> {
    KtxEncoder::to_bytes(ktx, options)
}

/// Load and validate a KTX file
pub fn load_ktx<P: AsRef<Path>>(
    path: P,
    options: &BinaryOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<KtxContainer> {
    let data = fs::read(path)?;
    decode(&data, options, sink)
}

/// Write a container to a KTX file
pub fn save_ktx<P: AsRef<Path>>(ktx: &KtxContainer, path: P, options: &BinaryOptions) -> Result<()> {
    let file = fs::File::create(path)?;
    KtxEncoder::write_to(ktx, std::io::BufWriter::new(file), options)
}
