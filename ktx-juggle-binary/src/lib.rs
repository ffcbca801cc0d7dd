//! KTX Binary Codec
//!
//! This crate reads and writes the binary KTX 1.1 texture container:
//! - Endianness-switchable positional reader and writer
//! - Header, key/value metadata and mipmap image decoding
//! - Byte-exact re-encoding, including the legacy unaligned layout
//!
//! Decoding never rejects a damaged file once the fixed header is
//! complete. Truncated metadata or image data, trailing bytes and every
//! structural inconsistency are reported through a
//! [`ktx_juggle_core::DiagnosticSink`].

pub mod error;
pub mod ktx;
pub mod reader;
pub mod writer;

pub use error::{BinaryError, Result};
pub use ktx::{BinaryOptions, KtxEncoder, KtxParser, decode, encode, load_ktx, save_ktx};
pub use reader::{BinaryReader, ByteOrder, swap_words};
pub use writer::BinaryWriter;
