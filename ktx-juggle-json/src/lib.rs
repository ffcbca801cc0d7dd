//! KTX JSON codec
//!
//! Converts a [`KtxContainer`] to and from a human-readable JSON document.
//! Image payloads are stored in sidecar `.bin` files next to the document,
//! except for images made of one short repeating pattern, which are written
//! inline as percent-encoded strings.
//!
//! # Examples
//!
//! ```rust
//! use ktx_juggle_core::{Diagnostics, KtxContainer, KtxHeader, MemoryStore, MipLevel};
//! use ktx_juggle_json::{KtxJsonLoader, KtxJsonSerializer};
//!
//! let header = KtxHeader { pixel_width: 2, pixel_height: 2, ..KtxHeader::default() };
//! let texture = KtxContainer::new(header).with_level(MipLevel::single(vec![0xFF; 4]));
//!
//! let mut store = MemoryStore::new();
//! let json = KtxJsonSerializer::new().serialize_to_string(&texture, "tex", &mut store)?;
//! assert!(json.contains("\"%FF\""));
//!
//! let mut diagnostics = Diagnostics::new();
//! let loaded = KtxJsonLoader::new().load_from_str(&json, &store, &mut diagnostics)?;
//! assert_eq!(loaded, texture);
//! # Ok::<(), ktx_juggle_core::KtxError>(())
//! ```

// Re-export core types
pub use ktx_juggle_core::{KtxContainer, KtxError, Result};

// Core modules
pub mod constants;
pub mod json_document;
pub mod json_loader;
pub mod json_serializer;
pub mod pattern;

// Re-export main types
pub use json_document::{document_stem, dump_json, load_json, save_json};
pub use json_loader::KtxJsonLoader;
pub use json_serializer::{JsonOptions, KtxJsonSerializer};
pub use pattern::{
    bytes_to_name, find_repeating_pattern, name_to_bytes, percent_decode, percent_encode,
};
