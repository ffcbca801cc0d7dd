//! Constants for the KTX JSON format

// Re-export from ktx-juggle-core
pub use ktx_juggle_core::constants::*;

/// Value of the top-level `format` field
pub const FORMAT_TAG: &str = "KTX 11";

/// Longest repeating pattern written inline instead of to a sidecar file
pub const DEFAULT_MAX_INLINE: usize = 16;

/// Extension of sidecar image files
pub const SIDECAR_EXTENSION: &str = "bin";

/// Width of the quoted header keys, so the values line up
pub const HEADER_KEY_WIDTH: usize = 24;
