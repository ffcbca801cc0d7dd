//! KTX Juggle Core
//!
//! Core data structures and collaborators for converting KTX 1.1 textures.
//! This crate provides the pieces shared by the binary and textual codecs:
//! the container model, the error type, diagnostics, the GL enum lookup,
//! the image store abstraction and the validator.

pub mod constants;
pub mod container;
pub mod diagnostics;
pub mod error;
pub mod gl_enums;
pub mod storage;
pub mod validator;

// Re-export main types
pub use constants::*;
pub use container::{KtxContainer, KtxHeader, MetadataEntry, MipLevel};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Severity, TracingSink};
pub use error::{KtxError, Result};
pub use gl_enums::{GlEnumNames, GlEnumRegistry, parse_uint};
pub use storage::{DirectoryStore, DiscardStore, ImageStore, MemoryStore};
pub use validator::{Validator, validate};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        let ktx = KtxContainer::default();
        assert_eq!(ktx.header.identifier, KTX_IDENTIFIER);
        assert!(ktx.metadata.is_empty());
        assert!(ktx.levels.is_empty());
    }
}
