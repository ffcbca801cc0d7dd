//! KTX Juggle
//!
//! Lossless conversion of KTX 1.1 texture files to an editable JSON document
//! with sidecar image files, and back.
//!
//! Decoding is best effort: every rule violation and truncation is reported
//! to a [`DiagnosticSink`] and the container holds whatever could be read.
//! Encoding reproduces the container byte for byte, including the stored
//! byte order and key/value data length.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ktx_juggle::Diagnostics;
//! use ktx_juggle::convert::{self, ConvertOptions};
//!
//! let options = ConvertOptions::default();
//! let mut diagnostics = Diagnostics::new();
//!
//! let texture = convert::read_path("texture.ktx", &options, &mut diagnostics)?;
//! convert::write_path(&texture, "out/texture.json", &options)?;
//!
//! for warning in diagnostics.warnings() {
//!     println!("{}", warning);
//! }
//! # Ok::<(), ktx_juggle::KtxError>(())
//! ```

// Re-export from core, binary and JSON crates
pub use ktx_juggle_core::{
    Diagnostic, DiagnosticSink, Diagnostics, GlEnumNames, GlEnumRegistry, ImageStore, KtxContainer,
    KtxError, KtxHeader, MetadataEntry, MipLevel, Result, Severity, TracingSink, Validator,
    constants::*,
};

pub use ktx_juggle_binary::BinaryOptions;
pub use ktx_juggle_json::JsonOptions;

/// Path-level conversions between `.ktx` and `.json` files
pub mod convert {
    use crate::{BinaryOptions, DiagnosticSink, JsonOptions, KtxContainer, KtxError, Result};
    use ktx_juggle_json::{document_stem, dump_json, load_json, save_json};
    use std::fs;
    use std::path::Path;

    /// Options for both codecs
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ConvertOptions {
        pub binary: BinaryOptions,
        pub json: JsonOptions,
    }

    impl ConvertOptions {
        pub fn new(aligned: bool, max_inline: usize) -> Self {
            Self {
                binary: BinaryOptions { aligned },
                json: JsonOptions::new(max_inline),
            }
        }
    }

    /// File types understood by [`read_path`] and [`write_path`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FileKind {
        Ktx,
        Json,
    }

    impl FileKind {
        /// Detect the file type from the extension of `path`
        pub fn from_path(path: &Path) -> Option<Self> {
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("ktx") => Some(Self::Ktx),
                Some("json") => Some(Self::Json),
                _ => None,
            }
        }
    }

    /// Load a `.ktx` or `.json` file
    pub fn read_path<P: AsRef<Path>>(
        path: P,
        options: &ConvertOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<KtxContainer> {
        let path = path.as_ref();
        tracing::debug!("Reading {}", path.display());

        match FileKind::from_path(path) {
            Some(FileKind::Ktx) => Ok(ktx_juggle_binary::load_ktx(path, &options.binary, sink)?),
            Some(FileKind::Json) => load_json(path, options.binary.aligned, sink),
            None => Err(KtxError::format("Input file must be .ktx or .json")),
        }
    }

    /// Write a container to a `.ktx` or `.json` file
    ///
    /// The parent directory is created if needed. For JSON output, sidecar
    /// images are written next to the document.
    pub fn write_path<P: AsRef<Path>>(
        ktx: &KtxContainer,
        path: P,
        options: &ConvertOptions,
    ) -> Result<()> {
        let path = path.as_ref();
        let kind = FileKind::from_path(path)
            .ok_or_else(|| KtxError::format("Output file must be .ktx or .json"))?;

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        tracing::debug!("Writing {}", path.display());

        match kind {
            FileKind::Ktx => Ok(ktx_juggle_binary::save_ktx(ktx, path, &options.binary)?),
            FileKind::Json => save_json(ktx, path, &options.json),
        }
    }

    /// Render a container as JSON for display, writing no files
    ///
    /// Images that are not inlined are referenced under `stem` but never
    /// stored.
    pub fn render_json(ktx: &KtxContainer, stem: &str, options: &ConvertOptions) -> Result<String> {
        dump_json(ktx, stem, &options.json)
    }

    /// Convert `input` to `output`
    ///
    /// Without an output path the JSON rendering of `input` is returned
    /// instead of written.
    pub fn convert_file(
        input: &Path,
        output: Option<&Path>,
        options: &ConvertOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<String>> {
        let ktx = read_path(input, options, sink)?;
        match output {
            Some(output) => {
                write_path(&ktx, output, options)?;
                Ok(None)
            }
            None => render_json(&ktx, &document_stem(input)?, options).map(Some),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_file_kind() {
            assert_eq!(FileKind::from_path(Path::new("a/b.ktx")), Some(FileKind::Ktx));
            assert_eq!(FileKind::from_path(Path::new("b.json")), Some(FileKind::Json));
            assert_eq!(FileKind::from_path(Path::new("b.png")), None);
            assert_eq!(FileKind::from_path(Path::new("ktx")), None);
        }

        #[test]
        fn test_options() {
            let options = ConvertOptions::new(false, 0);
            assert!(!options.binary.aligned);
            assert_eq!(options.json.max_inline, 0);
            assert!(ConvertOptions::default().binary.aligned);
            assert_eq!(ConvertOptions::default().json.max_inline, 16);
        }
    }
}
