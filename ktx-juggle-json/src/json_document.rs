//! Path-level loading and saving of KTX JSON documents
//!
//! Sidecar images live next to the JSON file, so the image store is always
//! the directory containing the document.

use crate::json_loader::KtxJsonLoader;
use crate::json_serializer::{JsonOptions, KtxJsonSerializer};
use ktx_juggle_core::{
    DiagnosticSink, DirectoryStore, DiscardStore, KtxContainer, KtxError, Result,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a KTX JSON file, reading sidecar images from its directory
///
/// # Examples
///
/// ```rust,no_run
/// use ktx_juggle_core::Diagnostics;
/// use ktx_juggle_json::load_json;
///
/// let mut diagnostics = Diagnostics::new();
/// let texture = load_json("texture.json", true, &mut diagnostics)?;
/// println!("{} levels", texture.levels.len());
/// # Ok::<(), ktx_juggle_core::KtxError>(())
/// ```
pub fn load_json<P: AsRef<Path>>(
    path: P,
    aligned: bool,
    sink: &mut dyn DiagnosticSink,
) -> Result<KtxContainer> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        KtxError::format(format!("Failed to open file {}: {}", path.display(), e))
    })?;

    let store = DirectoryStore::beside(path);
    KtxJsonLoader::new()
        .with_alignment(aligned)
        .load_from_reader(BufReader::new(file), &store, sink)
}

/// Save a container as JSON, writing sidecar images next to it
///
/// Sidecar names are derived from the file stem of `path`.
pub fn save_json<P: AsRef<Path>>(ktx: &KtxContainer, path: P, options: &JsonOptions) -> Result<()> {
    let path = path.as_ref();
    let stem = document_stem(path)?;
    let mut store = DirectoryStore::beside(path);

    let json = KtxJsonSerializer::new()
        .with_options(*options)
        .serialize_to_string(ktx, &stem, &mut store)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Render a container as JSON without writing any sidecar files
///
/// Images that cannot be inlined are referenced by name only.
pub fn dump_json(ktx: &KtxContainer, stem: &str, options: &JsonOptions) -> Result<String> {
    KtxJsonSerializer::new()
        .with_options(*options)
        .serialize_to_string(ktx, stem, &mut DiscardStore)
}

/// File name of `path` without its extension
pub fn document_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| KtxError::format(format!("No file name in {}", path.display())))
}
