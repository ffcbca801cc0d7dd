//! Image storage for sidecar files
//!
//! The textual codec keeps large pixel payloads outside the JSON document.
//! It never touches the filesystem itself; it reads and writes images by
//! relative name through an [`ImageStore`].

use crate::error::{KtxError, Result};
use indexmap::IndexMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Named byte blobs scoped to one directory
pub trait ImageStore {
    /// Read the whole blob stored under `name`
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Store `data` under `name`, replacing any previous blob
    fn write(&mut self, name: &str, data: &[u8]) -> Result<()>;
}

/// Stores images as files in a directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory containing `path`, for a document stored at `path`
    pub fn beside<P: AsRef<Path>>(path: P) -> Self {
        let parent = path
            .as_ref()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(parent)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStore for DirectoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KtxError::image_not_found(path.display().to_string()),
            _ => KtxError::Io(e),
        })
    }

    fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        fs::write(self.root.join(name), data)?;
        Ok(())
    }
}

/// Keeps images in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    images: IndexMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.images.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| KtxError::image_not_found(name))
    }

    fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.images.insert(name.to_string(), data.to_vec());
        Ok(())
    }
}

/// Drops every write; used when rendering JSON without an output directory
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardStore;

impl ImageStore for DiscardStore {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        Err(KtxError::image_not_found(name))
    }

    fn write(&mut self, _name: &str, _data: &[u8]) -> Result<()> {
        Ok(())
    }
}
