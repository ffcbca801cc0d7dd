//! KTX JSON loader based on serde_json
//!
//! The document is first parsed into a [`serde_json::Value`] so the `format`
//! tag can be checked before anything else is interpreted. The remainder is
//! then deserialized into plain structs mirroring the document layout and
//! converted into a [`KtxContainer`].

use crate::constants::FORMAT_TAG;
use crate::pattern::{name_to_bytes, percent_decode};
use ktx_juggle_core::{
    DiagnosticSink, GlEnumNames, GlEnumRegistry, ImageStore, KtxContainer, KtxError, KtxHeader,
    MetadataEntry, MipLevel, Result, Validator, parse_uint,
};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct JsonKtx {
    header: JsonHeader,
    #[serde(default)]
    metadata: Vec<(String, String)>,
    #[serde(default)]
    levels: Vec<JsonLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonHeader {
    identifier: String,
    endianness: String,
    gl_type: GlEnumField,
    gl_type_size: u32,
    gl_format: GlEnumField,
    gl_internal_format: GlEnumField,
    gl_base_internal_format: GlEnumField,
    pixel_width: u32,
    pixel_height: u32,
    pixel_depth: u32,
    number_of_array_elements: u32,
    number_of_faces: u32,
    number_of_mipmap_levels: u32,
    bytes_of_key_value_data: u32,
}

/// GL enum fields are written by name, but a bare number is accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GlEnumField {
    Value(u32),
    Name(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonLevel {
    image_size: u32,
    images: Vec<String>,
}

/// KTX JSON loader
///
/// GL enum names are resolved through `N`, the built-in table by default.
pub struct KtxJsonLoader<N: GlEnumNames = GlEnumRegistry> {
    names: N,
    aligned: bool,
}

impl KtxJsonLoader {
    /// Create a loader using the built-in GL enum table
    pub fn new() -> Self {
        Self::with_names(GlEnumRegistry::new())
    }
}

impl Default for KtxJsonLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GlEnumNames> KtxJsonLoader<N> {
    /// Create a loader with a custom GL enum lookup
    pub fn with_names(names: N) -> Self {
        Self {
            names,
            aligned: true,
        }
    }

    /// Layout assumed when checking bytesOfKeyValueData
    pub fn with_alignment(mut self, aligned: bool) -> Self {
        self.aligned = aligned;
        self
    }

    /// Load a container from a reader
    ///
    /// Sidecar images are read from `store`. The result is validated into
    /// `sink` before it is returned.
    pub fn load_from_reader<R: Read>(
        &self,
        mut reader: R,
        store: &dyn ImageStore,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<KtxContainer> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| KtxError::parse(format!("Failed to read input: {}", e)))?;
        self.load_from_str(&content, store, sink)
    }

    /// Load a container from a JSON string
    pub fn load_from_str(
        &self,
        json: &str,
        store: &dyn ImageStore,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<KtxContainer> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| KtxError::parse(format!("JSON parsing error: {}", e)))?;
        self.load_from_value(document, store, sink)
    }

    /// Load a container from an already parsed JSON document
    pub fn load_from_value(
        &self,
        document: Value,
        store: &dyn ImageStore,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<KtxContainer> {
        check_format(&document)?;

        let parsed: JsonKtx = serde_json::from_value(document)
            .map_err(|e| KtxError::format(format!("Invalid KTX document: {}", e)))?;

        let header = self.convert_header(&parsed.header)?;
        let metadata = parsed
            .metadata
            .iter()
            .map(|(key, value)| Ok(MetadataEntry::new(percent_decode(key)?, percent_decode(value)?)))
            .collect::<Result<Vec<_>>>()?;
        let levels = parsed
            .levels
            .iter()
            .map(|level| convert_level(level, store))
            .collect::<Result<Vec<_>>>()?;

        let ktx = KtxContainer {
            header,
            metadata,
            levels,
        };
        Validator::with_alignment(self.aligned).validate(&ktx, sink);
        Ok(ktx)
    }

    fn convert_header(&self, header: &JsonHeader) -> Result<KtxHeader> {
        Ok(KtxHeader {
            identifier: percent_decode(&header.identifier)?,
            endianness: parse_uint(&header.endianness)?,
            gl_type: self.resolve(&header.gl_type)?,
            gl_type_size: header.gl_type_size,
            gl_format: self.resolve(&header.gl_format)?,
            gl_internal_format: self.resolve(&header.gl_internal_format)?,
            gl_base_internal_format: self.resolve(&header.gl_base_internal_format)?,
            pixel_width: header.pixel_width,
            pixel_height: header.pixel_height,
            pixel_depth: header.pixel_depth,
            number_of_array_elements: header.number_of_array_elements,
            number_of_faces: header.number_of_faces,
            number_of_mipmap_levels: header.number_of_mipmap_levels,
            bytes_of_key_value_data: header.bytes_of_key_value_data,
        })
    }

    fn resolve(&self, field: &GlEnumField) -> Result<u32> {
        match field {
            GlEnumField::Value(value) => Ok(*value),
            GlEnumField::Name(name) => self.names.name_to_value(name),
        }
    }
}

/// Reject documents that are not tagged as KTX 1.1
fn check_format(document: &Value) -> Result<()> {
    let found = match document.get("format") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => other.to_string(),
        None => "<missing>".to_string(),
    };
    if found != FORMAT_TAG {
        return Err(KtxError::unknown_format(FORMAT_TAG.to_string(), found));
    }
    Ok(())
}

fn convert_level(level: &JsonLevel, store: &dyn ImageStore) -> Result<MipLevel> {
    let images = level
        .images
        .iter()
        .map(|name| name_to_bytes(level.image_size as usize, name, store))
        .collect::<Result<Vec<_>>>()?;
    Ok(MipLevel::new(level.image_size, images))
}
