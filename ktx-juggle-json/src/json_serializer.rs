//! KTX JSON serializer
//!
//! The output is written by hand rather than through serde so the layout is
//! stable and easy to diff:
//! - header values aligned in one column, in file order
//! - one line per metadata entry
//! - one line per level, or one line per image for cubemap levels

use crate::constants::{DEFAULT_MAX_INLINE, FORMAT_TAG, HEADER_KEY_WIDTH, SIDECAR_EXTENSION};
use crate::pattern::{bytes_to_name, percent_encode};
use ktx_juggle_core::{
    GlEnumNames, GlEnumRegistry, ImageStore, KtxContainer, KtxError, KtxHeader, MetadataEntry,
    MipLevel, Result,
};
use std::fmt::{self, Write};

/// Options for writing JSON documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Longest repeating pattern written inline, 0 disables inlining
    pub max_inline: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            max_inline: DEFAULT_MAX_INLINE,
        }
    }
}

impl JsonOptions {
    pub fn new(max_inline: usize) -> Self {
        Self { max_inline }
    }

    /// Always write images to sidecar files
    pub fn no_inline() -> Self {
        Self::new(0)
    }
}

/// KTX JSON serializer
pub struct KtxJsonSerializer<N: GlEnumNames = GlEnumRegistry> {
    names: N,
    options: JsonOptions,
}

impl KtxJsonSerializer {
    /// Create a serializer using the built-in GL enum table
    pub fn new() -> Self {
        Self {
            names: GlEnumRegistry::new(),
            options: JsonOptions::default(),
        }
    }
}

impl Default for KtxJsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GlEnumNames> KtxJsonSerializer<N> {
    /// Create a serializer with a custom GL enum lookup
    pub fn with_names(names: N) -> Self {
        Self {
            names,
            options: JsonOptions::default(),
        }
    }

    pub fn with_options(mut self, options: JsonOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &JsonOptions {
        &self.options
    }

    /// Serialize a container to a JSON string
    ///
    /// Images that are not inlined are written to `store` as
    /// `<stem>.<mip>.bin`, or `<stem>.<mip>.<face>.bin` when a level holds
    /// more than one image.
    pub fn serialize_to_string(
        &self,
        ktx: &KtxContainer,
        stem: &str,
        store: &mut dyn ImageStore,
    ) -> Result<String> {
        let mut output = String::new();
        self.serialize_to_writer(&mut output, ktx, stem, store)?;
        Ok(output)
    }

    /// Serialize a container to a writer
    pub fn serialize_to_writer<W: Write>(
        &self,
        writer: &mut W,
        ktx: &KtxContainer,
        stem: &str,
        store: &mut dyn ImageStore,
    ) -> Result<()> {
        writeln!(writer, "{{").map_err(write_error)?;
        writeln!(writer, "  \"format\": {},", quote(FORMAT_TAG)?).map_err(write_error)?;
        self.write_header(writer, &ktx.header)?;

        if !ktx.metadata.is_empty() {
            self.write_metadata(writer, &ktx.metadata)?;
        }
        if !ktx.levels.is_empty() {
            self.write_levels(writer, &ktx.levels, stem, store)?;
        }

        write!(writer, "\n}}\n").map_err(write_error)
    }

    fn write_header<W: Write>(&self, writer: &mut W, header: &KtxHeader) -> Result<()> {
        let fields = [
            ("identifier", quote(&percent_encode(&header.identifier, true))?),
            ("endianness", quote(&format!("0x{:08x}", header.endianness))?),
            ("glType", self.gl_name(header.gl_type)?),
            ("glTypeSize", header.gl_type_size.to_string()),
            ("glFormat", self.gl_name(header.gl_format)?),
            ("glInternalFormat", self.gl_name(header.gl_internal_format)?),
            ("glBaseInternalFormat", self.gl_name(header.gl_base_internal_format)?),
            ("pixelWidth", header.pixel_width.to_string()),
            ("pixelHeight", header.pixel_height.to_string()),
            ("pixelDepth", header.pixel_depth.to_string()),
            ("numberOfArrayElements", header.number_of_array_elements.to_string()),
            ("numberOfFaces", header.number_of_faces.to_string()),
            ("numberOfMipmapLevels", header.number_of_mipmap_levels.to_string()),
            ("bytesOfKeyValueData", header.bytes_of_key_value_data.to_string()),
        ];

        writeln!(writer, "  \"header\": {{").map_err(write_error)?;
        for (index, (key, value)) in fields.iter().enumerate() {
            let separator = if index + 1 < fields.len() { "," } else { "" };
            writeln!(
                writer,
                "    {:<width$} {}{}",
                format!("\"{}\":", key),
                value,
                separator,
                width = HEADER_KEY_WIDTH
            )
            .map_err(write_error)?;
        }
        write!(writer, "  }}").map_err(write_error)
    }

    fn write_metadata<W: Write>(&self, writer: &mut W, metadata: &[MetadataEntry]) -> Result<()> {
        write!(writer, ",\n  \"metadata\": [").map_err(write_error)?;
        for (index, entry) in metadata.iter().enumerate() {
            let separator = if index == 0 { "\n" } else { ",\n" };
            write!(
                writer,
                "{}    [{}, {}]",
                separator,
                quote(&percent_encode(&entry.key, true))?,
                quote(&percent_encode(&entry.value, true))?
            )
            .map_err(write_error)?;
        }
        write!(writer, "\n  ]").map_err(write_error)
    }

    fn write_levels<W: Write>(
        &self,
        writer: &mut W,
        levels: &[MipLevel],
        stem: &str,
        store: &mut dyn ImageStore,
    ) -> Result<()> {
        let size_width = levels
            .iter()
            .map(|level| level.image_size.to_string().len())
            .max()
            .unwrap_or(1);

        write!(writer, ",\n  \"levels\": [").map_err(write_error)?;
        for (mip, level) in levels.iter().enumerate() {
            let separator = if mip == 0 { "\n" } else { ",\n" };
            write!(
                writer,
                "{}    {{\"imageSize\": {:>width$}, \"images\": [",
                separator,
                level.image_size,
                width = size_width
            )
            .map_err(write_error)?;

            let names = self.image_names(level, mip, stem, store)?;
            if names.len() == 1 {
                write!(writer, "{}", names[0]).map_err(write_error)?;
            } else {
                for (face, name) in names.iter().enumerate() {
                    let separator = if face == 0 { "\n" } else { ",\n" };
                    write!(writer, "{}      {}", separator, name).map_err(write_error)?;
                }
            }
            write!(writer, "]}}").map_err(write_error)?;
        }
        write!(writer, "\n  ]").map_err(write_error)
    }

    /// Quoted references for every image of a level, storing sidecars as needed
    fn image_names(
        &self,
        level: &MipLevel,
        mip: usize,
        stem: &str,
        store: &mut dyn ImageStore,
    ) -> Result<Vec<String>> {
        let single = level.images.len() == 1;
        level
            .images
            .iter()
            .enumerate()
            .map(|(face, image)| {
                let name = if single {
                    format!("{stem}.{mip}.{SIDECAR_EXTENSION}")
                } else {
                    format!("{stem}.{mip}.{face}.{SIDECAR_EXTENSION}")
                };
                quote(&bytes_to_name(
                    level.image_size as usize,
                    image,
                    &name,
                    store,
                    self.options.max_inline,
                )?)
            })
            .collect()
    }

    fn gl_name(&self, value: u32) -> Result<String> {
        quote(&self.names.value_to_name(value))
    }
}

fn quote(value: &str) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| KtxError::format(format!("Failed to encode JSON string: {}", e)))
}

fn write_error(e: fmt::Error) -> KtxError {
    KtxError::format(format!("Failed to write JSON: {}", e))
}
