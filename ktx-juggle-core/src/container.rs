//! In-memory KTX container
//!
//! [`KtxContainer`] mirrors the binary layout of a KTX 1.1 file field by
//! field. It is filled completely by one codec call and handed to the
//! opposite codec; nothing about it is derived lazily.

use crate::constants::{
    CUBEMAP_FACES, ENDIANNESS_NATIVE, ENDIANNESS_SWAPPED, KTX_ALIGNMENT, KTX_IDENTIFIER,
    PALETTE_FORMATS,
};

/// The fixed header of a KTX file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KtxHeader {
    /// File identifier, normally [`KTX_IDENTIFIER`]
    pub identifier: Vec<u8>,
    /// Endianness marker as read in little-endian order
    pub endianness: u32,
    pub gl_type: u32,
    /// Byte width of one component, the word size for byte swapping
    pub gl_type_size: u32,
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub gl_base_internal_format: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_depth: u32,
    pub number_of_array_elements: u32,
    pub number_of_faces: u32,
    pub number_of_mipmap_levels: u32,
    pub bytes_of_key_value_data: u32,
}

impl Default for KtxHeader {
    fn default() -> Self {
        Self {
            identifier: KTX_IDENTIFIER.to_vec(),
            endianness: ENDIANNESS_NATIVE,
            gl_type: 0,
            gl_type_size: 1,
            gl_format: 0,
            gl_internal_format: 0,
            gl_base_internal_format: 0,
            pixel_width: 0,
            pixel_height: 0,
            pixel_depth: 0,
            number_of_array_elements: 0,
            number_of_faces: 1,
            number_of_mipmap_levels: 1,
            bytes_of_key_value_data: 0,
        }
    }
}

impl KtxHeader {
    /// glInternalFormat is one of the GL_PALETTE*_OES formats
    pub fn is_palette_compressed(&self) -> bool {
        PALETTE_FORMATS.contains(&self.gl_internal_format)
    }

    /// Six faces and no array elements: one image per face in every level
    pub fn is_non_array_cubemap(&self) -> bool {
        self.number_of_array_elements == 0 && self.number_of_faces == CUBEMAP_FACES
    }

    /// Number of images stored after each imageSize field
    pub fn images_per_level(&self) -> usize {
        if self.is_non_array_cubemap() {
            CUBEMAP_FACES as usize
        } else {
            1
        }
    }

    /// Number of levels stored in the file
    ///
    /// A declared count of 0 means "generate mipmaps" and still stores one
    /// level. Paletted formats pack all levels into a single image.
    pub fn stored_level_count(&self) -> usize {
        if self.is_palette_compressed() {
            1
        } else {
            self.number_of_mipmap_levels.max(1) as usize
        }
    }

    /// Upper bound for numberOfMipmapLevels given the pixel dimensions
    pub fn max_mipmap_levels(&self) -> u32 {
        let largest = self
            .pixel_width
            .max(self.pixel_height)
            .max(self.pixel_depth);
        match largest {
            0 => 1,
            n => n.ilog2() + 1,
        }
    }

    /// The stored marker asks for big-endian fields after it
    pub fn is_byte_swapped(&self) -> bool {
        self.endianness == ENDIANNESS_SWAPPED
    }
}

/// One key/value pair of the metadata block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl MetadataEntry {
    pub fn new<K: Into<Vec<u8>>, V: Into<Vec<u8>>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Size of the keyAndValue field: key, NUL separator and value
    pub fn key_and_value_size(&self) -> usize {
        self.key.len() + 1 + self.value.len()
    }
}

/// One mipmap level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    /// Declared imageSize, kept even if the images disagree
    pub image_size: u32,
    /// One image, or one per face for non-array cubemaps
    pub images: Vec<Vec<u8>>,
}

impl MipLevel {
    pub fn new(image_size: u32, images: Vec<Vec<u8>>) -> Self {
        Self { image_size, images }
    }

    /// A level whose imageSize matches its single image
    pub fn single(image: Vec<u8>) -> Self {
        Self {
            image_size: image.len() as u32,
            images: vec![image],
        }
    }
}

/// A complete KTX texture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KtxContainer {
    pub header: KtxHeader,
    /// Metadata in file order; duplicate keys are legal
    pub metadata: Vec<MetadataEntry>,
    pub levels: Vec<MipLevel>,
}

impl KtxContainer {
    pub fn new(header: KtxHeader) -> Self {
        Self {
            header,
            metadata: Vec::new(),
            levels: Vec::new(),
        }
    }

    /// Append a metadata entry
    pub fn with_metadata<K: Into<Vec<u8>>, V: Into<Vec<u8>>>(mut self, key: K, value: V) -> Self {
        self.metadata.push(MetadataEntry::new(key, value));
        self
    }

    /// Append a level
    pub fn with_level(mut self, level: MipLevel) -> Self {
        self.levels.push(level);
        self
    }

    /// Byte length of the metadata block as it would be encoded
    pub fn metadata_byte_size(&self, aligned: bool) -> usize {
        self.metadata
            .iter()
            .map(|entry| {
                let size = 4 + entry.key_and_value_size();
                if aligned {
                    align_up(size, KTX_ALIGNMENT as usize)
                } else {
                    size
                }
            })
            .sum()
    }

    /// Set bytesOfKeyValueData to the encoded metadata size
    pub fn update_key_value_size(&mut self, aligned: bool) {
        self.header.bytes_of_key_value_data = self.metadata_byte_size(aligned) as u32;
    }

    /// First value stored under `key`
    pub fn metadata_value(&self, key: &[u8]) -> Option<&[u8]> {
        self.metadata
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_slice())
    }
}

fn align_up(size: usize, alignment: usize) -> usize {
    size.div_ceil(alignment) * alignment
}
