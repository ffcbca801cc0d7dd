//! Structural validation of a populated container
//!
//! The validator reports every inconsistency it can observe and rejects
//! nothing. It does not check glType/glFormat/glInternalFormat
//! combinations, nor imageSize against the pixel format.

use crate::constants::{
    ENDIANNESS_NATIVE, ENDIANNESS_SWAPPED, KTX_IDENTIFIER, KTX_ORIENTATION, RESERVED_KEY_PREFIXES,
};
use crate::container::KtxContainer;
use crate::diagnostics::DiagnosticSink;
use std::collections::HashSet;

/// Container validator
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    /// Alignment mode used to recompute the metadata block size
    aligned: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self { aligned: true }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate against the given alignment mode
    pub fn with_alignment(aligned: bool) -> Self {
        Self { aligned }
    }

    /// Report every rule violation of `ktx` to `sink`
    pub fn validate(&self, ktx: &KtxContainer, sink: &mut dyn DiagnosticSink) {
        self.check_header(ktx, sink);
        self.check_metadata(ktx, sink);
        self.check_levels(ktx, sink);
    }

    fn check_header(&self, ktx: &KtxContainer, sink: &mut dyn DiagnosticSink) {
        let header = &ktx.header;

        if header.identifier != KTX_IDENTIFIER {
            sink.warn("Invalid identifier");
        }

        if header.endianness != ENDIANNESS_NATIVE && header.endianness != ENDIANNESS_SWAPPED {
            sink.warn(&format!("Invalid endianness: 0x{:08x}", header.endianness));
        }

        // glType 0 marks a compressed format
        if header.gl_type_size == 0 && header.gl_type != 0 {
            sink.warn("glTypeSize should not be 0 for an uncompressed format");
        }

        if header.pixel_width == 0 {
            sink.warn("pixelWidth should never be 0");
        }

        if header.pixel_height == 0 && header.pixel_depth != 0 {
            sink.warn("pixelHeight should not be 0, because pixelDepth is not 0");
        }

        if header.number_of_faces != 1 && header.number_of_faces != 6 {
            sink.warn("numberOfFaces should be 1 or 6");
        }

        if header.is_palette_compressed() && header.number_of_faces != 1 {
            sink.warn("numberOfFaces should be 1 because glInternalFormat is GL_PALETTE*");
        }

        if header.number_of_mipmap_levels > header.max_mipmap_levels() {
            sink.warn(&format!(
                "numberOfMipmapLevels {} exceeds the maximum of {} for the pixel dimensions",
                header.number_of_mipmap_levels,
                header.max_mipmap_levels()
            ));
        }

        let expected = self.expected_key_value_size(ktx);
        if header.bytes_of_key_value_data as usize != expected {
            sink.warn(&format!(
                "bytesOfKeyValueData is {}, but the metadata needs {} bytes",
                header.bytes_of_key_value_data, expected
            ));
        }
    }

    fn check_metadata(&self, ktx: &KtxContainer, sink: &mut dyn DiagnosticSink) {
        let mut seen: HashSet<&[u8]> = HashSet::new();
        for entry in &ktx.metadata {
            let key = entry.key.as_slice();
            if key.is_empty() {
                sink.info("metadata contains empty key (allowed, but weird)");
            }
            if entry.value.is_empty() {
                sink.info("metadata contains empty value (allowed, but weird)");
            }
            if !seen.insert(key) {
                sink.info("metadata contains duplicate key (allowed, but weird)");
            }
            let reserved = RESERVED_KEY_PREFIXES
                .iter()
                .any(|prefix| key.starts_with(prefix));
            if reserved && key != KTX_ORIENTATION {
                sink.info(&format!(
                    "Unknown key name with reserved KTX prefix: {}",
                    String::from_utf8_lossy(key)
                ));
            }
        }
    }

    fn check_levels(&self, ktx: &KtxContainer, sink: &mut dyn DiagnosticSink) {
        let header = &ktx.header;

        if ktx.levels.len() != header.stored_level_count() {
            if header.is_palette_compressed() {
                sink.warn("GL_PALETTE* formats store all levels in a single image");
            } else {
                sink.warn("numberOfMipmapLevels does not match actual number of levels");
            }
        }

        let images_per_level = header.images_per_level();
        let mut previous_size = u32::MAX;
        for (mip, level) in ktx.levels.iter().enumerate() {
            if level.images.len() != images_per_level {
                sink.warn(&format!(
                    "level {mip} has {} images, expected {images_per_level}",
                    level.images.len()
                ));
            }
            if level.image_size > previous_size {
                sink.warn("imageSize should be in decreasing order");
            }
            for image in &level.images {
                if image.len() != level.image_size as usize {
                    sink.warn(&format!(
                        "imageSize {} does not match actual image size {} in level {mip}",
                        level.image_size,
                        image.len()
                    ));
                }
                if header.gl_type_size != 0 && image.len() % header.gl_type_size as usize != 0 {
                    sink.warn("imageSize is not multiple of glTypeSize");
                }
            }
            previous_size = level.image_size;
        }
    }

    fn expected_key_value_size(&self, ktx: &KtxContainer) -> usize {
        ktx.metadata_byte_size(self.aligned)
    }
}

/// Validate with the default (aligned) layout
pub fn validate(ktx: &KtxContainer, sink: &mut dyn DiagnosticSink) {
    Validator::new().validate(ktx, sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{KtxHeader, MipLevel};
    use crate::diagnostics::Diagnostics;

    fn rgba_texture() -> KtxContainer {
        let header = KtxHeader {
            gl_type: 0x1401,
            gl_type_size: 1,
            gl_format: 0x1908,
            gl_internal_format: 0x8058,
            gl_base_internal_format: 0x1908,
            pixel_width: 4,
            pixel_height: 4,
            number_of_mipmap_levels: 3,
            ..Default::default()
        };
        let mut ktx = KtxContainer::new(header)
            .with_metadata("KTXorientation", "S=r,T=d\0")
            .with_level(MipLevel::single(vec![0; 64]))
            .with_level(MipLevel::single(vec![0; 16]))
            .with_level(MipLevel::single(vec![0; 4]));
        ktx.update_key_value_size(true);
        ktx
    }

    #[test]
    fn test_valid_texture_is_silent() {
        let mut diagnostics = Diagnostics::new();
        validate(&rgba_texture(), &mut diagnostics);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.entries());
    }

    #[test]
    fn test_header_rules() {
        let mut ktx = rgba_texture();
        ktx.header.identifier[1] = b'X';
        ktx.header.endianness = 0x1234_5678;
        ktx.header.pixel_height = 0;
        ktx.header.pixel_depth = 2;
        ktx.header.number_of_faces = 3;

        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(diagnostics.contains("Invalid identifier"));
        assert!(diagnostics.contains("Invalid endianness"));
        assert!(diagnostics.contains("pixelHeight should not be 0"));
        assert!(diagnostics.contains("numberOfFaces should be 1 or 6"));
    }

    #[test]
    fn test_swapped_endianness_is_valid() {
        let mut ktx = rgba_texture();
        ktx.header.endianness = ENDIANNESS_SWAPPED;
        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(!diagnostics.contains("endianness"));
    }

    #[test]
    fn test_zero_type_size() {
        let mut ktx = rgba_texture();
        ktx.header.gl_type_size = 0;
        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(diagnostics.contains("glTypeSize should not be 0"));

        // Compressed formats use glType 0
        ktx.header.gl_type = 0;
        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(!diagnostics.contains("glTypeSize"));
    }

    #[test]
    fn test_mipmap_count_limits() {
        let mut ktx = rgba_texture();
        ktx.header.number_of_mipmap_levels = 2;
        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(diagnostics.contains("does not match actual number of levels"));
        assert!(!diagnostics.contains("exceeds the maximum"));

        ktx.header.number_of_mipmap_levels = 5;
        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(diagnostics.contains("exceeds the maximum of 3"));
    }

    #[test]
    fn test_palette_rules() {
        let mut ktx = rgba_texture();
        ktx.header.gl_internal_format = 0x8B91;
        ktx.header.number_of_faces = 6;
        ktx.header.number_of_array_elements = 1;

        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(diagnostics.contains("because glInternalFormat is GL_PALETTE*"));
        assert!(diagnostics.contains("single image"));
    }

    #[test]
    fn test_metadata_rules() {
        let mut ktx = rgba_texture()
            .with_metadata("", "value")
            .with_metadata("key", "")
            .with_metadata("KTXorientation", "S=l,T=u\0")
            .with_metadata("ktxCustom", "x");
        ktx.update_key_value_size(true);

        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(!diagnostics.has_warnings());
        assert!(diagnostics.contains("empty key"));
        assert!(diagnostics.contains("empty value"));
        assert!(diagnostics.contains("duplicate key"));
        assert!(diagnostics.contains("reserved KTX prefix: ktxCustom"));
        assert_eq!(diagnostics.infos().count(), 4);
    }

    #[test]
    fn test_key_value_size_mismatch() {
        let mut ktx = rgba_texture();
        ktx.header.bytes_of_key_value_data = 32;
        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(diagnostics.contains("bytesOfKeyValueData is 32, but the metadata needs 28"));

        // 27 bytes is right for the unaligned variant
        ktx.header.bytes_of_key_value_data = 27;
        let mut diagnostics = Diagnostics::new();
        Validator::with_alignment(false).validate(&ktx, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_level_rules() {
        let mut ktx = rgba_texture();
        ktx.levels[1] = MipLevel::new(96, vec![vec![0; 95]]);
        ktx.levels[2].images.push(vec![0; 4]);
        ktx.header.gl_type_size = 2;

        let mut diagnostics = Diagnostics::new();
        validate(&ktx, &mut diagnostics);
        assert!(diagnostics.contains("decreasing order"));
        assert!(diagnostics.contains("imageSize 96 does not match actual image size 95"));
        assert!(diagnostics.contains("not multiple of glTypeSize"));
        assert!(diagnostics.contains("level 2 has 2 images, expected 1"));
    }
}
